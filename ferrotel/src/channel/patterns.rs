//! Prompt patterns for login, password and shell prompt detection.

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

/// Default login prompt: a host name followed by ` login:`.
pub const DEFAULT_LOGIN_PATTERN: &str = r"[\w-]+ login:";

/// Default password prompt.
pub const DEFAULT_PASSWORD_PATTERN: &str = r"Password:";

/// Default shell prompt: `user@host:path$` or `user@host:path#`.
pub const DEFAULT_BANNER_PATTERN: &str = r"[\w.-]+@[\w.-]+:[\w/~.-]+[$#]";

/// Trait for prompt matching - regex by default, extensible for custom parsers.
pub trait PromptMatcher: Send + Sync {
    /// Returns byte offset where match ends, or None if no match.
    fn find_match(&self, data: &[u8]) -> Option<usize>;

    /// Check if the data matches the pattern.
    fn is_match(&self, data: &[u8]) -> bool {
        self.find_match(data).is_some()
    }
}

/// Regex-based prompt matcher (the default implementation).
impl PromptMatcher for Regex {
    fn find_match(&self, data: &[u8]) -> Option<usize> {
        self.find(data).map(|m| m.end())
    }
}

/// Which kind of prompt a line fragment shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// The server asks for the login name.
    Login,
    /// The server asks for the password.
    Password,
    /// The shell is ready for a command.
    Banner,
}

/// The immutable set of prompts a session recognizes.
#[derive(Debug, Clone)]
pub struct PromptPatterns {
    login: Regex,
    password: Regex,
    banner: Regex,
}

impl PromptPatterns {
    /// Compile a pattern set from regex sources.
    pub fn new(login: &str, password: &str, banner: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            login: Regex::new(login)?,
            password: Regex::new(password)?,
            banner: Regex::new(banner)?,
        })
    }

    /// Replace the login prompt pattern.
    pub fn with_login(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.login = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the password prompt pattern.
    pub fn with_password(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.password = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the shell prompt pattern.
    pub fn with_banner(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.banner = Regex::new(pattern)?;
        Ok(self)
    }

    /// Get the login prompt pattern.
    pub fn login(&self) -> &Regex {
        &self.login
    }

    /// Get the password prompt pattern.
    pub fn password(&self) -> &Regex {
        &self.password
    }

    /// Get the shell prompt pattern.
    pub fn banner(&self) -> &Regex {
        &self.banner
    }

    /// Classify a line fragment.
    ///
    /// Checked in order login, password, banner; the first match wins.
    pub fn classify(&self, fragment: &[u8]) -> Option<PromptKind> {
        if self.login.is_match(fragment) {
            Some(PromptKind::Login)
        } else if self.password.is_match(fragment) {
            Some(PromptKind::Password)
        } else if self.banner.is_match(fragment) {
            Some(PromptKind::Banner)
        } else {
            None
        }
    }
}

impl Default for PromptPatterns {
    fn default() -> Self {
        Self::new(
            DEFAULT_LOGIN_PATTERN,
            DEFAULT_PASSWORD_PATTERN,
            DEFAULT_BANNER_PATTERN,
        )
        .expect("default prompt patterns are valid")
    }
}

/// Serializable source form of [`PromptPatterns`].
///
/// Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptPatternsConfig {
    /// Login prompt regex.
    pub login: String,

    /// Password prompt regex.
    pub password: String,

    /// Shell prompt regex.
    pub banner: String,
}

impl PromptPatternsConfig {
    /// Compile into a pattern set.
    pub fn compile(&self) -> Result<PromptPatterns, regex::Error> {
        PromptPatterns::new(&self.login, &self.password, &self.banner)
    }
}

impl Default for PromptPatternsConfig {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATTERN.to_string(),
            password: DEFAULT_PASSWORD_PATTERN.to_string(),
            banner: DEFAULT_BANNER_PATTERN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_login_pattern() {
        let patterns = PromptPatterns::default();
        assert!(patterns.login().is_match(b"RT-N14U login: "));
        assert!(patterns.login().is_match(b"host_1 login:"));
        assert!(!patterns.login().is_match(b"login: "));
    }

    #[test]
    fn test_default_banner_pattern() {
        let patterns = PromptPatterns::default();
        assert!(patterns.banner().is_match(b"admin@RT-N14U:/tmp/home/root# "));
        assert!(patterns.banner().is_match(b"user@host:~$ "));
        assert!(patterns.banner().is_match(b"2014admin@RT-N14U:/tmp/home/root# "));
        assert!(!patterns.banner().is_match(b"Password: "));
        assert!(!patterns.banner().is_match(b"user@host "));
    }

    #[test]
    fn test_classify_order() {
        let patterns = PromptPatterns::default();
        assert_eq!(patterns.classify(b"HOST login: "), Some(PromptKind::Login));
        assert_eq!(patterns.classify(b"Password: "), Some(PromptKind::Password));
        assert_eq!(patterns.classify(b"root@box:/# "), Some(PromptKind::Banner));
        assert_eq!(patterns.classify(b"Welcome "), None);

        // A fragment matching both login and banner resolves to login.
        let ambiguous = b"root@box:/# box login: ";
        assert_eq!(patterns.classify(ambiguous), Some(PromptKind::Login));
    }

    #[test]
    fn test_regex_prompt_matcher() {
        let pattern = Regex::new(r"router#").unwrap();
        assert_eq!(pattern.find_match(b"output\nrouter# "), Some(14));
        assert!(!PromptMatcher::is_match(&pattern, b"router> "));
    }

    #[test]
    fn test_custom_patterns() {
        let patterns = PromptPatterns::default()
            .with_login(r"Username:")
            .unwrap()
            .with_banner(r"[>#]\s*$")
            .unwrap();
        assert_eq!(patterns.classify(b"Username: "), Some(PromptKind::Login));
        assert_eq!(patterns.classify(b"Router# "), Some(PromptKind::Banner));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PromptPatterns::default().with_password(r"(unclosed").is_err());
    }

    #[test]
    fn test_config_from_json_with_defaults() {
        let config: PromptPatternsConfig =
            serde_json::from_str(r#"{"banner": "[>#] $"}"#).unwrap();
        assert_eq!(config.login, DEFAULT_LOGIN_PATTERN);
        assert_eq!(config.password, DEFAULT_PASSWORD_PATTERN);

        let patterns = config.compile().unwrap();
        assert!(patterns.banner().is_match(b"switch> "));
    }

    #[test]
    fn test_config_roundtrip_default() {
        let json = serde_json::to_string(&PromptPatternsConfig::default()).unwrap();
        let back: PromptPatternsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PromptPatternsConfig::default());
    }
}
