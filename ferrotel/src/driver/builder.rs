//! Builder for creating Telnet sessions.

use std::time::Duration;

use secrecy::SecretString;

use super::session::TelnetSession;
use crate::channel::PromptPatterns;
use crate::error::{ChannelError, DriverError, Result};
use crate::transport::TelnetConfig;
use crate::transport::config::{DEFAULT_PORT, DEFAULT_TIMEOUT};

/// Builder for constructing Telnet sessions.
///
/// # Example
///
/// ```rust,no_run
/// use ferrotel::driver::SessionBuilder;
///
/// # async fn example() -> Result<(), ferrotel::Error> {
/// let mut session = SessionBuilder::new("192.168.1.1")
///     .username("admin")
///     .password("secret")
///     .build()?;
///
/// session.open().await?;
/// let output = session.execute("uname", &["-a"]).await?;
/// println!("{}", String::from_utf8_lossy(&output));
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder {
    host: String,
    port: u16,
    username: String,
    password: SecretString,
    timeout: Duration,
    patterns: PromptPatterns,
    login_pattern: Option<String>,
    password_pattern: Option<String>,
    banner_pattern: Option<String>,
}

impl SessionBuilder {
    /// Create a new session builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: SecretString::from(String::new()),
            timeout: DEFAULT_TIMEOUT,
            patterns: PromptPatterns::default(),
            login_pattern: None,
            password_pattern: None,
            banner_pattern: None,
        }
    }

    /// Set the Telnet port (default: 23).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the login sent at the login prompt.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set the password sent at the password prompt.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = SecretString::from(password.into());
        self
    }

    /// Set the connection and read timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a complete prompt pattern set.
    pub fn patterns(mut self, patterns: PromptPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Override the login prompt regex.
    pub fn login_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.login_pattern = Some(pattern.into());
        self
    }

    /// Override the password prompt regex.
    pub fn password_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.password_pattern = Some(pattern.into());
        self
    }

    /// Override the shell prompt regex.
    pub fn banner_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.banner_pattern = Some(pattern.into());
        self
    }

    /// Build the session.
    ///
    /// This creates the session but does not connect. Call `open()` on the
    /// returned session to establish the connection.
    pub fn build(self) -> Result<TelnetSession> {
        if self.host.trim().is_empty() {
            return Err(DriverError::InvalidConfig {
                message: "Host is required".to_string(),
            }
            .into());
        }

        let mut patterns = self.patterns;
        if let Some(pattern) = &self.login_pattern {
            patterns = patterns
                .with_login(pattern)
                .map_err(ChannelError::InvalidPattern)?;
        }
        if let Some(pattern) = &self.password_pattern {
            patterns = patterns
                .with_password(pattern)
                .map_err(ChannelError::InvalidPattern)?;
        }
        if let Some(pattern) = &self.banner_pattern {
            patterns = patterns
                .with_banner(pattern)
                .map_err(ChannelError::InvalidPattern)?;
        }

        let config = TelnetConfig {
            host: self.host,
            port: self.port,
            username: self.username,
            password: self.password,
            timeout: self.timeout,
        };

        Ok(TelnetSession::new(config, patterns))
    }
}
