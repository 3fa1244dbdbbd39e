//! Login handshake run right after connecting.
//!
//! The handshake answers the login and password prompts with the
//! configured credentials and finishes once the shell prompt shows up.
//! Wrong credentials are not detected: the server simply asks again and
//! the scan goes on until a shell prompt appears or the deadline passes.

use log::debug;
use secrecy::{ExposeSecret, SecretString};

use crate::channel::{PromptKind, PromptPatterns, ScanAction, ScanPolicy};

/// Scan policy for the initial login.
pub struct HandshakePolicy<'a> {
    patterns: &'a PromptPatterns,
    username: &'a str,
    password: &'a SecretString,
}

impl<'a> HandshakePolicy<'a> {
    /// Create a policy answering with the given credentials.
    pub fn new(
        patterns: &'a PromptPatterns,
        username: &'a str,
        password: &'a SecretString,
    ) -> Self {
        Self {
            patterns,
            username,
            password,
        }
    }
}

impl ScanPolicy for HandshakePolicy<'_> {
    fn classify(&mut self, fragment: &[u8]) -> ScanAction {
        match self.patterns.classify(fragment) {
            Some(PromptKind::Login) => {
                debug!("Found login prompt");
                ScanAction::Reply(self.username.as_bytes().to_vec())
            }
            Some(PromptKind::Password) => {
                debug!("Found password prompt");
                ScanAction::Reply(self.password.expose_secret().as_bytes().to_vec())
            }
            Some(PromptKind::Banner) => {
                debug!("Found shell prompt");
                ScanAction::Stop
            }
            None => ScanAction::Continue,
        }
    }
}
