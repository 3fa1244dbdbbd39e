//! Telnet connection configuration.

use std::time::Duration;

use secrecy::SecretString;

/// Default Telnet port.
pub const DEFAULT_PORT: u16 = 23;

/// Default inactivity timeout for connecting and for each read operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Telnet connection configuration.
#[derive(Debug)]
pub struct TelnetConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// Telnet port (default: 23).
    pub port: u16,

    /// Login answered to the login prompt.
    pub username: String,

    /// Password answered to the password prompt.
    pub password: SecretString,

    /// Connection timeout, also the read deadline of every operation.
    pub timeout: Duration,
}

impl TelnetConfig {
    /// Create a configuration for `host` with default port and timeout
    /// and empty credentials.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: SecretString::from(String::new()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TelnetConfig::new("192.168.1.1");
        assert_eq!(config.port, 23);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.socket_addr(), "192.168.1.1:23");
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let mut config = TelnetConfig::new("router");
        config.password = SecretString::from("hunter2".to_string());
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
