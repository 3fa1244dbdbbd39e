//! Error types for ferrotel.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for ferrotel operations.
#[derive(Error, Debug)]
pub enum Error {
    /// TCP transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

impl Error {
    /// Whether this error means a deadline elapsed before the expected
    /// data (or the connection) showed up.
    ///
    /// Callers use this to tell "the prompt never appeared" apart from a
    /// broken connection.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Channel(ChannelError::PatternTimeout(_))
                | Error::Transport(TransportError::Timeout(_))
        )
    }
}

/// Transport layer errors (TCP connection, raw reads and writes).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Connection was closed by the peer
    #[error("Connection disconnected")]
    Disconnected,

    /// Connecting timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TransportError {
    /// Classify an I/O error from the byte stream.
    ///
    /// EOF in the middle of a read means the remote end went away.
    pub(crate) fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted => TransportError::Disconnected,
            _ => TransportError::Io(err),
        }
    }
}

/// Channel layer errors (prompt scanning, pattern compilation).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// No qualifying byte or prompt arrived before the read deadline
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(Duration),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Driver layer errors (session state, configuration).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Session not connected
    #[error("Session not connected - call open() first")]
    NotConnected,

    /// Session already connected
    #[error("Session already connected")]
    AlreadyConnected,

    /// Invalid configuration in the session builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias using ferrotel's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_timeout() {
        let err: Error = ChannelError::PatternTimeout(Duration::from_secs(1)).into();
        assert!(err.is_timeout());

        let err: Error = TransportError::Timeout(Duration::from_secs(1)).into();
        assert!(err.is_timeout());

        let err: Error = TransportError::Disconnected.into();
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_eof_maps_to_disconnected() {
        let err = TransportError::from_io(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(matches!(err, TransportError::Disconnected));

        let err = TransportError::from_io(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, TransportError::Io(_)));
    }
}
