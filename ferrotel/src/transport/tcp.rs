//! TCP connection setup.

use log::debug;
use tokio::net::TcpStream;

use super::config::TelnetConfig;
use crate::error::{Result, TransportError};

/// Connect to the Telnet server described by `config`.
///
/// The whole attempt (resolution included) is bounded by `config.timeout`.
pub async fn connect(config: &TelnetConfig) -> Result<TcpStream> {
    debug!("Trying connect to {}", config.socket_addr());

    let stream = tokio::time::timeout(
        config.timeout,
        TcpStream::connect((config.host.as_str(), config.port)),
    )
    .await
    .map_err(|_| TransportError::Timeout(config.timeout))?
    .map_err(|source| TransportError::ConnectionFailed {
        host: config.host.clone(),
        port: config.port,
        source,
    })?;

    // Prompts are short writes; don't let Nagle hold them back.
    stream.set_nodelay(true).map_err(TransportError::Io)?;

    debug!("Connected to {}", config.socket_addr());
    Ok(stream)
}
