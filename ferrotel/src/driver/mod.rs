//! High-level driver for remote shell interaction.
//!
//! The driver layer provides the main API: logging in, sending commands
//! and running interactive sequences on a Telnet session.

mod builder;
mod command;
mod handshake;
mod interactive;
pub(crate) mod response;
mod session;

pub use builder::SessionBuilder;
pub use command::strip_prompt;
pub use handshake::HandshakePolicy;
pub use interactive::{
    InteractiveBuilder, InteractiveBuilderWithInput, InteractiveEvent, InteractiveResult,
    InteractiveStep,
};
pub use response::Response;
pub use session::TelnetSession;

use std::future::Future;

use crate::error::Result;

/// Trait for remote shell drivers.
pub trait Driver: Send + Sync {
    /// Open the connection and wait until the shell is ready.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Close the connection.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Run `name` with `args` and return the output without the shell prompt.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use ferrotel::driver::Driver;
    ///
    /// # async fn example(driver: &mut impl Driver) -> Result<(), ferrotel::Error> {
    /// let output = driver.execute("ip", &["link", "show"]).await?;
    /// println!("{}", String::from_utf8_lossy(&output));
    /// # Ok(())
    /// # }
    /// ```
    fn execute(
        &mut self,
        name: &str,
        args: &[&str],
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Send a command line and wait for the prompt.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Check if the driver is connected.
    fn is_open(&self) -> bool;
}
