//! # Ferrotel
//!
//! Async Telnet CLI scraper library for network device automation.
//!
//! Ferrotel logs into a remote shell over Telnet, runs commands and returns
//! their output, for routers, embedded boxes and anything else that only
//! speaks Telnet.
//!
//! ## Features
//!
//! - Async Telnet sessions on tokio
//! - Transparent removal of Telnet negotiation and subnegotiation sequences
//! - Prompt detection on partial lines (no trailing newline needed)
//! - Automatic login/password handshake
//! - Pluggable scan policies for custom prompts and interactive commands
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferrotel::{Driver, SessionBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ferrotel::Error> {
//!     let mut session = SessionBuilder::new("192.168.1.1")
//!         .username("admin")
//!         .password("secret")
//!         .build()?;
//!
//!     session.open().await?;
//!
//!     let response = session.send_command("uname -a").await?;
//!     println!("{}", response.result);
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod transport;

// Re-export main types for convenience
pub use channel::{LineBuffer, PromptPatterns, PromptPatternsConfig, ScanAction, ScanPolicy};
pub use driver::{
    Driver, InteractiveBuilder, InteractiveEvent, InteractiveResult, Response, SessionBuilder,
    TelnetSession,
};
pub use error::Error;
pub use transport::TelnetConfig;
