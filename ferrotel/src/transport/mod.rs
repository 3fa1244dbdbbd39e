//! TCP transport layer.
//!
//! This module provides the low-level connection setup: resolving the
//! target, connecting with a timeout and handing the raw stream to the
//! channel layer.

pub mod config;
mod tcp;

pub use config::TelnetConfig;
pub use tcp::connect;
