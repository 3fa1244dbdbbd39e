//! Channel layer for control-sequence stripping and prompt scanning.
//!
//! Bytes flow upward: the [`TelnetChannel`] removes Telnet control
//! sequences and offers a clean byte and delimited reads, the scanner grows
//! a [`LineBuffer`] word by word and hands each line fragment to a
//! [`ScanPolicy`].

mod buffer;
mod patterns;
pub mod protocol;
mod scanner;
mod telnet;

pub use buffer::LineBuffer;
pub use patterns::{
    DEFAULT_BANNER_PATTERN, DEFAULT_LOGIN_PATTERN, DEFAULT_PASSWORD_PATTERN, PromptKind,
    PromptMatcher, PromptPatterns, PromptPatternsConfig,
};
pub use scanner::{ScanAction, ScanPolicy, UntilPrompt};
pub use telnet::TelnetChannel;
