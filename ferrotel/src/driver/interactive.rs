//! Interactive command support for handling prompts that require user input.
//!
//! Some commands ask a question before they finish:
//! - `reboot` on a router asks "Are you sure? (y/n)"
//! - `passwd` asks for the old and the new password
//! - `rm -i` asks for every file
//!
//! The `send_interactive` method handles these by sending a sequence of
//! inputs, each waiting for a specific pattern on the current line before
//! proceeding.

use std::time::Duration;

use regex::bytes::Regex;

/// Placeholder shown instead of hidden input.
pub(crate) const HIDDEN_INPUT: &str = "********";

/// An event in an interactive command sequence.
///
/// Each event consists of:
/// - `input`: The text to send (command or response like "y" or "n")
/// - `pattern`: The pattern to wait for after sending the input
/// - `hidden`: Whether the input should be hidden in logs (for passwords)
///
/// # Example
///
/// ```rust
/// use ferrotel::driver::InteractiveEvent;
///
/// let events = vec![
///     InteractiveEvent::new("reboot", r"\(y/n\)").unwrap(),
///     InteractiveEvent::new("y", r"[$#]").unwrap(),
/// ];
/// assert_eq!(events.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct InteractiveEvent {
    /// The input to send (command or response).
    pub input: String,

    /// Pattern to wait for after sending input.
    pub pattern: Regex,

    /// Whether this input should be hidden in logs (e.g., passwords).
    pub hidden: bool,
}

impl InteractiveEvent {
    /// Create a new interactive event.
    pub fn new(input: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            input: input.into(),
            pattern: Regex::new(pattern)?,
            hidden: false,
        })
    }

    /// Create an event for hidden input (like passwords).
    ///
    /// The input will not be logged.
    pub fn hidden(input: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(input, pattern)?.with_hidden(true))
    }

    /// Mark this event's input as hidden (for logging).
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The input as it may appear in logs and results.
    pub(crate) fn display_input(&self) -> &str {
        if self.hidden {
            HIDDEN_INPUT
        } else {
            &self.input
        }
    }
}

/// Result of an interactive command sequence.
#[derive(Debug, Clone)]
pub struct InteractiveResult {
    /// Results from each step in the sequence.
    pub steps: Vec<InteractiveStep>,

    /// Total time for the entire sequence.
    pub elapsed: Duration,
}

impl InteractiveResult {
    /// Create a new interactive result.
    pub fn new(steps: Vec<InteractiveStep>, elapsed: Duration) -> Self {
        Self { steps, elapsed }
    }

    /// Get the final output (from the last step).
    pub fn final_output(&self) -> Option<&str> {
        self.steps.last().map(|s| s.output.as_str())
    }

    /// Get all outputs concatenated.
    pub fn full_output(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.output.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Result of a single step in an interactive sequence.
#[derive(Debug, Clone)]
pub struct InteractiveStep {
    /// The input that was sent (masked if hidden).
    pub input: String,

    /// The output received after sending input, up to the matched pattern.
    pub output: String,

    /// Time taken for this step.
    pub elapsed: Duration,
}

impl InteractiveStep {
    /// Create a step.
    pub fn new(input: impl Into<String>, output: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            elapsed,
        }
    }
}

/// Builder for creating interactive command sequences.
///
/// # Example
///
/// ```rust
/// use ferrotel::driver::InteractiveBuilder;
///
/// let events = InteractiveBuilder::new()
///     .send("passwd")
///     .expect(r"Current password:")
///     .send_hidden("old-secret")
///     .expect(r"New password:")
///     .send_hidden("new-secret")
///     .expect(r"[$#]")
///     .build()
///     .unwrap();
/// assert_eq!(events.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct InteractiveBuilder {
    events: Vec<(String, String, bool)>,
}

impl InteractiveBuilder {
    /// Create a new interactive builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input to send.
    ///
    /// Must be followed by `expect()` to specify what to wait for.
    pub fn send(self, input: impl Into<String>) -> InteractiveBuilderWithInput {
        InteractiveBuilderWithInput {
            builder: self,
            input: input.into(),
            hidden: false,
        }
    }

    /// Add a hidden input (like a password).
    pub fn send_hidden(self, input: impl Into<String>) -> InteractiveBuilderWithInput {
        InteractiveBuilderWithInput {
            builder: self,
            input: input.into(),
            hidden: true,
        }
    }

    /// Compile the list of interactive events.
    pub fn build(self) -> Result<Vec<InteractiveEvent>, regex::Error> {
        self.events
            .into_iter()
            .map(|(input, pattern, hidden)| {
                InteractiveEvent::new(input, &pattern).map(|event| event.with_hidden(hidden))
            })
            .collect()
    }
}

/// Intermediate state for the builder after `send()` is called.
#[derive(Debug)]
pub struct InteractiveBuilderWithInput {
    builder: InteractiveBuilder,
    input: String,
    hidden: bool,
}

impl InteractiveBuilderWithInput {
    /// Specify the pattern to wait for after sending the input.
    pub fn expect(mut self, pattern: impl Into<String>) -> InteractiveBuilder {
        self.builder
            .events
            .push((self.input, pattern.into(), self.hidden));
        self.builder
    }
}
