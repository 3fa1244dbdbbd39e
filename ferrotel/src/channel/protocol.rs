//! Telnet control-sequence byte values (RFC 854).

/// Interpret As Command: introduces every control sequence.
pub const IAC: u8 = 255;

/// Subnegotiation of the indicated option follows.
pub const SB: u8 = 250;

/// End of subnegotiation parameters.
pub const SE: u8 = 240;

/// Sender wants to begin performing an option.
pub const WILL: u8 = 251;

/// Sender refuses to perform, or stops performing, an option.
pub const WONT: u8 = 252;

/// Sender asks the receiver to perform an option.
pub const DO: u8 = 253;

/// Sender demands the receiver stop performing an option.
pub const DONT: u8 = 254;

/// Line terminator used on the wire.
pub const CRLF: &[u8] = b"\r\n";

/// Human readable name of a command byte, for trace logs.
pub(crate) fn command_name(byte: u8) -> &'static str {
    match byte {
        WILL => "WILL",
        WONT => "WONT",
        DO => "DO",
        DONT => "DONT",
        SB => "SB",
        SE => "SE",
        IAC => "IAC",
        _ => "?",
    }
}
