//! Command line formatting and output cleanup.

use regex::bytes::Regex;

/// Build the line sent for `name` with `args`.
///
/// The name and the joined arguments are always separated by one space,
/// even when there are no arguments.
pub(crate) fn command_line(name: &str, args: &[&str]) -> String {
    format!("{} {}", name, args.join(" "))
}

/// Remove every shell prompt from captured output and trim surrounding
/// spaces.
///
/// Only the space character is trimmed; line endings stay.
pub fn strip_prompt(output: &[u8], prompt: &Regex) -> Vec<u8> {
    let stripped = prompt.replace_all(output, &b""[..]);
    trim_spaces(&stripped).to_vec()
}

fn trim_spaces(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|&b| b != b' ')
        .unwrap_or(data.len());
    let end = data
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(start, |i| i + 1);
    &data[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::PromptPatterns;

    #[test]
    fn test_command_line() {
        assert_eq!(command_line("ip", &["link", "show"]), "ip link show");
        assert_eq!(command_line("uptime", &[]), "uptime ");
    }

    #[test]
    fn test_strip_trailing_prompt() {
        let patterns = PromptPatterns::default();
        let output = b"1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536\r\n    link/loopback 00:00:00:00:00:00\r\nadmin@RT-N14U:/tmp/home/root# ";
        assert_eq!(
            strip_prompt(output, patterns.banner()),
            b"1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536\r\n    link/loopback 00:00:00:00:00:00\r\n"
        );
    }

    #[test]
    fn test_strip_every_prompt_occurrence() {
        let patterns = PromptPatterns::default();
        let output = b"  u@h:~$ echo\r\nhi\r\nu@h:~$ ";
        assert_eq!(strip_prompt(output, patterns.banner()), b"echo\r\nhi\r\n");
    }

    #[test]
    fn test_trim_spaces() {
        assert_eq!(trim_spaces(b"  a b  "), b"a b");
        assert_eq!(trim_spaces(b"    "), b"");
        assert_eq!(trim_spaces(b""), b"");
        assert_eq!(trim_spaces(b"\r\nx\r\n"), b"\r\nx\r\n");
    }
}
