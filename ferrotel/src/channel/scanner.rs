//! Prompt scanner: grows the output word by word and asks a policy about
//! the current line after every word.
//!
//! Words end at a space, so a prompt without a trailing newline (`login: `,
//! `Password: `, `user@host:~$ `) is seen as soon as its last space
//! arrives.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::Instant;

use super::buffer::LineBuffer;
use super::patterns::PromptMatcher;
use super::telnet::TelnetChannel;
use crate::error::Result;

/// What the scanner should do after a line fragment was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanAction {
    /// Keep reading.
    Continue,
    /// Write these bytes followed by CRLF, then keep reading.
    Reply(Vec<u8>),
    /// Stop; the output is complete.
    Stop,
}

/// Decides, fragment by fragment, when a scan is finished.
pub trait ScanPolicy {
    /// Look at the current line fragment.
    fn classify(&mut self, fragment: &[u8]) -> ScanAction;
}

/// Any `FnMut(&[u8]) -> bool` is a policy that stops when it returns `true`.
impl<F> ScanPolicy for F
where
    F: FnMut(&[u8]) -> bool,
{
    fn classify(&mut self, fragment: &[u8]) -> ScanAction {
        if self(fragment) {
            ScanAction::Stop
        } else {
            ScanAction::Continue
        }
    }
}

/// Policy that stops once the fragment matches a prompt.
#[derive(Debug)]
pub struct UntilPrompt<'a, M: ?Sized>(pub &'a M);

impl<M: PromptMatcher + ?Sized> ScanPolicy for UntilPrompt<'_, M> {
    fn classify(&mut self, fragment: &[u8]) -> ScanAction {
        if self.0.is_match(fragment) {
            ScanAction::Stop
        } else {
            ScanAction::Continue
        }
    }
}

impl<S: AsyncRead + AsyncWrite> TelnetChannel<S> {
    /// Read into `output` until `policy` says stop.
    ///
    /// The output is not trimmed: the fragment that stopped the scan is
    /// still at its end. On error `output` keeps everything read so far.
    pub async fn read_until_prompt<P>(
        &mut self,
        output: &mut LineBuffer,
        policy: &mut P,
        deadline: Instant,
    ) -> Result<()>
    where
        P: ScanPolicy + ?Sized,
    {
        loop {
            self.read_until(output.buffer_mut(), b' ', deadline).await?;
            output.update_line_start();

            match policy.classify(output.fragment()) {
                ScanAction::Continue => {}
                ScanAction::Reply(line) => self.write_line(&line, deadline).await?,
                ScanAction::Stop => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use regex::bytes::Regex;
    use tokio_test::io::{Builder, Mock};

    const PROMPT: &[u8] = b"Enter your username, please: ";
    const TIMEOUT: Duration = Duration::from_millis(100);

    async fn scan<P: ScanPolicy>(mock: Mock, policy: &mut P) -> (Result<()>, Vec<u8>) {
        let mut channel = TelnetChannel::new(mock, TIMEOUT);
        let mut output = LineBuffer::new();
        let deadline = channel.deadline();
        let result = channel.read_until_prompt(&mut output, policy, deadline).await;
        (result, output.into_inner())
    }

    fn exact_prompt(fragment: &[u8]) -> bool {
        fragment == PROMPT
    }

    #[tokio::test]
    async fn test_single_packet() {
        let (result, output) = scan(Builder::new().read(PROMPT).build(), &mut exact_prompt).await;
        result.unwrap();
        assert_eq!(output, PROMPT);
    }

    #[tokio::test]
    async fn test_some_packets() {
        let mock = Builder::new()
            .read(b"Enter your u")
            .read(b"sernam")
            .read(b"e, please: ")
            .build();
        let (result, output) = scan(mock, &mut exact_prompt).await;
        result.unwrap();
        assert_eq!(output, PROMPT);
    }

    #[tokio::test]
    async fn test_chunking_does_not_change_output() {
        let text: &[u8] = b"motd line\r\nsecond line\r\nEnter your username, please: ";

        let mut builder = Builder::new();
        for byte in text {
            builder.read(std::slice::from_ref(byte));
        }
        let (result, byte_by_byte) = scan(builder.build(), &mut exact_prompt).await;
        result.unwrap();

        let (result, whole) = scan(Builder::new().read(text).build(), &mut exact_prompt).await;
        result.unwrap();

        assert_eq!(byte_by_byte, whole);
        assert_eq!(whole, text);
    }

    #[tokio::test]
    async fn test_fragments_start_after_last_crlf() {
        let mut seen = Vec::new();
        let mut policy = |fragment: &[u8]| {
            seen.push(fragment.to_vec());
            fragment.ends_with(b"$ ")
        };

        let mock = Builder::new().read(b"a b\r\nc $ ").build();
        let (result, _) = scan(mock, &mut policy).await;
        result.unwrap();

        assert_eq!(seen, vec![b"a ".to_vec(), b"c ".to_vec(), b"c $ ".to_vec()]);
    }

    #[tokio::test]
    async fn test_until_prompt_policy() {
        let banner = Regex::new(r"[\w-]+@[\w-]+:[\w/~-]+[$#]").unwrap();
        let mock = Builder::new()
            .read(b"total 0\r\n")
            .read(b"user@host:~$ ")
            .build();
        let (result, output) = scan(mock, &mut UntilPrompt(&banner)).await;
        result.unwrap();
        assert_eq!(output, b"total 0\r\nuser@host:~$ ");
    }

    #[tokio::test]
    async fn test_reply_is_written() {
        let mut replied = false;
        let mut policy = |fragment: &[u8]| -> ScanAction {
            if fragment == b"Continue? " && !replied {
                replied = true;
                ScanAction::Reply(b"y".to_vec())
            } else if fragment == b"done " {
                ScanAction::Stop
            } else {
                ScanAction::Continue
            }
        };

        struct Adapter<F>(F);
        impl<F: FnMut(&[u8]) -> ScanAction> ScanPolicy for Adapter<F> {
            fn classify(&mut self, fragment: &[u8]) -> ScanAction {
                (self.0)(fragment)
            }
        }

        let mock = Builder::new()
            .read(b"Continue? ")
            .write(b"y\r\n")
            .read(b"\r\ndone ")
            .build();
        let (result, output) = scan(mock, &mut Adapter(&mut policy)).await;
        result.unwrap();
        assert_eq!(output, b"Continue? \r\ndone ");
    }

    #[tokio::test]
    async fn test_error_keeps_partial_output() {
        let mock = Builder::new().read(b"Enter your user").build();
        let (result, output) = scan(mock, &mut exact_prompt).await;
        assert!(result.is_err());
        assert_eq!(output, b"Enter your user");
    }

    #[tokio::test]
    async fn test_never_matching_stream_times_out() {
        use tokio::io::AsyncWriteExt;

        let (client, mut server) = tokio::io::duplex(1024);
        let mut channel = TelnetChannel::new(client, TIMEOUT);
        server.write_all(b"no prompt here ").await.unwrap();

        let mut output = LineBuffer::new();
        let deadline = channel.deadline();
        let err = channel
            .read_until_prompt(&mut output, &mut exact_prompt, deadline)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(output.as_slice(), b"no prompt here ");
    }
}
