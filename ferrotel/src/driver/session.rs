//! Telnet session: login handshake, command execution and raw scanning.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use super::Driver;
use super::command::{command_line, strip_prompt};
use super::handshake::HandshakePolicy;
use super::interactive::{InteractiveEvent, InteractiveResult, InteractiveStep};
use super::response::Response;
use crate::channel::{LineBuffer, PromptPatterns, ScanPolicy, TelnetChannel, UntilPrompt};
use crate::error::{DriverError, Result};
use crate::transport::{self, TelnetConfig};

/// A Telnet session with a remote shell.
///
/// The session handles:
/// - Connecting and answering the login/password prompts
/// - Command execution with shell prompt detection
/// - Custom scans through [`ScanPolicy`] for anything else
///
/// One operation runs at a time; every method takes `&mut self`.
pub struct TelnetSession<S = TcpStream> {
    /// Connection configuration and credentials.
    config: TelnetConfig,

    /// Prompts recognized by the handshake and the command executor.
    patterns: PromptPatterns,

    /// Byte channel (None when disconnected).
    channel: Option<TelnetChannel<S>>,
}

impl<S> fmt::Debug for TelnetSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelnetSession")
            .field("config", &self.config)
            .field("patterns", &self.patterns)
            .field("open", &self.is_open())
            .finish()
    }
}

impl<S> TelnetSession<S> {
    /// Create a disconnected session.
    pub fn new(config: TelnetConfig, patterns: PromptPatterns) -> Self {
        Self {
            config,
            patterns,
            channel: None,
        }
    }

    /// Get the connection configuration.
    pub fn config(&self) -> &TelnetConfig {
        &self.config
    }

    /// Get the prompt patterns.
    pub fn patterns(&self) -> &PromptPatterns {
        &self.patterns
    }

    /// Check if a stream is attached.
    pub fn is_open(&self) -> bool {
        self.channel.is_some()
    }
}

impl<S: AsyncRead + AsyncWrite> TelnetSession<S> {
    /// Attach an already connected stream without running the handshake.
    pub fn attach(&mut self, stream: S) -> Result<()> {
        if self.channel.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }
        self.channel = Some(TelnetChannel::new(stream, self.config.timeout));
        Ok(())
    }

    /// Set the timeout used by every following operation.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
        if let Some(channel) = self.channel.as_mut() {
            channel.set_timeout(timeout);
        }
    }

    fn channel_mut(&mut self) -> Result<&mut TelnetChannel<S>> {
        Ok(self.channel.as_mut().ok_or(DriverError::NotConnected)?)
    }

    /// Wait for the shell prompt, logging in on the way if asked to.
    pub async fn await_ready(&mut self) -> Result<()> {
        let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;
        let mut policy =
            HandshakePolicy::new(&self.patterns, &self.config.username, &self.config.password);

        debug!("Waiting for the first banner");
        let mut output = LineBuffer::new();
        let deadline = channel.deadline();
        channel
            .read_until_prompt(&mut output, &mut policy, deadline)
            .await?;

        info!("Session ready on {}", self.config.socket_addr());
        Ok(())
    }

    /// Run `name` with `args` and return its output without the shell prompt.
    pub async fn execute(&mut self, name: &str, args: &[&str]) -> Result<Vec<u8>> {
        let line = command_line(name, args);
        let (output, _) = self.run(&line).await?;
        Ok(output)
    }

    /// Send a command line as-is and return a [`Response`].
    pub async fn send_command(&mut self, command: &str) -> Result<Response> {
        let start = Instant::now();
        let (output, raw) = self.run(command).await?;
        Ok(Response::new(
            command,
            String::from_utf8_lossy(&output),
            raw,
            start.elapsed(),
        ))
    }

    /// Send multiple commands sequentially.
    pub async fn send_commands(&mut self, commands: &[&str]) -> Result<Vec<Response>> {
        let mut responses = Vec::with_capacity(commands.len());
        for command in commands {
            responses.push(self.send_command(command).await?);
        }
        Ok(responses)
    }

    /// Write `line` and capture everything up to the shell prompt.
    ///
    /// Returns the cleaned output and the raw capture.
    async fn run(&mut self, line: &str) -> Result<(Vec<u8>, Vec<u8>)> {
        let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;

        let stale = channel.discard_buffered();
        if stale > 0 {
            trace!("Discarded {} stale bytes", stale);
        }

        let deadline = channel.deadline();
        debug!("Send command: {}", line);
        channel.write_line(line.as_bytes(), deadline).await?;

        scan_banner(channel, &self.patterns, deadline).await
    }

    /// Read up to the shell prompt and return the output without it.
    pub async fn read_until_banner(&mut self) -> Result<Vec<u8>> {
        let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;
        let deadline = channel.deadline();
        let (cleaned, _) = scan_banner(channel, &self.patterns, deadline).await?;
        Ok(cleaned)
    }

    /// Run an interactive sequence.
    ///
    /// Each event's input is written, then the scan waits for the event's
    /// pattern on the current line. Every step gets its own deadline.
    pub async fn send_interactive(
        &mut self,
        events: &[InteractiveEvent],
    ) -> Result<InteractiveResult> {
        let start = Instant::now();
        let channel = self.channel_mut()?;
        channel.discard_buffered();

        let mut steps = Vec::with_capacity(events.len());
        for event in events {
            let step_start = Instant::now();
            let deadline = channel.deadline();

            debug!("Send interactive input: {}", event.display_input());
            channel.write_line(event.input.as_bytes(), deadline).await?;

            let mut output = LineBuffer::new();
            channel
                .read_until_prompt(&mut output, &mut UntilPrompt(&event.pattern), deadline)
                .await?;

            steps.push(InteractiveStep::new(
                event.display_input(),
                String::from_utf8_lossy(output.as_slice()),
                step_start.elapsed(),
            ));
        }

        Ok(InteractiveResult::new(steps, start.elapsed()))
    }

    /// Read until `policy` stops the scan and return the whole capture.
    pub async fn read_until_prompt<P>(&mut self, policy: &mut P) -> Result<Vec<u8>>
    where
        P: ScanPolicy + ?Sized,
    {
        let mut output = LineBuffer::new();
        self.read_until_prompt_into(&mut output, policy).await?;
        Ok(output.into_inner())
    }

    /// Like [`read_until_prompt`](Self::read_until_prompt), but into a
    /// caller-owned buffer that keeps the partial output on error.
    pub async fn read_until_prompt_into<P>(
        &mut self,
        output: &mut LineBuffer,
        policy: &mut P,
    ) -> Result<()>
    where
        P: ScanPolicy + ?Sized,
    {
        let channel = self.channel_mut()?;
        let deadline = channel.deadline();
        channel.read_until_prompt(output, policy, deadline).await
    }

    /// Read one byte of session data.
    pub async fn read_byte(&mut self) -> Result<u8> {
        let channel = self.channel_mut()?;
        let deadline = channel.deadline();
        channel.read_byte(deadline).await
    }

    /// Append session data to `buf` up to and including `delim`.
    pub async fn read_until(&mut self, buf: &mut Vec<u8>, delim: u8) -> Result<usize> {
        let channel = self.channel_mut()?;
        let deadline = channel.deadline();
        channel.read_until(buf, delim, deadline).await
    }

    /// Send raw bytes to the server.
    pub async fn write(&mut self, data: &[u8]) -> Result<()> {
        let channel = self.channel_mut()?;
        let deadline = channel.deadline();
        channel.write(data, deadline).await
    }

    /// Shut the connection down. Closing a closed session is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut channel) = self.channel.take() {
            debug!("Closing connection to {}", self.config.socket_addr());
            channel.shutdown().await?;
        }
        Ok(())
    }
}

/// Scan up to the banner. Returns the stripped output and the raw capture.
async fn scan_banner<S: AsyncRead + AsyncWrite>(
    channel: &mut TelnetChannel<S>,
    patterns: &PromptPatterns,
    deadline: tokio::time::Instant,
) -> Result<(Vec<u8>, Vec<u8>)> {
    let banner = patterns.banner();
    let mut output = LineBuffer::new();
    channel
        .read_until_prompt(&mut output, &mut UntilPrompt(banner), deadline)
        .await?;

    let raw = output.into_inner();
    let cleaned = strip_prompt(&raw, banner);
    debug!("Received data with size = {}", cleaned.len());
    Ok((cleaned, raw))
}

impl TelnetSession<TcpStream> {
    /// Connect over TCP and run the login handshake.
    pub async fn open(&mut self) -> Result<()> {
        if self.channel.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let stream = transport::connect(&self.config).await?;
        self.attach(stream)?;
        self.await_ready().await
    }
}

impl Driver for TelnetSession<TcpStream> {
    async fn open(&mut self) -> Result<()> {
        TelnetSession::open(self).await
    }

    async fn close(&mut self) -> Result<()> {
        TelnetSession::close(self).await
    }

    async fn execute(&mut self, name: &str, args: &[&str]) -> Result<Vec<u8>> {
        TelnetSession::execute(self, name, args).await
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        TelnetSession::send_command(self, command).await
    }

    fn is_open(&self) -> bool {
        TelnetSession::is_open(self)
    }
}
