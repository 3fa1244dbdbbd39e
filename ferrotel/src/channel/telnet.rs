//! Telnet byte channel: control-sequence interpreter and delimited reader.
//!
//! The channel owns both halves of the connection. Reads go through a
//! buffered reader so the interpreter can peek at the byte after an
//! `IAC`. Writes go straight to the write half, so an aborted write leaves
//! nothing queued for the next one.
//!
//! Negotiation is never answered. `WILL`/`WONT`/`DO`/`DONT` triples and
//! `SB ... IAC SE` blocks are dropped from the data stream and nothing
//! else is done with them.

use std::time::Duration;

use bytes::BytesMut;
use log::trace;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf,
    WriteHalf,
};
use tokio::time::{Instant, timeout_at};

use super::protocol::{CRLF, DO, DONT, IAC, SB, SE, WILL, WONT, command_name};
use crate::error::{ChannelError, Result, TransportError};

/// A Telnet connection seen as a stream of clean data bytes.
pub struct TelnetChannel<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    timeout: Duration,
}

impl<S: AsyncRead + AsyncWrite> TelnetChannel<S> {
    /// Wrap a connected stream.
    ///
    /// `timeout` bounds every operation started through [`deadline`](Self::deadline).
    pub fn new(stream: S, timeout: Duration) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            timeout,
        }
    }

    /// Get the operation timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the operation timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Deadline for an operation starting now.
    pub fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }

    /// Read one raw byte from the wire.
    async fn next_raw(&mut self, deadline: Instant) -> Result<u8> {
        match timeout_at(deadline, self.reader.read_u8()).await {
            Ok(Ok(byte)) => Ok(byte),
            Ok(Err(e)) => Err(TransportError::from_io(e).into()),
            Err(_) => Err(ChannelError::PatternTimeout(self.timeout).into()),
        }
    }

    /// Look at the next raw byte without consuming it.
    async fn peek_raw(&mut self, deadline: Instant) -> Result<u8> {
        let timeout = self.timeout;
        let buf = timeout_at(deadline, self.reader.fill_buf())
            .await
            .map_err(|_| ChannelError::PatternTimeout(timeout))?
            .map_err(TransportError::from_io)?;

        match buf.first() {
            Some(&byte) => Ok(byte),
            None => Err(TransportError::Disconnected.into()),
        }
    }

    /// Read the next byte of session data, skipping control sequences.
    ///
    /// An `IAC` followed by anything other than a negotiation verb or `SB`
    /// is dropped on its own and the following byte is read again from the
    /// top, so `IAC IAC` yields no data byte.
    pub async fn read_byte(&mut self, deadline: Instant) -> Result<u8> {
        loop {
            let byte = self.next_raw(deadline).await?;
            if byte != IAC {
                return Ok(byte);
            }
            self.skip_command(deadline).await?;
        }
    }

    /// Skip the command following an `IAC` that was already consumed.
    async fn skip_command(&mut self, deadline: Instant) -> Result<()> {
        let command = self.peek_raw(deadline).await?;
        match command {
            WILL | WONT | DO | DONT => {
                self.reader.consume(1);
                let option = self.next_raw(deadline).await?;
                trace!("skipped IAC {} {}", command_name(command), option);
            }
            SB => {
                self.reader.consume(1);
                self.skip_subnegotiation(deadline).await?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Consume bytes up to and including the closing `IAC SE`.
    async fn skip_subnegotiation(&mut self, deadline: Instant) -> Result<()> {
        let mut skipped = 0usize;
        loop {
            let byte = self.next_raw(deadline).await?;
            if byte == IAC && self.peek_raw(deadline).await? == SE {
                self.reader.consume(1);
                trace!("skipped IAC SB block ({} bytes)", skipped);
                return Ok(());
            }
            skipped += 1;
        }
    }

    /// Append clean bytes to `buf` until `delim` has been appended.
    ///
    /// Returns how many bytes this call appended. On error the bytes read
    /// so far stay in `buf`.
    pub async fn read_until(
        &mut self,
        buf: &mut Vec<u8>,
        delim: u8,
        deadline: Instant,
    ) -> Result<usize> {
        let mut appended = 0;
        loop {
            let byte = self.read_byte(deadline).await?;
            buf.push(byte);
            appended += 1;
            if byte == delim {
                return Ok(appended);
            }
        }
    }

    /// Drop whatever the reader has buffered but nobody has read yet.
    ///
    /// Returns the number of discarded bytes.
    pub fn discard_buffered(&mut self) -> usize {
        let stale = self.reader.buffer().len();
        self.reader.consume(stale);
        stale
    }

    /// Write raw bytes and flush.
    ///
    /// On timeout the unsent tail is dropped, never sent by a later write.
    pub async fn write(&mut self, data: &[u8], deadline: Instant) -> Result<()> {
        let timeout = self.timeout;
        let writer = &mut self.writer;
        timeout_at(deadline, async move {
            writer.write_all(data).await?;
            writer.flush().await
        })
        .await
        .map_err(|_| TransportError::Timeout(timeout))?
        .map_err(TransportError::from_io)?;
        Ok(())
    }

    /// Write `line` followed by CRLF and flush.
    pub async fn write_line(&mut self, line: &[u8], deadline: Instant) -> Result<()> {
        let mut request = BytesMut::with_capacity(line.len() + CRLF.len());
        request.extend_from_slice(line);
        request.extend_from_slice(CRLF);
        self.write(&request, deadline).await
    }

    /// Shut the write half down.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.writer
            .shutdown()
            .await
            .map_err(TransportError::from_io)?;
        Ok(())
    }
}
