//! Output buffer with line-fragment tracking.
//!
//! Prompt classifiers only ever look at the text since the last CRLF.
//! The buffer remembers where that line starts and how far it has already
//! searched, so each growth step only scans the newly appended bytes.

use memchr::memmem;

use super::protocol::CRLF;

/// Initial capacity of a scan buffer.
const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Append-only buffer accumulating the clean output of one scan.
#[derive(Debug)]
pub struct LineBuffer {
    /// The accumulated output.
    buffer: Vec<u8>,

    /// Offset just past the most recent CRLF.
    line_start: usize,

    /// Length of the buffer at the last line-start update.
    scanned: usize,
}

impl LineBuffer {
    /// Create an empty buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            line_start: 0,
            scanned: 0,
        }
    }

    /// Mutable access for the reader; callers only append.
    pub(crate) fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }

    /// Look for a CRLF in the bytes appended since the last call and move
    /// the line start past the last one found.
    ///
    /// One byte of the previous region is included so a CR/LF pair split
    /// across two appends is still seen.
    pub fn update_line_start(&mut self) -> usize {
        let from = self.scanned.saturating_sub(1);
        if let Some(pos) = memmem::rfind(&self.buffer[from..], CRLF) {
            self.line_start = from + pos + CRLF.len();
        }
        self.scanned = self.buffer.len();
        self.line_start
    }

    /// The current line fragment: everything since the last CRLF.
    pub fn fragment(&self) -> &[u8] {
        &self.buffer[self.line_start..]
    }

    /// Offset where the current line fragment starts.
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take ownership of the accumulated output.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
