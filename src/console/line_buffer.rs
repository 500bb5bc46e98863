//! Line assembly for serial input.
//!
//! Bytes arrive one at a time; a message is ready when a line feed follows
//! at least one buffered byte. Carriage returns are ignored, so both `\n`
//! and `\r\n` terminated input work. Terminators never end up in the
//! message.

use super::error::ConsoleError;
use crate::config::LINE_SIZE;

/// Fixed-capacity line buffer (no heap).
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Feed one input byte.
    ///
    /// Returns `Ok(true)` when a complete, non-empty line is available in
    /// [`as_str`](Self::as_str). The caller consumes it and calls
    /// [`clear`](Self::clear) before feeding more bytes.
    ///
    /// Non-ASCII bytes are dropped: they can never be transmitted. Once the
    /// buffer is full further bytes are dropped and
    /// `Err(ConsoleError::Overflow)` is returned; the line itself stays
    /// valid and is delivered, truncated, at the next line feed.
    pub fn push(&mut self, byte: u8) -> Result<bool, ConsoleError> {
        match byte {
            b'\n' => Ok(self.len > 0),
            b'\r' => Ok(false),
            0x80..=0xFF => Ok(false),
            _ if self.len >= LINE_SIZE => Err(ConsoleError::Overflow),
            _ => {
                self.buf[self.len] = byte;
                self.len += 1;
                Ok(false)
            }
        }
    }

    /// Discard the buffered line.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Buffered text. Always valid: only ASCII is ever stored.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == LINE_SIZE
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
