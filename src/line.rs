//! Assembling lines from a byte stream without blocking.

use core::fmt::{self, Display, Formatter};

use heapless::String;
use ufmt_macros::uDebug;

/// Accumulates bytes into a line.
///
/// Bytes are pushed one at a time as they arrive (eg. from a UART that is
/// polled in a main loop). A `\n` completes the line; a `\r` is dropped so
/// that both `\n` and `\r\n` endings work. Lines are ASCII: a line holding
/// any other byte is rejected as a whole.
///
/// # Type Parameters
///
/// - `N`: Maximum number of characters in a line.
pub struct LineBuffer<const N: usize> {
    buffer: String<N>,
    /// First problem seen in the current line.
    error: Option<Error>,
    complete: bool,
}
impl<const N: usize> LineBuffer<N> {
    /// Creates a new, empty line buffer.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            error: None,
            complete: false,
        }
    }

    /// Pushes one byte.
    ///
    /// Pushing after a line was completed starts a new line.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(line))`: if the byte completed a line.
    /// - `Ok(None)`: if the line is still incomplete.
    /// - `Err(Error::BufferOverflow)`: if the byte completed a line which
    ///   did not fit in the buffer. The line is discarded.
    /// - `Err(Error::NonAscii)`: if the byte completed a line containing a
    ///   byte outside ASCII. The line is discarded.
    pub fn push(&mut self, byte: u8) -> Result<Option<&str>, Error> {
        if self.complete {
            self.clear();
        }
        match byte {
            b'\n' => {
                self.complete = true;
                match self.error {
                    Some(e) => Err(e),
                    None => Ok(Some(self.buffer.as_str())),
                }
            }
            b'\r' => Ok(None),
            _ if self.error.is_some() => Ok(None),
            _ if !byte.is_ascii() => {
                self.error = Some(Error::NonAscii);
                Ok(None)
            }
            _ => {
                if self.buffer.push(char::from(byte)).is_err() {
                    self.error = Some(Error::BufferOverflow);
                }
                Ok(None)
            }
        }
    }

    /// Discards any partial line.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.error = None;
        self.complete = false;
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that might occur when reading a line.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Error {
    /// A line was longer than the buffer.
    BufferOverflow,
    /// A line contained a byte outside ASCII.
    NonAscii,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferOverflow => f.write_str("line too long"),
            Error::NonAscii => f.write_str("line is not ASCII"),
        }
    }
}
