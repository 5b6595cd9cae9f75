//! Fixed-width 12-bit code extraction from a packed byte stream.
//!
//! Codes are packed MSB-first, two codes per three bytes:
//!
//! ```text
//! b0 = c1[11:4]
//! b1 = c1[3:0] << 4 | c2[11:8]
//! b2 = c2[7:0]
//! ```
//!
//! A stream with an odd number of codes carries its final code right-aligned
//! in a trailing 16-bit group: `c = (b0 << 8) | b1`.

use crate::error::{LzwError, Result};
use std::io::{self, Read};

/// Forward-only reader yielding 12-bit codes from a byte stream.
///
/// The reader consumes whole 3-byte groups, buffering the second code of
/// each group between calls because individual codes do not align to byte
/// boundaries. It never rewinds.
#[derive(Debug)]
pub struct CodeReader<R: Read> {
    /// Underlying byte source.
    reader: R,
    /// Second code of the current group, not yet handed out.
    pending: Option<u16>,
    /// Set once the padded trailing code has been consumed.
    finished: bool,
}

impl<R: Read> CodeReader<R> {
    /// Create a new code reader over the given byte source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            finished: false,
        }
    }

    /// Read the next 12-bit code.
    ///
    /// Returns `Ok(None)` on a clean end of stream (no bytes remain at a
    /// code boundary). A lone trailing byte cannot form a code and yields
    /// [`LzwError::SourceRead`], as does any I/O failure of the underlying
    /// reader.
    pub fn next_code(&mut self) -> Result<Option<u16>> {
        if let Some(code) = self.pending.take() {
            return Ok(Some(code));
        }
        if self.finished {
            return Ok(None);
        }

        let mut group = [0u8; 3];
        match self.fill_group(&mut group)? {
            // Clean end: the previous group was the last one.
            0 => Ok(None),
            // Full group: first code now, second on the next call.
            3 => {
                let first = u16::from(group[0]) << 4 | u16::from(group[1] >> 4);
                let second = u16::from(group[1] & 0x0F) << 8 | u16::from(group[2]);
                self.pending = Some(second);
                Ok(Some(first))
            }
            // Padded tail: one final code, right-aligned in 16 bits.
            2 => {
                self.finished = true;
                Ok(Some(u16::from(group[0]) << 8 | u16::from(group[1])))
            }
            _ => Err(LzwError::SourceRead(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "lone trailing byte cannot form a 12-bit code",
            ))),
        }
    }

    /// Fill `group` from the underlying reader, returning how many bytes
    /// were available before end of stream.
    fn fill_group(&mut self, group: &mut [u8; 3]) -> Result<usize> {
        let mut filled = 0;
        while filled < group.len() {
            match self.reader.read(&mut group[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(LzwError::SourceRead(e)),
            }
        }
        Ok(filled)
    }
}
