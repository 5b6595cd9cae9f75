//! # unlzw: fixed-width 12-bit LZW decompression
//!
//! This crate reconstructs the original byte stream from data encoded with
//! a byte-oriented LZW scheme using fixed-width 12-bit codes, rebuilding
//! the encoder's adaptive dictionary entry-for-entry as decoding proceeds.
//!
//! ## Encoded format
//!
//! - **12-bit codes only**: no variable widths, no header, no magic bytes.
//! - **Packing**: two codes per three bytes, big-endian, first code in the
//!   high 12 bits. A stream with an odd number of codes carries its final
//!   code right-aligned in a trailing 16-bit group.
//! - **Dictionary**: codes 0-255 are the byte singletons; grown entries
//!   take codes 256-4095 in assignment order. A full table switches back
//!   to its bootstrap state, exactly as the encoder's table did at the
//!   same point in the stream.
//!
//! ## Example
//!
//! ```rust
//! use unlzw::decompress;
//!
//! // Codes [65, 66]: 'A', 'B', growing entry "AB" at code 256.
//! let encoded = [0x04, 0x10, 0x42];
//! let decoded = decompress(&encoded).unwrap();
//! assert_eq!(decoded, b"AB");
//! ```
//!
//! There is no encoder: this crate decodes streams produced elsewhere.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bitstream;
mod decoder;
mod dictionary;
mod error;

pub use decoder::LzwDecoder;
pub use error::{LzwError, Result};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Decompress a complete in-memory code stream.
///
/// # Example
///
/// ```rust
/// // A single padded code: 'A'.
/// let decoded = unlzw::decompress(&[0x00, 0x41]).unwrap();
/// assert_eq!(decoded, b"A");
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_stream(data, &mut output)?;
    Ok(output)
}

/// Decompress from a byte source to a byte sink.
///
/// Reads `src` to its end and writes every decoded sequence to `dst` in
/// emission order. On failure, bytes already written to `dst` remain
/// there; nothing is rolled back.
pub fn decompress_stream<R: Read, W: Write>(src: R, dst: W) -> Result<()> {
    let mut decoder = LzwDecoder::new()?;
    decoder.decode(src, dst)
}

/// Decompress the file at `src` into the file at `dst`.
///
/// Opens both files (creating or truncating `dst`), mapping open failures
/// to [`LzwError::SourceOpen`] and [`LzwError::DestinationOpen`]. The
/// destination is fully flushed before returning.
pub fn decompress_file(src: &Path, dst: &Path) -> Result<()> {
    let src = BufReader::new(File::open(src).map_err(LzwError::SourceOpen)?);
    let mut dst = BufWriter::new(File::create(dst).map_err(LzwError::DestinationOpen)?);

    decompress_stream(src, &mut dst)?;
    dst.flush().map_err(LzwError::DestinationWrite)
}
