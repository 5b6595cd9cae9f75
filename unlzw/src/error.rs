//! Error taxonomy for LZW decompression.

use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Errors arising during LZW decompression.
///
/// Every failure is fatal: the decoder never retries and never continues
/// past an error. Bytes already flushed to the destination stay there.
///
/// These are a named enumeration only; their discriminant values carry no
/// meaning and must never be persisted or compared numerically.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Failed to open the source file.
    #[error("Failed to open source file")]
    SourceOpen(#[source] io::Error),

    /// Failed to open the destination file.
    #[error("Failed to open destination file")]
    DestinationOpen(#[source] io::Error),

    /// Failed to allocate memory for the code table.
    #[error("Failed to allocate memory")]
    Allocation(#[from] TryReserveError),

    /// Failed to write to the destination stream.
    ///
    /// A short write counts: output must fully succeed, so partial writes
    /// are surfaced here rather than retried.
    #[error("Failed to write to destination file")]
    DestinationWrite(#[source] io::Error),

    /// Failed to read from the source stream.
    ///
    /// Raised for genuine I/O errors and for a lone trailing byte, which
    /// cannot form a 12-bit code.
    #[error("Failed to read from source file")]
    SourceRead(#[source] io::Error),

    /// The encoded stream is not a valid 12-bit LZW code stream.
    ///
    /// Raised when the very first code does not resolve in the bootstrap
    /// dictionary, or when a later code lies strictly beyond the next free
    /// code. A later code *equal* to the next free code is the
    /// self-referential corner case and is never an error.
    #[error("Invalid compressed file format")]
    InvalidFormat,
}

/// Result type alias for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LzwError::SourceOpen(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.to_string(), "Failed to open source file");

        assert_eq!(
            LzwError::InvalidFormat.to_string(),
            "Invalid compressed file format"
        );
    }

    #[test]
    fn test_io_source_preserved() {
        let err = LzwError::SourceRead(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"));
        let source = std::error::Error::source(&err).expect("source error attached");
        assert!(source.to_string().contains("truncated"));
    }
}
