//! unlzw CLI - fixed-width 12-bit LZW decompression.
//!
//! Decompresses a file containing a bare packed 12-bit LZW code stream
//! into the reconstructed original bytes.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unlzw")]
#[command(
    author,
    version,
    about = "Decompress a fixed-width 12-bit LZW encoded file"
)]
#[command(long_about = "
Decompresses a file encoded with a byte-oriented LZW scheme using
fixed-width 12-bit codes. The input is a bare code stream with no header;
the output is an exact reconstruction of the pre-encoded data.

Example:
  unlzw compressed.lzw restored.bin
")]
struct Cli {
    /// Compressed source file
    src: PathBuf,

    /// Destination file for the decompressed output
    dst: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = unlzw::decompress_file(&cli.src, &cli.dst) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
