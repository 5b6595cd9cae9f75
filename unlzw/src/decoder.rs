//! LZW decode engine.
//!
//! Drives the code reader and the dictionary through the classic LZW
//! decode loop, emitting decoded byte sequences and inserting one grown
//! entry per code after the first. The engine runs one behind the encoder:
//! the entry the encoder defined while emitting code `n` is inserted here
//! while processing code `n + 1`, which is what makes the self-referential
//! corner case possible.

use crate::bitstream::CodeReader;
use crate::dictionary::{BOOTSTRAP_CODES, Dictionary, MAX_CODES};
use crate::error::{LzwError, Result};
use std::io::{Read, Write};

/// Streaming LZW decoder.
///
/// Owns its dictionary for the duration of a run; [`LzwDecoder::reset`]
/// restores the bootstrap state in place so the same decoder can be reused
/// across independent runs without reallocating the table.
#[derive(Debug)]
pub struct LzwDecoder {
    dict: Dictionary,
    /// Reusable emission buffer.
    scratch: Vec<u8>,
}

impl LzwDecoder {
    /// Create a decoder with a fresh bootstrap dictionary.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dict: Dictionary::new()?,
            scratch: Vec::new(),
        })
    }

    /// Decode one complete code stream from `src`, writing the
    /// reconstructed bytes to `dst`.
    ///
    /// The first failure is final: no retries, no rollback of bytes already
    /// written. An empty source decodes to empty output. Call
    /// [`LzwDecoder::reset`] before decoding another stream with the same
    /// decoder.
    pub fn decode<R: Read, W: Write>(&mut self, src: R, mut dst: W) -> Result<()> {
        let mut reader = CodeReader::new(src);

        // The first code carries no preceding entry and must already
        // resolve; a conforming encoder always starts with a bootstrap
        // code.
        let Some(first) = reader.next_code()? else {
            return Ok(());
        };
        if !self.dict.contains(first) {
            return Err(LzwError::InvalidFormat);
        }
        self.emit(first, &mut dst)?;
        let mut last = first;

        while let Some(code) = reader.next_code()? {
            // When the table is full, the insertion below switches it back
            // to bootstrap, and the encoder emitted this code from its own
            // post-switch table. Resolve against that view: grown codes of
            // the outgoing table cannot appear here.
            let full = usize::from(self.dict.next_code()) == MAX_CODES;
            let (resolvable, next_free) = if full {
                (usize::from(code) < BOOTSTRAP_CODES, BOOTSTRAP_CODES as u16)
            } else {
                (self.dict.contains(code), self.dict.next_code())
            };

            if resolvable {
                self.emit(code, &mut dst)?;
                let first_byte = self.dict.first_byte(code);
                self.dict.add(last, first_byte);
                last = code;
            } else if code == next_free {
                // Self-referential corner case: the encoder defined this
                // code from the sequence being decoded, one step ahead of
                // us. The entry is the last one grown by its own first
                // byte, and it is emitted in place of a lookup.
                let first_byte = self.dict.first_byte(last);
                let new_code = self.dict.add(last, first_byte);
                self.emit(new_code, &mut dst)?;
                last = new_code;
            } else {
                // Beyond the next free code: no conforming encoder can
                // have produced this.
                return Err(LzwError::InvalidFormat);
            }
        }

        Ok(())
    }

    /// Restore the bootstrap dictionary for another run.
    pub fn reset(&mut self) {
        self.dict.reset();
    }

    fn emit<W: Write>(&mut self, code: u16, dst: &mut W) -> Result<()> {
        self.scratch.clear();
        self.dict.append_bytes(code, &mut self.scratch);
        dst.write_all(&self.scratch)
            .map_err(LzwError::DestinationWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Pack 12-bit codes with the canonical layout: two codes per 3-byte
    /// group, odd final code right-aligned in a 16-bit tail.
    fn pack(codes: &[u16]) -> Vec<u8> {
        let mut out = Vec::new();
        for pair in codes.chunks(2) {
            if let [c1, c2] = *pair {
                out.push((c1 >> 4) as u8);
                out.push(((c1 & 0x0F) << 4) as u8 | (c2 >> 8) as u8);
                out.push((c2 & 0xFF) as u8);
            } else {
                out.push((pair[0] >> 8) as u8);
                out.push((pair[0] & 0xFF) as u8);
            }
        }
        out
    }

    fn decode_codes(codes: &[u16]) -> Result<Vec<u8>> {
        let mut decoder = LzwDecoder::new()?;
        let mut out = Vec::new();
        decoder.decode(pack(codes).as_slice(), &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_codes(&[]).unwrap(), b"");
    }

    #[test]
    fn test_two_literals() {
        // [65, 66] packs to 04 10 42 and grows entry "AB" at 256.
        assert_eq!(pack(&[65, 66]), [0x04, 0x10, 0x42]);
        assert_eq!(decode_codes(&[65, 66]).unwrap(), b"AB");
    }

    #[test]
    fn test_grown_entry_reused() {
        // "AB" lands at 256 while processing the second code.
        assert_eq!(decode_codes(&[65, 66, 256]).unwrap(), b"ABAB");
    }

    #[test]
    fn test_single_code_padded() {
        assert_eq!(decode_codes(&[65]).unwrap(), b"A");
    }

    #[test]
    fn test_corner_case() {
        // Second code names the entry the first insertion is about to
        // create: emit last ++ last[0] without a successful lookup.
        assert_eq!(decode_codes(&[65, 256]).unwrap(), b"AAA");
    }

    #[test]
    fn test_corner_case_chained() {
        // "ABABAB": 256 = "AB" is defined one step ahead of the decoder.
        assert_eq!(decode_codes(&[65, 66, 256, 258]).unwrap(), b"ABABABA");
    }

    #[test]
    fn test_first_code_out_of_range() {
        // 0x410 exceeds the bootstrap table of a fresh dictionary.
        assert!(matches!(
            decode_codes(&[0x410]).unwrap_err(),
            LzwError::InvalidFormat
        ));
    }

    #[test]
    fn test_later_code_beyond_next_free() {
        // After the first code the next free code is 256; 300 is
        // unreachable for any conforming encoder.
        assert!(matches!(
            decode_codes(&[65, 300]).unwrap_err(),
            LzwError::InvalidFormat
        ));
    }

    #[test]
    fn test_truncated_group() {
        let mut input = pack(&[65, 66]);
        input.push(0x7F);
        let mut decoder = LzwDecoder::new().unwrap();
        let mut out = Vec::new();
        let err = decoder.decode(input.as_slice(), &mut out).unwrap_err();
        assert!(matches!(err, LzwError::SourceRead(_)));
        // Bytes emitted before the failure stay written.
        assert_eq!(out, b"AB");
    }

    #[test]
    fn test_write_failure_is_fatal() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("sink refused"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut decoder = LzwDecoder::new().unwrap();
        let err = decoder
            .decode(pack(&[65, 66]).as_slice(), FailingSink)
            .unwrap_err();
        assert!(matches!(err, LzwError::DestinationWrite(_)));
    }

    #[test]
    fn test_reset_allows_reuse() {
        let mut decoder = LzwDecoder::new().unwrap();

        let mut out = Vec::new();
        decoder.decode(pack(&[65, 66, 256]).as_slice(), &mut out).unwrap();
        assert_eq!(out, b"ABAB");

        // Without a reset the grown table would leak into the next run.
        decoder.reset();
        let mut out = Vec::new();
        decoder.decode(pack(&[67, 256]).as_slice(), &mut out).unwrap();
        assert_eq!(out, b"CCC");
    }

    #[test]
    fn test_table_switch_mid_stream() {
        // Fill codes 256-4095 with a run of 'A's emitted as singletons,
        // then keep going: the next insertion must land at 256 and the
        // decoder must keep resolving codes against the switched table.
        let mut codes = vec![65u16; 3841];
        codes.push(66);
        codes.push(256);
        let out = decode_codes(&codes).unwrap();

        // 3841 'A's, one 'B', then the post-switch entry 256 = "AB".
        let mut expected = vec![b'A'; 3841];
        expected.push(b'B');
        expected.extend_from_slice(b"AB");
        assert_eq!(out, expected);
    }
}
