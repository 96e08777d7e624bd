// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

//! Salted MD5 over the container payload.
//!
//! The camera's loader recomputes MD5(salt ‖ payload) and compares it with the
//! header slot, so the algorithm is fixed by the device, not chosen here.

use crate::constants::HASH_LENGTH;
use digest::Digest;
use md5::Md5;
use std::fmt;
use std::io::{self, Write};

/// 128-bit digest stored in the header checksum slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum(pub [u8; HASH_LENGTH]);

impl Checksum {
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// digest accumulator exposed as a byte sink
#[derive(Default)]
pub struct ChecksumEngine {
    hasher: Md5,
}

impl ChecksumEngine {
    pub fn new() -> Self {
        Self { hasher: Md5::new() }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    pub fn finalize(self) -> Checksum {
        let digest = self.hasher.finalize();
        let mut out = [0u8; HASH_LENGTH];
        out.copy_from_slice(&digest);
        Checksum(out)
    }
}

impl Write for ChecksumEngine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// forwards every write to the output and hashes exactly the bytes it accepted
pub struct TeeWriter<'a, W: ?Sized> {
    output: &'a mut W,
    engine: &'a mut ChecksumEngine,
}

impl<'a, W: Write + ?Sized> TeeWriter<'a, W> {
    pub fn new(output: &'a mut W, engine: &'a mut ChecksumEngine) -> Self {
        Self { output, engine }
    }
}

impl<W: Write + ?Sized> Write for TeeWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.output.write(buf)?;
        if written > buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "got extra bytes, got {} but wanted {} bytes",
                    written,
                    buf.len()
                ),
            ));
        }
        self.engine.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SALT;

    #[test]
    fn empty_digest_matches_md5() {
        let checksum = ChecksumEngine::new().finalize();
        assert_eq!(checksum.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn streaming_updates_match_one_shot_digest() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let mut engine = ChecksumEngine::new();
        engine.update(SALT);
        for chunk in data.chunks(333) {
            engine.update(chunk);
        }

        let mut whole = Md5::new();
        whole.update(SALT);
        whole.update(&data);
        assert_eq!(engine.finalize().as_bytes()[..], whole.finalize()[..]);
    }

    #[test]
    fn tee_hashes_only_accepted_bytes() {
        let mut sink = Vec::new();
        let mut engine = ChecksumEngine::new();
        {
            let mut tee = TeeWriter::new(&mut sink, &mut engine);
            tee.write_all(b"hello world").unwrap();
        }
        assert_eq!(sink, b"hello world");

        let mut expected = ChecksumEngine::new();
        expected.update(b"hello world");
        assert_eq!(engine.finalize(), expected.finalize());
    }

    #[test]
    fn tee_rejects_sinks_that_claim_extra_bytes() {
        struct Greedy;
        impl Write for Greedy {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                Ok(buf.len() + 1)
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut engine = ChecksumEngine::new();
        let mut greedy = Greedy;
        let mut tee = TeeWriter::new(&mut greedy, &mut engine);
        let err = tee.write(b"abcd").unwrap_err();
        assert_eq!(err.to_string(), "got extra bytes, got 5 but wanted 4 bytes");
    }

    #[test]
    fn display_is_lowercase_hex() {
        let checksum = Checksum([0xAB; HASH_LENGTH]);
        assert_eq!(checksum.to_string(), "ab".repeat(HASH_LENGTH));
    }
}
