// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use crate::constants::{HASH_OFFSET, HEADER, SALT};
use crate::container::checks::{check, seek_set, write_exact};
use crate::container::checksum::{Checksum, ChecksumEngine, TeeWriter};
use crate::error::{Direction, EncodeError, TransferError};
use std::io::{Read, Seek, Write};

const COPY_BUFFER_SIZE: usize = 128 * 1024; // 128 KB per copy chunk

/// progress reporting trait for the payload copy
/// implement this to receive progress updates during encoding
pub trait ProgressReporter {
    /// called before the first payload byte is copied
    fn on_start(&self, total_bytes: u64);

    /// called after each chunk lands in the output
    fn on_progress(&self, copied: u64, total: u64);

    /// called once the checksum has been patched into the header
    fn on_complete(&self, checksum: &Checksum);

    /// called when the input carried the device salt, before the output is created
    fn on_sanity_passed(&self, _salt_offset: u64) {}
}

/// no-op reporter for headless/library use
pub struct NoOpReporter;

impl ProgressReporter for NoOpReporter {
    fn on_start(&self, _: u64) {}
    fn on_progress(&self, _: u64, _: u64) {}
    fn on_complete(&self, _: &Checksum) {}
}

/// copy function with reusable buffer, reports after every chunk
///
/// every chunk goes out in a single write that must take all of it
fn copy_with_buffer<R, W>(
    reader: &mut R,
    writer: &mut W,
    buf: &mut [u8],
    total: u64,
    reporter: &dyn ProgressReporter,
) -> Result<u64, TransferError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut copied = 0u64;

    loop {
        let n = reader.read(buf).map_err(|source| TransferError::Io {
            direction: Direction::Read,
            source,
        })?;
        if n == 0 {
            break;
        }
        let written = writer.write(&buf[..n]).map(|w| w as u64);
        check(Direction::Write, n as u64, written)?;
        copied += n as u64;
        reporter.on_progress(copied, total);
    }

    Ok(copied)
}

/// writes the container for `input` into `output` and returns its checksum
///
/// `output` must be positioned at its start. `expected_size` is the input size
/// observed before opening it; copying any other number of bytes is an error.
pub fn encode_streams<R, W>(
    input: &mut R,
    output: &mut W,
    expected_size: u64,
    reporter: &dyn ProgressReporter,
) -> Result<Checksum, EncodeError>
where
    R: Read + ?Sized,
    W: Write + Seek + ?Sized,
{
    write_exact(output, &HEADER).map_err(|source| EncodeError::Transfer {
        context: "unable to write the header",
        source,
    })?;

    let mut engine = ChecksumEngine::new();
    write_exact(&mut engine, SALT).map_err(|source| EncodeError::Transfer {
        context: "failed to salt the MD5",
        source,
    })?;

    reporter.on_start(expected_size);
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let copied = {
        let mut tee = TeeWriter::new(&mut *output, &mut engine);
        copy_with_buffer(input, &mut tee, &mut buf, expected_size, reporter)
    }
    .map_err(EncodeError::Copy)?;
    check(Direction::Write, expected_size, Ok(copied)).map_err(EncodeError::Copy)?;

    let checksum = engine.finalize();

    seek_set(output, HASH_OFFSET).map_err(|source| EncodeError::Seek {
        context: "unable to seek hash in the header",
        source,
    })?;

    write_exact(output, checksum.as_bytes()).map_err(|source| EncodeError::Transfer {
        context: "failed to write hash to header",
        source,
    })?;

    reporter.on_complete(&checksum);
    Ok(checksum)
}
