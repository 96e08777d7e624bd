// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use crate::error::{Direction, SeekError, TransferError};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// seeks to an absolute offset and insists on landing exactly there
pub fn seek_set<S: Seek + ?Sized>(seeker: &mut S, offset: u64) -> Result<(), SeekError> {
    let position = seeker
        .seek(SeekFrom::Start(offset))
        .map_err(|source| SeekError::Io { offset, source })?;

    if position != offset {
        return Err(SeekError::Landed {
            offset,
            landed: position,
        });
    }
    Ok(())
}

/// checks that a transfer moved exactly `want` bytes
pub fn check(direction: Direction, want: u64, result: io::Result<u64>) -> Result<(), TransferError> {
    let got = result.map_err(|source| TransferError::Io { direction, source })?;

    if want > got {
        return Err(TransferError::Short {
            direction,
            want,
            got,
        });
    }
    if want < got {
        return Err(TransferError::Extra {
            direction,
            want,
            got,
        });
    }
    Ok(())
}

/// one `write` call that must accept the whole buffer
pub fn write_exact<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> Result<(), TransferError> {
    let result = writer.write(buf).map(|n| n as u64);
    check(Direction::Write, buf.len() as u64, result)
}

/// one `read` call that must fill the whole buffer
pub fn read_exact_once<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<(), TransferError> {
    let want = buf.len() as u64;
    let result = reader.read(buf).map(|n| n as u64);
    check(Direction::Read, want, result)
}
