// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use crate::constants::{SALT, SALT_OFFSET};
use crate::container::checks::{read_exact_once, seek_set};
use crate::error::EncodeError;
use std::io::{Read, Seek};

/// checks that the input carries the device salt where genuine firmware does
///
/// the read position is put back to the start of the input whatever the
/// outcome, so the payload copy can begin right after.
pub fn sanity_check<R: Read + Seek + ?Sized>(input: &mut R) -> Result<(), EncodeError> {
    let result = find_salt(input);

    match seek_set(input, 0) {
        Ok(()) => result,
        // a failed check is the more useful report
        Err(_) if result.is_err() => result,
        Err(source) => Err(EncodeError::Seek {
            context: "unable to rewind the input after the sanity check",
            source,
        }),
    }
}

fn find_salt<R: Read + Seek + ?Sized>(input: &mut R) -> Result<(), EncodeError> {
    seek_set(input, SALT_OFFSET).map_err(|source| EncodeError::Seek {
        context: "sanity check failed",
        source,
    })?;

    let mut stored = [0u8; SALT.len()];
    read_exact_once(input, &mut stored).map_err(|source| EncodeError::Transfer {
        context: "tried to read the stored salt",
        source,
    })?;

    if &stored != SALT {
        return Err(EncodeError::FormatMismatch {
            expected: hex::encode(SALT),
            actual: hex::encode(stored),
        });
    }
    Ok(())
}
