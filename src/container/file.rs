// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use crate::constants::{HEADER_LENGTH, SALT_OFFSET};
use crate::container::checksum::Checksum;
use crate::container::sanity::sanity_check;
use crate::container::writer::{ProgressReporter, encode_streams};
use crate::error::EncodeError;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// what a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    pub input_size: u64,
    pub output_size: u64,
    pub checksum: Checksum,
}

/// output file that only survives a run through `keep`
///
/// failed runs hand their error to `discard`, which removes the file and
/// reports when that removal fails too. Drop only covers unwinding.
struct PendingOutput {
    path: PathBuf,
    file: Option<File>,
    settled: bool,
}

impl PendingOutput {
    fn create(path: &Path) -> Result<Self, EncodeError> {
        let file = File::create(path).map_err(|e| EncodeError::access("create", path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            settled: false,
        })
    }

    fn file_mut(&mut self) -> Result<&mut File, EncodeError> {
        let path = &self.path;
        self.file.as_mut().ok_or_else(|| {
            EncodeError::access("create", path, io::Error::other("output already closed"))
        })
    }

    /// flushes the output to disk, failures count as close errors
    fn sync(&self) -> Result<(), EncodeError> {
        if let Some(file) = &self.file {
            file.sync_all().map_err(|source| EncodeError::Close {
                path: self.path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn keep(mut self) {
        drop(self.file.take());
        self.settled = true;
    }

    /// removes the output and returns the error that caused the removal
    fn discard(mut self, cause: EncodeError) -> EncodeError {
        // close before removing, some platforms refuse to unlink open files
        drop(self.file.take());
        self.settled = true;

        match fs::remove_file(&self.path) {
            Ok(()) => cause,
            Err(e) if e.kind() == io::ErrorKind::NotFound => cause,
            Err(source) => EncodeError::Cleanup {
                cause: Box::new(cause),
                path: self.path.clone(),
                source,
            },
        }
    }
}

impl Drop for PendingOutput {
    fn drop(&mut self) {
        drop(self.file.take());
        if !self.settled {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// refuses outputs that are the input itself or not a regular file
fn check_output(input: &Path, output: &Path) -> Result<(), EncodeError> {
    let metadata = match fs::symlink_metadata(output) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(EncodeError::access("create", output, e)),
    };

    // follow a symlink to what it points at, a dangling one gets created
    let metadata = if metadata.file_type().is_symlink() {
        match fs::metadata(output) {
            Ok(target) => target,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(EncodeError::access("create", output, e)),
        }
    } else {
        metadata
    };

    if !metadata.is_file() {
        return Err(EncodeError::access(
            "create",
            output,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    // compares file identity, so hard links and symlinks to the input are caught
    let same = same_file::is_same_file(input, output)
        .map_err(|e| EncodeError::access("access", output, e))?;
    if same {
        return Err(EncodeError::access(
            "create",
            output,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "output would overwrite the input file",
            ),
        ));
    }
    Ok(())
}

fn write_container(
    output: &mut PendingOutput,
    input: &mut File,
    input_size: u64,
    reporter: &dyn ProgressReporter,
) -> Result<Checksum, EncodeError> {
    let checksum = encode_streams(input, output.file_mut()?, input_size, reporter)?;
    output.sync()?;
    Ok(checksum)
}

/// encodes the firmware image at `input_path` into a container at `output_path`
///
/// the output file only exists afterwards if every step, including the final
/// flush, succeeded.
pub fn encode_file(
    input_path: &Path,
    output_path: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<EncodeSummary, EncodeError> {
    let metadata =
        fs::metadata(input_path).map_err(|e| EncodeError::access("access", input_path, e))?;
    if !metadata.is_file() {
        return Err(EncodeError::access(
            "access",
            input_path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    let input_size = metadata.len();

    let mut input =
        File::open(input_path).map_err(|e| EncodeError::access("read", input_path, e))?;

    sanity_check(&mut input)?;
    reporter.on_sanity_passed(SALT_OFFSET);

    check_output(input_path, output_path)?;

    let mut output = PendingOutput::create(output_path)?;
    let checksum = match write_container(&mut output, &mut input, input_size, reporter) {
        Ok(checksum) => checksum,
        Err(cause) => return Err(output.discard(cause)),
    };
    output.keep();

    Ok(EncodeSummary {
        input_size,
        output_size: input_size + HEADER_LENGTH as u64,
        checksum,
    })
}
