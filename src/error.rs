// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

//! Error types for the container encoder.
//!
//! Leaf errors describe a single exactness contract (a seek that must land on
//! an offset, a transfer that must move an exact number of bytes). The
//! [`EncodeError`] wrapper adds what the encoder was doing at the time.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// direction of a single exact transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// a seek that failed or did not land where it was asked to
#[derive(Debug, Error)]
pub enum SeekError {
    #[error("unable to seek to {offset} due to {source}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("tried to seek to {offset} landed at {landed}")]
    Landed { offset: u64, landed: u64 },
}

/// a read or write that did not move exactly the requested byte count
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("{source}")]
    Io {
        direction: Direction,
        #[source]
        source: io::Error,
    },

    #[error("only managed {got} out of {want} bytes")]
    Short {
        direction: Direction,
        want: u64,
        got: u64,
    },

    #[error("got extra bytes, got {got} but wanted {want} bytes")]
    Extra {
        direction: Direction,
        want: u64,
        got: u64,
    },
}

impl TransferError {
    pub fn direction(&self) -> Direction {
        match self {
            TransferError::Io { direction, .. }
            | TransferError::Short { direction, .. }
            | TransferError::Extra { direction, .. } => *direction,
        }
    }
}

/// error category, independent of the context an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Access,
    Seek,
    ShortRead,
    ShortWrite,
    OverWrite,
    FormatMismatch,
    Copy,
    Close,
}

#[derive(Debug, Error)]
pub enum EncodeError {
    /// Input could not be inspected or opened, or the output could not be created.
    #[error("unable to {action} {path:?}: {source}")]
    Access {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {source}")]
    Seek {
        context: &'static str,
        #[source]
        source: SeekError,
    },

    #[error("{context}: {source}")]
    Transfer {
        context: &'static str,
        #[source]
        source: TransferError,
    },

    /// The salt marker was not found where genuine firmware images carry it.
    #[error(
        "sanity check failed, was seeking to find \"{expected}\" but got \"{actual}\" are you sure this is a MiVue firmware file?"
    )]
    FormatMismatch { expected: String, actual: String },

    /// Streaming copy of the payload failed or moved the wrong number of bytes.
    #[error("failed to copy: {0}")]
    Copy(#[source] TransferError),

    #[error("something went wrong closing {path:?}: {source}")]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The run failed and the partial output could not be removed either.
    #[error("{cause}; the partial output {path:?} could not be removed: {source}")]
    Cleanup {
        cause: Box<EncodeError>,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Access { .. } => ErrorKind::Access,
            EncodeError::Seek { .. } => ErrorKind::Seek,
            EncodeError::Transfer { source, .. } => match source {
                TransferError::Extra { .. } => ErrorKind::OverWrite,
                other => match other.direction() {
                    Direction::Read => ErrorKind::ShortRead,
                    Direction::Write => ErrorKind::ShortWrite,
                },
            },
            EncodeError::FormatMismatch { .. } => ErrorKind::FormatMismatch,
            EncodeError::Copy(_) => ErrorKind::Copy,
            EncodeError::Close { .. } => ErrorKind::Close,
            EncodeError::Cleanup { cause, .. } => cause.kind(),
        }
    }

    pub(crate) fn access(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        EncodeError::Access {
            action,
            path: path.into(),
            source,
        }
    }
}
