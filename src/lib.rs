// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

pub mod constants;
pub mod container;
pub mod error;
pub mod utils;

pub use container::checksum::Checksum;
pub use container::file::{EncodeSummary, encode_file};
pub use container::sanity::sanity_check;
pub use container::writer::{NoOpReporter, ProgressReporter, encode_streams};
pub use error::{EncodeError, ErrorKind};
