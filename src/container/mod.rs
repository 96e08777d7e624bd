// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

pub mod checks;
pub mod checksum;
pub mod file;
pub mod sanity;
pub mod writer;
