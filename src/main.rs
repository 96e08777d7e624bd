// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::entry::run()
}
