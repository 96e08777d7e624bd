// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use clap::Parser;
use sdbin::constants::DEFAULT_OUTPUT;
use std::path::PathBuf;

const VERSION_STRING: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\n\n",
    "Copyright (C) 2025 rhythmcache\n",
    "License Apache-2.0: Apache License 2.0 <https://www.apache.org/licenses/LICENSE-2.0>\n",
    "\n",
    "This is free software; you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law.\n",
    "\n",
    "Build Information:\n",
    "  Version:    ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "  Git:        ",
    env!("GIT_COMMIT_SHORT"),
    " (",
    env!("GIT_BRANCH"),
    ")",
    "\n",
    "  Built:      ",
    env!("BUILD_TIMESTAMP"),
    "\n",
    "  Rustc:      ",
    env!("RUSTC_VERSION"),
    "\n",
    "  Target:     ",
    env!("BUILD_TARGET"),
    "\n",
    "  Profile:    ",
    env!("BUILD_PROFILE"),
    "\n"
);

#[derive(Parser)]
#[command(
    name = "sdbin",
    version = VERSION_STRING,
    about = "This utility creates an encoded file\nFW is updated with this file in SD card"
)]
#[command(next_line_help = true)]
pub struct Args {
    #[arg(value_name = "SOURCE", help = "source is input file name")]
    pub source: PathBuf,

    #[arg(
        value_name = "DEST",
        default_value = DEFAULT_OUTPUT,
        help = "dest is output file name"
    )]
    pub dest: PathBuf,

    #[arg(
        short = 'q',
        long,
        help = "Suppress all non-essential output (errors and the checksum will still be shown)"
    )]
    pub quiet: bool,

    #[arg(
        short = 'j',
        long,
        help = "Print a JSON summary of the encoded container to stdout"
    )]
    pub json: bool,
}
