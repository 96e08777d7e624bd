// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use anyhow::{Result, anyhow};
use sdbin::EncodeSummary;
use sdbin::constants::{SALT, SALT_OFFSET, header_tag};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// machine-readable summary of one encoded container
#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub input: String,
    pub output: String,
    pub input_size: u64,
    pub output_size: u64,
    pub header_tag: String,
    pub salt: String,
    pub salt_offset: u64,
    pub checksum: String,
    pub elapsed_ms: u64,
}

impl EncodeReport {
    pub fn new(input: &Path, output: &Path, summary: &EncodeSummary, elapsed: Duration) -> Self {
        Self {
            input: input.to_string_lossy().into_owned(),
            output: output.to_string_lossy().into_owned(),
            input_size: summary.input_size,
            output_size: summary.output_size,
            header_tag: hex::encode(header_tag()),
            salt: String::from_utf8_lossy(SALT).into_owned(),
            salt_offset: SALT_OFFSET,
            checksum: summary.checksum.to_hex(),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }
}

/// writes the report as pretty JSON to stdout
pub fn print_report(report: &EncodeReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)
        .map_err(|e| anyhow!("Failed to serialize report: {}", e))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json_output)
        .map_err(|e| anyhow!("Failed to write report to stdout: {}", e))?;
    stdout
        .flush()
        .map_err(|e| anyhow!("Failed to flush stdout: {}", e))?;

    Ok(())
}
