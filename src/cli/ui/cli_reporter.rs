// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use crate::cli::ui::ui_print::{CopyProgress, UiOutput};
use sdbin::Checksum;
use sdbin::constants::SALT;

/// reporter for encoding progress
pub struct CliEncodeReporter<'a> {
    ui: &'a UiOutput,
    progress: CopyProgress,
}

impl<'a> CliEncodeReporter<'a> {
    pub fn new(ui: &'a UiOutput, progress: CopyProgress) -> Self {
        Self { ui, progress }
    }

    pub fn abandon(&self) {
        self.progress.abandon();
    }
}

// the trait lives in the library, this implementation
// lives in the cli layer and uses cli-specific ui components
impl sdbin::ProgressReporter for CliEncodeReporter<'_> {
    fn on_sanity_passed(&self, salt_offset: u64) {
        self.ui.println(format!(
            "- Sanity check passed: found \"{}\" at offset {}",
            String::from_utf8_lossy(SALT),
            salt_offset
        ));
    }

    fn on_start(&self, total_bytes: u64) {
        self.progress.set_length(total_bytes);
        self.progress.set_position(0);
    }

    fn on_progress(&self, copied: u64, _total: u64) {
        self.progress.set_position(copied);
    }

    fn on_complete(&self, checksum: &Checksum) {
        self.progress
            .finish_with_message(format!("✓ checksum {}", checksum));
    }
}
