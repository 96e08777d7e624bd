// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// main UI handler for CLI output
/// respects quiet mode
pub struct UiOutput {
    quiet: bool,
    multi_progress: Option<MultiProgress>,
}

impl UiOutput {
    pub fn new(quiet: bool) -> Self {
        let multi_progress = if quiet {
            None
        } else {
            Some(MultiProgress::new())
        };

        Self {
            quiet,
            multi_progress,
        }
    }

    /// print to stdout (respects quiet mode)
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        // mp.println drops lines when stdout is not a terminal
        if let Some(mp) = &self.multi_progress {
            mp.suspend(|| println!("{}", msg.as_ref()));
        } else {
            println!("{}", msg.as_ref());
        }
    }

    /// print the essential result of a run (ignores quiet mode)
    pub fn result(&self, msg: impl AsRef<str>) {
        if let Some(mp) = &self.multi_progress {
            mp.suspend(|| println!("{}", msg.as_ref()));
        } else {
            println!("{}", msg.as_ref());
        }
    }

    /// print errors (ignores quiet mode)
    pub fn error(&self, msg: impl AsRef<str>) {
        if let Some(mp) = &self.multi_progress {
            mp.suspend(|| eprintln!("{}", msg.as_ref()));
        } else {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// create a byte progress bar wrapper for the payload copy
    pub fn create_copy_progress(&self, length: u64) -> CopyProgress {
        let progress_bar = self.multi_progress.as_ref().map(|mp| {
            let pb = mp.add(ProgressBar::new(length));
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/white}] {percent}% - {msg}",
            ) {
                pb.set_style(style.progress_chars("▰▱ "));
            }
            pb.set_message("Copying payload");
            pb
        });
        CopyProgress { progress_bar }
    }

    /// clear all progress bars
    pub fn clear(&self) -> anyhow::Result<()> {
        if let Some(mp) = &self.multi_progress {
            mp.clear()?;
        }
        Ok(())
    }
}

/// wrapper for the payload copy progress bar
pub struct CopyProgress {
    progress_bar: Option<ProgressBar>,
}

impl CopyProgress {
    pub fn set_length(&self, length: u64) {
        if let Some(pb) = &self.progress_bar {
            pb.set_length(length);
        }
    }

    pub fn set_position(&self, pos: u64) {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(pos);
        }
    }

    pub fn finish_with_message(&self, message: impl Into<String>) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(message.into());
        }
    }

    /// leaves the bar where it stopped, used when a run fails
    pub fn abandon(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon();
        }
    }
}
