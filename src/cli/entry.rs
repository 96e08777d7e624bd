// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use anyhow::Result;
use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser};
use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use crate::cli::args::args_def::Args;
use crate::cli::commands::report::{EncodeReport, print_report};
use crate::cli::ui::cli_reporter::CliEncodeReporter;
use crate::cli::ui::ui_print::UiOutput;
use sdbin::encode_file;
use sdbin::utils::{format_elapsed_time, format_size};

const EXIT_USAGE: u8 = 1;
const EXIT_FAILURE: u8 = 2;

pub fn run() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return usage_exit(e),
    };

    // JSON goes to stdout, keep it free of progress lines
    let ui = UiOutput::new(args.quiet || args.json);

    match encode(&args, &ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui.error(format!("{}", e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn usage_exit(e: clap::Error) -> ExitCode {
    match e.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
            let _ = e.print();
            ExitCode::SUCCESS
        }
        ClapErrorKind::MissingRequiredArgument
        | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("{}", Args::command().render_help());
            ExitCode::from(EXIT_USAGE)
        }
        _ => {
            let _ = e.print();
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn encode(args: &Args, ui: &UiOutput) -> Result<()> {
    let start_time = Instant::now();

    // encode_file reports a proper access error if this fails
    let input_size = fs::metadata(&args.source).map(|m| m.len()).ok();
    if let Some(size) = input_size {
        ui.println(format!(
            "- Input file size {} ({})",
            size,
            format_size(size)
        ));
    }

    let reporter = CliEncodeReporter::new(ui, ui.create_copy_progress(input_size.unwrap_or(0)));

    let summary = match encode_file(&args.source, &args.dest, &reporter) {
        Ok(summary) => summary,
        Err(e) => {
            reporter.abandon();
            let _ = ui.clear();
            return Err(e.into());
        }
    };
    let elapsed = start_time.elapsed();

    if args.json {
        return print_report(&EncodeReport::new(
            &args.source,
            &args.dest,
            &summary,
            elapsed,
        ));
    }

    ui.result(summary.checksum.to_hex());
    ui.println(format!(
        "- Wrote {} ({}) in {}",
        args.dest.display(),
        format_size(summary.output_size),
        format_elapsed_time(elapsed)
    ));

    Ok(())
}
