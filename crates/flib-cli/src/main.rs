//! flib CLI - Command-line front end for archive extraction and host
//! introspection.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use error::AlreadyReported;
use flib_core::logging::LoggingSettings;
use flib_core::logging::setup_logging;
use output::OutputFormatter;
use std::process::ExitCode;

fn run(cli: &cli::Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    // Quiet keeps only fatal messages; each -v steps one level further down
    let verbosity = if cli.quiet {
        0
    } else {
        cli.verbose.saturating_add(1)
    };
    setup_logging(&LoggingSettings::from_verbosity(verbosity))
        .context("failed to initialize logging")?;

    match &cli.command {
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, formatter, !cli.quiet && !cli.json)
        }
        cli::Commands::Check(args) => commands::check::execute(args, formatter),
        cli::Commands::Formats => commands::formats::execute(formatter),
        cli::Commands::Info => commands::info::execute(formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose > 0, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<AlreadyReported>().is_none() {
                formatter.format_error(&err);
            }
            ExitCode::FAILURE
        }
    }
}
