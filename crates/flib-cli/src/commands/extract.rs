//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::Spinner;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use flib_core::ExtractOptions;
use flib_core::Extractor;
use std::env;
use tracing::debug;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let options = ExtractOptions::default()
        .with_filter(args.filter.into())
        .with_create_destination(!args.no_create);

    let extractor = match args.format.kind() {
        Some(kind) => add_archive_context(
            Extractor::open_as(kind, &args.archive, !args.no_strict),
            &args.archive,
        )?,
        None if args.no_strict => {
            bail!(
                "--no-strict needs an explicit archive format\n\
                 HINT: Pass --format tar or --format zip."
            );
        }
        None => add_archive_context(Extractor::open(&args.archive), &args.archive)?,
    };
    debug!(archive = %args.archive.display(), kind = %extractor.kind(), "extractor selected");

    let report = {
        let _spinner = (show_progress && Spinner::should_show())
            .then(|| Spinner::start(format!("Extracting {}", args.archive.display())));
        add_archive_context(extractor.extract_with(&output_dir, &options), &args.archive)?
    };

    formatter.format_extraction_result(&args.archive, extractor.kind(), &report)
}
