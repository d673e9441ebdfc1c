//! Check command: open each archive and read every member header.

use crate::cli::CheckArgs;
use crate::error::AlreadyReported;
use crate::error::convert_extraction_error;
use crate::output::CheckResult;
use crate::output::OutputFormatter;
use anyhow::Result;
use flib_core::Extractor;
use std::path::Path;
use tracing::warn;

fn check_one(archive: &Path) -> CheckResult {
    let mut result = CheckResult {
        archive: archive.display().to_string(),
        format: None,
        members: None,
        error: None,
    };

    match Extractor::open(archive).and_then(|extractor| {
        let kind = extractor.kind();
        extractor.verify().map(|members| (kind, members))
    }) {
        Ok((kind, members)) => {
            result.format = Some(kind.name());
            result.members = Some(members);
        }
        Err(err) => {
            warn!(archive = %archive.display(), %err, "archive check failed");
            let message = convert_extraction_error(err, archive).to_string();
            // Drop the HINT lines; the summary is one line per archive
            result.error = Some(message.lines().next().unwrap_or_default().to_string());
        }
    }

    result
}

pub fn execute(args: &CheckArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let results: Vec<CheckResult> = args.archives.iter().map(|a| check_one(a)).collect();
    formatter.format_check_results(&results)?;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        return Err(AlreadyReported { failed }.into());
    }
    Ok(())
}
