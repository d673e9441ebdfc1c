//! JSON output formatter for machine-readable results.

use super::formatter::CheckResult;
use super::formatter::FormatSummary;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::SystemSummary;
use anyhow::Result;
use flib_core::ArchiveKind;
use flib_core::ExtractionReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExtractionOutput {
    archive: String,
    format: &'static str,
    destination: String,
    files_extracted: usize,
    directories_created: usize,
    symlinks_created: usize,
    hardlinks_created: usize,
    entries_skipped: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl ExtractionOutput {
    fn new(archive: &Path, kind: ArchiveKind, report: &ExtractionReport) -> Self {
        Self {
            archive: archive.display().to_string(),
            format: kind.name(),
            destination: report.destination.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            symlinks_created: report.symlinks_created,
            hardlinks_created: report.hardlinks_created,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        archive: &Path,
        kind: ArchiveKind,
        report: &ExtractionReport,
    ) -> Result<()> {
        let output = JsonOutput::success("extract", ExtractionOutput::new(archive, kind, report));
        Self::output(&output)
    }

    fn format_check_results(&self, results: &[CheckResult]) -> Result<()> {
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        if failed == 0 {
            Self::output(&JsonOutput::success("check", results))
        } else {
            Self::output(&JsonOutput::failure(
                "check",
                results,
                format!("{failed} of {} archives failed", results.len()),
            ))
        }
    }

    fn format_formats(&self, formats: &[FormatSummary]) -> Result<()> {
        Self::output(&JsonOutput::success("formats", formats))
    }

    fn format_system_info(&self, info: &SystemSummary) -> Result<()> {
        Self::output(&JsonOutput::success("info", info))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
