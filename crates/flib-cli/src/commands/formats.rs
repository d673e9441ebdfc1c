//! Formats command: list archive kinds and their suffixes.

use crate::output::FormatSummary;
use crate::output::OutputFormatter;
use anyhow::Result;
use flib_core::ArchiveKind;

pub fn execute(formatter: &dyn OutputFormatter) -> Result<()> {
    let formats: Vec<FormatSummary> = ArchiveKind::ALL.iter().copied().map(Into::into).collect();
    formatter.format_formats(&formats)
}
