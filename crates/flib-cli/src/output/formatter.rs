//! Output formatter trait for CLI results.

use anyhow::Result;
use flib_core::ArchiveKind;
use flib_core::ExtractionReport;
use serde::Serialize;
use std::path::Path;

/// Outcome of checking a single archive.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub archive: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A supported archive kind and the suffixes routed to it.
#[derive(Debug, Clone, Serialize)]
pub struct FormatSummary {
    pub name: &'static str,
    pub suffixes: Vec<&'static str>,
}

impl From<ArchiveKind> for FormatSummary {
    fn from(kind: ArchiveKind) -> Self {
        Self {
            name: kind.name(),
            suffixes: kind.suffixes().to_vec(),
        }
    }
}

/// Host details reported by `flib info`.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSummary {
    pub os: String,
    pub posix: bool,
    pub machine: String,
    pub architecture: Option<String>,
    pub pointer_width: u32,
    pub config_dir: Option<String>,
    pub data_dir: Option<String>,
    pub ci: bool,
    pub debug: bool,
    pub verbose: bool,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(
        &self,
        archive: &Path,
        kind: ArchiveKind,
        report: &ExtractionReport,
    ) -> Result<()>;

    /// Format archive check results
    fn format_check_results(&self, results: &[CheckResult]) -> Result<()>;

    /// Format the list of supported formats
    fn format_formats(&self, formats: &[FormatSummary]) -> Result<()>;

    /// Format host information
    fn format_system_info(&self, info: &SystemSummary) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(operation: impl Into<String>, data: T, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: Some(data),
            error: Some(error.into()),
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
