//! Error conversion utilities for CLI.
//!
//! Converts flib-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use flib_core::ExtractionError;
use std::fmt;
use std::path::Path;

/// Failure that the formatter has already reported to the user.
///
/// `main` exits non-zero without printing it a second time.
#[derive(Debug)]
pub struct AlreadyReported {
    pub failed: usize,
}

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} archive(s) failed", self.failed)
    }
}

impl std::error::Error for AlreadyReported {}

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::FileNotFound { path } => {
            anyhow!(
                "Archive not found: {}\n\
                 HINT: Check the path and try again.",
                path.display()
            )
        }
        ExtractionError::UnsupportedArchiveType {
            archive: path,
            supported_suffixes,
        } => {
            anyhow!(
                "Unsupported archive '{}'\n\
                 HINT: Supported suffixes: {}. Use --format with --no-strict to override.",
                path.display(),
                supported_suffixes.join(", ")
            )
        }
        ExtractionError::UnsafeExtractionUnsupported { archive: path } => {
            anyhow!(
                "Refusing to extract '{}' without a member filter\n\
                 HINT: Use --filter data (default) or --filter tar.",
                path.display()
            )
        }
        ExtractionError::PathTraversal { path } => {
            anyhow!(
                "Security violation: Archive '{}' attempted path traversal with '{}'\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::LinkEscape { path, target } => {
            anyhow!(
                "Link rejected in '{}': {} -> {}\n\
                 HINT: The link points outside the output directory. \
                 Use --filter tar to keep absolute symlinks (only if trusted source).",
                archive.display(),
                path.display(),
                target.display()
            )
        }
        ExtractionError::SpecialFile { path } => {
            anyhow!(
                "Special file rejected in '{}': {}\n\
                 HINT: Device files, FIFOs and sockets are never extracted.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::SecurityViolation { reason } => {
            anyhow!(
                "Security violation in '{}': {}",
                archive.display(),
                reason
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or malformed.",
                archive.display(),
                reason
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
