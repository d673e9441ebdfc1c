//! High-level public API for archive extraction.

use std::path::Path;

use crate::ExtractOptions;
use crate::ExtractionReport;
use crate::Result;
use crate::formats::Extractor;

/// Extracts an archive to the specified output directory.
///
/// The extractor is chosen from the archive's suffix; compression inside the
/// tar family is detected from content.
///
/// # Errors
///
/// Returns an error if:
/// - The archive does not exist or has no supported suffix
/// - No extraction filter is available for a tar archive
/// - A member is rejected by the filter
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use flib_core::ExtractOptions;
/// use flib_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ExtractOptions::default();
/// let report = extract_archive("archive.tar.gz", "/tmp/output", &options)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    Extractor::open(archive_path)?.extract_with(output_dir, options)
}
