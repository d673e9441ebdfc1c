//! Common traits for archive extractors.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractOptions;
use crate::ExtractionReport;
use crate::Result;
use crate::formats::suffix::matches_any;
use crate::types::ArchivePath;

/// An extractor bound to one validated archive.
///
/// Implementors declare the suffixes they accept; construction validates the
/// archive against them and the handle is then used once to extract.
///
/// # Examples
///
/// ```no_run
/// use flib_core::formats::ArchiveExtractor;
/// use flib_core::formats::ZipExtractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// if ZipExtractor::can_extract("bundle.zip") {
///     let out = ZipExtractor::new("bundle.zip")?.extract("out")?;
///     println!("extracted to {}", out.display());
/// }
/// # Ok(())
/// # }
/// ```
pub trait ArchiveExtractor: Sized {
    /// Suffixes accepted by this extractor, most specific first.
    const SUFFIXES: &'static [&'static str];

    /// Short format name used in logs and CLI output.
    const FORMAT_NAME: &'static str;

    /// Wraps an already validated archive.
    fn from_archive(archive: ArchivePath) -> Self;

    /// Returns the archive this extractor was built for.
    fn archive(&self) -> &ArchivePath;

    /// Extracts into `destination` and reports what was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be prepared, the archive
    /// cannot be read, or a member is rejected by the filter.
    fn extract_with(
        &self,
        destination: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<ExtractionReport>;

    /// Returns `true` if `path` exists and ends with one of
    /// [`Self::SUFFIXES`]. Never fails.
    fn can_extract(path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        path.exists() && matches_any(path, Self::SUFFIXES)
    }

    /// Validates `path` and builds an extractor.
    ///
    /// With `strict` unset the suffix check is skipped entirely.
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path is missing; `UnsupportedArchiveType` if
    /// `strict` is set and [`Self::can_extract`] is false.
    fn open(path: impl AsRef<Path>, strict: bool) -> Result<Self> {
        ArchivePath::validate(path.as_ref(), Self::SUFFIXES, strict).map(Self::from_archive)
    }

    /// Same as [`Self::open`] with `strict` set.
    fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, true)
    }

    /// Extracts with default options and returns `destination` as given.
    ///
    /// # Errors
    ///
    /// See [`Self::extract_with`].
    fn extract(&self, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let destination = destination.as_ref();
        self.extract_with(destination, &ExtractOptions::default())?;
        Ok(destination.to_path_buf())
    }
}
