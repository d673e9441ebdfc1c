//! Validated archive handle.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;
use crate::formats::suffix::matches_any;

/// Path to an archive that existed when the handle was created.
///
/// An `ArchivePath` is only produced by [`ArchivePath::validate`], which
/// checks that the path exists and, in strict mode, that its file name ends
/// with one of the accepted suffixes. The handle is immutable afterwards.
///
/// # Examples
///
/// ```no_run
/// use flib_core::types::ArchivePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = ArchivePath::validate("dist/src.tar.gz", &[".tar.gz"], true)?;
/// assert!(archive.as_path().ends_with("src.tar.gz"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchivePath(PathBuf);

impl ArchivePath {
    /// Validates `path` against `suffixes`.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the path does not exist.
    /// - `UnsupportedArchiveType` if `strict` is set and no suffix matches.
    pub fn validate(
        path: impl Into<PathBuf>,
        suffixes: &'static [&'static str],
        strict: bool,
    ) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ExtractionError::FileNotFound { path });
        }
        if strict && !matches_any(&path, suffixes) {
            return Err(ExtractionError::UnsupportedArchiveType {
                archive: path,
                supported_suffixes: suffixes.to_vec(),
            });
        }
        Ok(Self(path))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ArchivePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
