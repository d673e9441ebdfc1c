//! Validated destination directory type.

use crate::ExtractionError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// A validated destination directory for archive extraction.
///
/// This type represents a directory that has been validated to:
/// - Exist on the filesystem (optionally after being created)
/// - Be a directory (not a file)
/// - Be writable by the current process
/// - Be represented as an absolute canonical path
///
/// Member paths are always checked against the canonical form, so a
/// destination reached through a symlink still confines extraction to the
/// real directory.
///
/// # Examples
///
/// ```no_run
/// use flib_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::prepare("/tmp/extraction", true)?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Validates an existing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    /// - The directory is not writable (on Unix)
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::prepare(path, false)
    }

    /// Validates `path`, creating it and any missing parents first when
    /// `create` is set.
    ///
    /// # Errors
    ///
    /// Same as [`DestDir::new`], plus any error from creating the directory.
    pub fn prepare(path: impl Into<PathBuf>, create: bool) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if !create {
                return Err(ExtractionError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("destination directory does not exist: {}", path.display()),
                )));
            }
            std::fs::create_dir_all(&path)?;
        }

        if !path.is_dir() {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ExtractionError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", path.display(), e),
            ))
        })?;

        check_writable(&canonical)?;

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a `SafePath` to this destination directory.
    #[inline]
    #[must_use]
    pub fn join(&self, safe_path: &super::SafePath) -> PathBuf {
        self.0.join(safe_path.as_path())
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

/// Uses `access(2)` so effective uid, ACLs and read-only mounts are honoured.
#[cfg(unix)]
fn check_writable(canonical: &Path) -> Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstring = CString::new(canonical.as_os_str().as_bytes()).map_err(|_| {
        ExtractionError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path contains null byte",
        ))
    })?;

    // SAFETY: `path_cstring` is a valid NUL-terminated string that outlives
    // the call, and access() does not retain the pointer.
    #[allow(unsafe_code)]
    let result = unsafe { libc::access(path_cstring.as_ptr(), libc::W_OK) };

    if result != 0 {
        return Err(ExtractionError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("directory is not writable: {}", canonical.display()),
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_writable(canonical: &Path) -> Result<()> {
    let metadata = std::fs::metadata(canonical)?;
    if metadata.permissions().readonly() {
        return Err(ExtractionError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("directory is not writable: {}", canonical.display()),
        )));
    }
    Ok(())
}
