//! Error types for archive extraction operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while opening or extracting an archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The archive path does not exist.
    #[error("archive not found: {}", .path.display())]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The archive suffix is not handled by the extractor.
    #[error(
        "{} does not have a suffix supported by this extractor ({})",
        .archive.display(),
        .supported_suffixes.join(", ")
    )]
    UnsupportedArchiveType {
        /// The rejected archive.
        archive: PathBuf,
        /// Every suffix the extractor accepts.
        supported_suffixes: Vec<&'static str>,
    },

    /// No extraction filter is available, so extraction was refused.
    #[error(
        "refusing to extract {}: no safe extraction filter is available",
        .archive.display()
    )]
    UnsafeExtractionUnsupported {
        /// The archive that was not extracted.
        archive: PathBuf,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Member path is absolute or escapes the destination.
    #[error("path traversal detected: {}", .path.display())]
    PathTraversal {
        /// The offending member path.
        path: PathBuf,
    },

    /// Link member points outside the destination or to an absolute path.
    #[error("link target outside extraction directory: {} -> {}", .path.display(), .target.display())]
    LinkEscape {
        /// The link member path.
        path: PathBuf,
        /// The link target as stored in the archive.
        target: PathBuf,
    },

    /// Device nodes, FIFOs and other special members are refused.
    #[error("special file rejected: {}", .path.display())]
    SpecialFile {
        /// The special member path.
        path: PathBuf,
    },

    /// Operation not permitted by the extraction filter.
    #[error("operation denied by extraction filter: {reason}")]
    SecurityViolation {
        /// Reason for the violation.
        reason: String,
    },
}

impl ExtractionError {
    /// Returns `true` if the extraction filter rejected a member.
    ///
    /// # Examples
    ///
    /// ```
    /// use flib_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::InvalidArchive("truncated".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. }
                | Self::LinkEscape { .. }
                | Self::SpecialFile { .. }
                | Self::SecurityViolation { .. }
        )
    }

    /// Returns `true` for errors raised while validating an archive handle,
    /// before any extraction was attempted.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::UnsupportedArchiveType { .. }
        )
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::SecurityViolation { reason } => Some(reason),
            _ => None,
        }
    }
}
