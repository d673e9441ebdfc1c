//! Member paths approved by the extraction filter.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;

use super::DestDir;

/// A relative member path that stays inside the destination directory.
///
/// `SafePath` can only be constructed through [`SafePath::validate`]; there is
/// no `From<PathBuf>`.
///
/// Validation mirrors the `data` extraction filter:
/// - leading `/` separators are stripped, so `/etc/motd` becomes `etc/motd`
/// - drive prefixes are rejected as absolute paths
/// - `.` components are dropped and `..` is resolved lexically; any `..`
///   that would climb above the destination is rejected
/// - the existing part of the parent chain is canonicalized so a symlink
///   planted by an earlier member cannot redirect a write outside the
///   destination, however far up the chain it sits
///
/// # Examples
///
/// ```no_run
/// use flib_core::types::DestDir;
/// use flib_core::types::SafePath;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp")?;
///
/// let safe = SafePath::validate(Path::new("/foo/./bar.txt"), &dest, 32)?;
/// assert_eq!(safe.as_path(), Path::new("foo/bar.txt"));
///
/// assert!(SafePath::validate(Path::new("../etc/passwd"), &dest, 32).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates `path` against `dest`.
    ///
    /// # Errors
    ///
    /// - `PathTraversal` for drive-prefixed paths, `..` escapes, empty names
    ///   and paths that resolve outside `dest` through existing symlinks.
    /// - `SecurityViolation` when the normalized depth exceeds `max_depth`.
    pub fn validate(path: &Path, dest: &DestDir, max_depth: usize) -> Result<Self> {
        let normalized = normalize(path).ok_or_else(|| ExtractionError::PathTraversal {
            path: path.to_path_buf(),
        })?;

        let depth = normalized.components().count();
        if depth == 0 {
            return Err(ExtractionError::PathTraversal {
                path: path.to_path_buf(),
            });
        }
        if depth > max_depth {
            return Err(ExtractionError::SecurityViolation {
                reason: format!("path depth {depth} exceeds maximum {max_depth}"),
            });
        }

        // Every existing ancestor is resolved, not only the direct parent.
        let resolved = dest.as_path().join(&normalized);
        if let Some(parent) = resolved.parent() {
            if !real_path(parent).starts_with(dest.as_path()) {
                return Err(ExtractionError::PathTraversal {
                    path: path.to_path_buf(),
                });
            }
        }

        Ok(Self(normalized))
    }

    /// Returns the relative path as a `&Path`.
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

/// Lexically normalizes an archive member path.
///
/// Strips leading root separators, drops `.` and resolves `..` against the
/// components seen so far. Returns `None` when the path carries a drive
/// prefix or a `..` climbs above the start.
pub(crate) fn normalize(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) => return None,
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    Some(normalized)
}

/// Canonicalizes the deepest existing ancestor of `path` and re-appends the
/// components that do not exist yet.
pub(crate) fn real_path(path: &Path) -> PathBuf {
    let mut existing = path.to_path_buf();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match existing.file_name() {
            Some(name) => {
                missing.push(name.to_os_string());
                existing.pop();
            }
            None => return path.to_path_buf(),
        }
    }
}
