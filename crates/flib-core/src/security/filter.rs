//! Extraction filters applied to every archive member.
//!
//! This module provides the `EntryFilter` type that turns a raw member
//! (path, kind, mode) into a [`ValidatedEntry`] or rejects it.

use std::fmt;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::Result;
use crate::security::permissions::sanitize_mode;
use crate::types::DestDir;
use crate::types::EntryKind;
use crate::types::SafePath;
use crate::types::normalize;
use crate::types::real_path;

/// Member filter policy.
///
/// # Examples
///
/// ```
/// use flib_core::ExtractionFilter;
///
/// let filter: ExtractionFilter = "tar".parse().unwrap();
/// assert_eq!(filter, ExtractionFilter::Tar);
/// assert_eq!(ExtractionFilter::default().name(), "data");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtractionFilter {
    /// Strict policy for untrusted data archives.
    ///
    /// Rejects absolute and escaping paths, special files, absolute link
    /// targets and links resolving outside the destination; normalizes file
    /// permissions.
    #[default]
    Data,

    /// Unix-tar-like policy.
    ///
    /// Same path rules and high-bit stripping, but symlink targets are kept
    /// as stored.
    Tar,
}

impl ExtractionFilter {
    /// Every filter, in declaration order.
    pub const ALL: [Self; 2] = [Self::Data, Self::Tar];

    /// Returns the filter name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Tar => "tar",
        }
    }
}

impl fmt::Display for ExtractionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtractionFilter {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "data" => Ok(Self::Data),
            "tar" => Ok(Self::Tar),
            other => Err(ExtractionError::SecurityViolation {
                reason: format!("unknown extraction filter: {other}"),
            }),
        }
    }
}

/// A member that passed the filter and may be written.
#[derive(Debug)]
pub struct ValidatedEntry {
    /// Path relative to the destination.
    pub safe_path: SafePath,

    /// What to write.
    pub kind: ValidatedKind,

    /// Sanitized permissions, `None` for process defaults.
    pub mode: Option<u32>,
}

/// Validated member kinds.
#[derive(Debug)]
pub enum ValidatedKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symlink with the target to store verbatim.
    Symlink {
        /// Link target as it will be written.
        target: PathBuf,
    },

    /// Hardlink to an already validated member path.
    Hardlink {
        /// Link source inside the destination.
        target: SafePath,
    },
}

/// Applies an [`ExtractionFilter`] to members bound for one destination.
///
/// # Examples
///
/// ```no_run
/// use flib_core::ExtractOptions;
/// use flib_core::ExtractionFilter;
/// use flib_core::security::EntryFilter;
/// use flib_core::types::DestDir;
/// use flib_core::types::EntryKind;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp")?;
/// let options = ExtractOptions::default();
/// let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);
///
/// let entry = filter.validate_entry(Path::new("foo/bar.txt"), &EntryKind::File, Some(0o4755))?;
/// assert_eq!(entry.mode, Some(0o755));
/// # Ok(())
/// # }
/// ```
pub struct EntryFilter<'a> {
    filter: ExtractionFilter,
    options: &'a ExtractOptions,
    dest: &'a DestDir,
}

impl<'a> EntryFilter<'a> {
    /// Creates a filter bound to `dest`.
    #[must_use]
    pub fn new(filter: ExtractionFilter, options: &'a ExtractOptions, dest: &'a DestDir) -> Self {
        Self {
            filter,
            options,
            dest,
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> ExtractionFilter {
        self.filter
    }

    /// Validates one member.
    ///
    /// # Errors
    ///
    /// - `PathTraversal` / `SecurityViolation` from path validation
    /// - `SpecialFile` for devices, FIFOs and unknown member types
    /// - `LinkEscape` for link targets the policy refuses
    pub fn validate_entry(
        &self,
        path: &Path,
        kind: &EntryKind,
        mode: Option<u32>,
    ) -> Result<ValidatedEntry> {
        let safe_path = SafePath::validate(path, self.dest, self.options.max_path_depth)?;

        let validated_kind = match kind {
            EntryKind::File => ValidatedKind::File,
            EntryKind::Directory => ValidatedKind::Directory,
            EntryKind::Special => {
                return Err(ExtractionError::SpecialFile {
                    path: path.to_path_buf(),
                });
            }
            EntryKind::Symlink { target } => {
                if self.filter == ExtractionFilter::Data {
                    self.check_symlink_target(path, &safe_path, target)?;
                }
                ValidatedKind::Symlink {
                    target: target.clone(),
                }
            }
            EntryKind::Hardlink { target } => ValidatedKind::Hardlink {
                target: self.check_hardlink_target(path, target)?,
            },
        };

        Ok(ValidatedEntry {
            safe_path,
            kind: validated_kind,
            mode: sanitize_mode(mode, kind, self.filter),
        })
    }

    /// Symlink targets are relative to the link's directory.
    fn check_symlink_target(&self, path: &Path, safe_path: &SafePath, target: &Path) -> Result<()> {
        let escape = || ExtractionError::LinkEscape {
            path: path.to_path_buf(),
            target: target.to_path_buf(),
        };

        if is_absolute_like(target) {
            return Err(escape());
        }

        let base = safe_path.as_path().parent().unwrap_or_else(|| Path::new(""));
        normalize(&base.join(target)).ok_or_else(escape)?;

        // Links written by earlier members take part in the resolution. A `..`
        // may only leave a component of the target that is already a real
        // directory.
        let mut resolved = real_path(&self.dest.as_path().join(base));
        let mut pushed = 0usize;
        for component in target.components() {
            match component {
                Component::ParentDir if pushed > 0 => {
                    let is_real_dir = std::fs::symlink_metadata(&resolved)
                        .is_ok_and(|metadata| metadata.is_dir());
                    if !is_real_dir {
                        return Err(escape());
                    }
                    pushed -= 1;
                    resolved.pop();
                }
                Component::ParentDir => {
                    resolved = real_path(&resolved);
                    resolved.pop();
                }
                Component::Normal(part) => {
                    pushed += 1;
                    resolved.push(part);
                }
                _ => {}
            }
        }
        if !real_path(&resolved).starts_with(self.dest.as_path()) {
            return Err(escape());
        }
        Ok(())
    }

    /// Hardlink targets name an earlier member, relative to the archive root.
    fn check_hardlink_target(&self, path: &Path, target: &Path) -> Result<SafePath> {
        let escape = || ExtractionError::LinkEscape {
            path: path.to_path_buf(),
            target: target.to_path_buf(),
        };

        if self.filter == ExtractionFilter::Data && is_absolute_like(target) {
            return Err(escape());
        }
        SafePath::validate(target, self.dest, self.options.max_path_depth).map_err(|_| escape())
    }
}

fn is_absolute_like(path: &Path) -> bool {
    path.is_absolute() || path.has_root()
}
