//! Archive member kind enumeration.

use std::path::PathBuf;

/// Kind of a member read from an archive, before filtering.
///
/// Link targets are carried verbatim from the archive and have not been
/// validated.
///
/// # Examples
///
/// ```
/// use flib_core::types::EntryKind;
/// use std::path::PathBuf;
///
/// let link = EntryKind::Symlink {
///     target: PathBuf::from("../target"),
/// };
/// assert!(link.is_link());
/// assert!(!EntryKind::Special.is_link());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link.
    Symlink {
        /// The symlink target path (not yet validated).
        target: PathBuf,
    },

    /// Hard link to an earlier member.
    Hardlink {
        /// The hardlink target path (not yet validated).
        target: PathBuf,
    },

    /// Character or block device, FIFO, or any other type that is never
    /// materialised.
    Special,
}

impl EntryKind {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` for symlinks and hardlinks.
    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::Symlink { .. } | Self::Hardlink { .. })
    }

    /// Returns a short lowercase label used in log output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink { .. } => "symlink",
            Self::Hardlink { .. } => "hardlink",
            Self::Special => "special",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_file() {
        let entry = EntryKind::File;
        assert!(entry.is_file());
        assert!(!entry.is_directory());
        assert!(!entry.is_link());
        assert_eq!(entry.label(), "file");
    }

    #[test]
    fn test_entry_kind_directory() {
        let entry = EntryKind::Directory;
        assert!(entry.is_directory());
        assert!(!entry.is_link());
    }

    #[test]
    fn test_entry_kind_links() {
        let symlink = EntryKind::Symlink {
            target: PathBuf::from("../target"),
        };
        let hardlink = EntryKind::Hardlink {
            target: PathBuf::from("original"),
        };
        assert!(symlink.is_link());
        assert!(hardlink.is_link());
        assert_eq!(symlink.label(), "symlink");
        assert_eq!(hardlink.label(), "hardlink");
    }

    #[test]
    fn test_entry_kind_special() {
        assert!(!EntryKind::Special.is_file());
        assert_eq!(EntryKind::Special.label(), "special");
    }
}
