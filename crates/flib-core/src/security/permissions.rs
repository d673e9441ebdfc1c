//! File permission sanitising.

use std::path::Path;

use crate::Result;
use crate::security::ExtractionFilter;
use crate::types::EntryKind;

/// Setuid, setgid and sticky bits plus group/other write.
const STRIPPED_BITS: u32 = 0o7022;
const OWNER_EXEC: u32 = 0o100;
const ANY_EXEC: u32 = 0o111;
const OWNER_RW: u32 = 0o600;

/// Sanitizes the mode stored in the archive for a member of `kind`.
///
/// Both filters clear setuid / setgid / sticky and group/other write. The
/// `data` filter additionally:
/// - forces owner read/write on files and hardlinks
/// - drops every execute bit when the owner has none
/// - returns `None` for directories and symlinks so they get the default
///   permissions of the process
///
/// Members without a stored mode keep `None`.
///
/// # Examples
///
/// ```
/// use flib_core::ExtractionFilter;
/// use flib_core::security::sanitize_mode;
/// use flib_core::types::EntryKind;
///
/// assert_eq!(sanitize_mode(Some(0o4777), &EntryKind::File, ExtractionFilter::Data), Some(0o755));
/// assert_eq!(sanitize_mode(Some(0o444), &EntryKind::File, ExtractionFilter::Data), Some(0o644));
/// assert_eq!(sanitize_mode(Some(0o775), &EntryKind::Directory, ExtractionFilter::Data), None);
/// assert_eq!(sanitize_mode(Some(0o775), &EntryKind::Directory, ExtractionFilter::Tar), Some(0o755));
/// ```
#[must_use]
pub fn sanitize_mode(mode: Option<u32>, kind: &EntryKind, filter: ExtractionFilter) -> Option<u32> {
    let mode = mode? & 0o7777 & !STRIPPED_BITS;
    match filter {
        ExtractionFilter::Tar => Some(mode),
        ExtractionFilter::Data => match kind {
            EntryKind::File | EntryKind::Hardlink { .. } => {
                let mode = if mode & OWNER_EXEC == 0 {
                    mode & !ANY_EXEC
                } else {
                    mode
                };
                Some(mode | OWNER_RW)
            }
            EntryKind::Directory | EntryKind::Symlink { .. } | EntryKind::Special => None,
        },
    }
}

/// Applies `mode` to `path` (Unix only).
///
/// On other platforms permissions are platform-specific and silently skipped.
pub fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}
