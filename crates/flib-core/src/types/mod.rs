//! Validated path types used during extraction.

mod archive_path;
mod dest_dir;
mod entry_kind;
mod safe_path;

pub use archive_path::ArchivePath;
pub use dest_dir::DestDir;
pub use entry_kind::EntryKind;
pub use safe_path::SafePath;

pub(crate) use safe_path::normalize;
pub(crate) use safe_path::real_path;
