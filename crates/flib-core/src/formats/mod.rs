//! Archive format implementations.

pub(crate) mod common;
pub mod compression;
pub mod detect;
pub mod suffix;
pub mod tar;
pub mod traits;
pub mod zip;

pub use detect::ArchiveKind;
pub use detect::Extractor;
pub use tar::TarExtractor;
pub use traits::ArchiveExtractor;
pub use zip::ZipExtractor;
