//! Archive extraction and process helpers for tooling.
//!
//! `flib-core` extracts tar (optionally gzip, bzip2, xz or zstd compressed)
//! and zip archives behind a common [`ArchiveExtractor`] contract. Members
//! are checked by an [`ExtractionFilter`] before anything is written, so
//! absolute paths, `..` escapes, links leaving the destination and device
//! files are refused.
//!
//! Alongside extraction the crate carries the small pieces most command line
//! tools need: an [`Environment`] snapshot, [`system`] introspection,
//! [`command`] helpers for wrapping other executables and [`logging`] on top
//! of `tracing`.
//!
//! # Examples
//!
//! ```no_run
//! use flib_core::ExtractOptions;
//! use flib_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_archive("archive.tar.gz", "/output/dir", &ExtractOptions::default())?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```
//!
//! Choosing the extractor explicitly:
//!
//! ```no_run
//! use flib_core::ArchiveExtractor;
//! use flib_core::TarExtractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = TarExtractor::new("release.tgz")?;
//! let destination = extractor.extract("/opt/release")?;
//! # let _ = destination;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod formats;
pub mod logging;
pub mod report;
pub mod security;
pub mod system;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract_archive;
pub use config::ExtractOptions;
pub use environment::Environment;
pub use error::ExtractionError;
pub use error::Result;
pub use formats::ArchiveExtractor;
pub use formats::ArchiveKind;
pub use formats::Extractor;
pub use formats::TarExtractor;
pub use formats::ZipExtractor;
pub use report::ExtractionReport;
pub use security::ExtractionFilter;

// Re-export types module for easier access
pub use types::ArchivePath;
pub use types::DestDir;
pub use types::EntryKind;
pub use types::SafePath;
