//! Suffix-based dispatch between the supported extractors.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::formats::suffix::has_suffix;
use crate::formats::tar::TarExtractor;
use crate::formats::traits::ArchiveExtractor;
use crate::formats::zip::ZipExtractor;
use crate::types::ArchivePath;

/// Union of every extractor's suffixes, reported when nothing matches.
static ALL_SUFFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    ArchiveKind::ALL
        .iter()
        .flat_map(|kind| kind.suffixes().iter().copied())
        .collect()
});

/// Supported archive families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Tar, optionally compressed.
    Tar,
    /// Zip.
    Zip,
}

impl ArchiveKind {
    /// Every kind, in dispatch order.
    pub const ALL: [Self; 2] = [Self::Tar, Self::Zip];

    /// Suffixes accepted for this kind.
    #[must_use]
    pub const fn suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Tar => TarExtractor::SUFFIXES,
            Self::Zip => ZipExtractor::SUFFIXES,
        }
    }

    /// Short format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => TarExtractor::FORMAT_NAME,
            Self::Zip => ZipExtractor::FORMAT_NAME,
        }
    }

    /// Picks the kind whose longest matching suffix is longest.
    ///
    /// Purely lexical: the file does not need to exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use flib_core::formats::ArchiveKind;
    ///
    /// assert_eq!(ArchiveKind::detect("src.tar.gz"), Some(ArchiveKind::Tar));
    /// assert_eq!(ArchiveKind::detect("bundle.zip"), Some(ArchiveKind::Zip));
    /// assert_eq!(ArchiveKind::detect("notes.txt"), None);
    /// ```
    #[must_use]
    pub fn detect(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        Self::ALL
            .iter()
            .filter_map(|kind| {
                kind.suffixes()
                    .iter()
                    .filter(|suffix| has_suffix(path, suffix))
                    .map(|suffix| (suffix.len(), *kind))
                    .max_by_key(|(len, _)| *len)
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, kind)| kind)
    }

    /// Union of the suffixes of every kind.
    #[must_use]
    pub fn all_suffixes() -> &'static [&'static str] {
        &ALL_SUFFIXES
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArchiveKind {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ExtractionError::InvalidArchive(format!("unknown archive kind: {s}")))
    }
}

/// An extractor for any supported kind.
///
/// # Examples
///
/// ```no_run
/// use flib_core::formats::Extractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = Extractor::open("dist/src.tar.gz")?;
/// println!("{} archive at {extractor}", extractor.kind());
/// extractor.extract("build")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extractor {
    /// Tar family.
    Tar(TarExtractor),
    /// Zip.
    Zip(ZipExtractor),
}

impl Extractor {
    /// Picks an extractor from the path's suffix.
    ///
    /// # Errors
    ///
    /// `FileNotFound` for missing paths; `UnsupportedArchiveType` carrying
    /// every supported suffix when no kind matches.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExtractionError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let kind = ArchiveKind::detect(path).ok_or_else(|| {
            ExtractionError::UnsupportedArchiveType {
                archive: path.to_path_buf(),
                supported_suffixes: ALL_SUFFIXES.clone(),
            }
        })?;
        debug!(archive = %path.display(), %kind, "dispatching archive");
        Self::open_as(kind, path, true)
    }

    /// Builds the extractor for `kind`, bypassing suffix detection.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveExtractor::open`] for the chosen kind.
    pub fn open_as(kind: ArchiveKind, path: impl AsRef<Path>, strict: bool) -> Result<Self> {
        Ok(match kind {
            ArchiveKind::Tar => Self::Tar(TarExtractor::open(path, strict)?),
            ArchiveKind::Zip => Self::Zip(ZipExtractor::open(path, strict)?),
        })
    }

    /// Returns the kind of this extractor.
    #[must_use]
    pub const fn kind(&self) -> ArchiveKind {
        match self {
            Self::Tar(_) => ArchiveKind::Tar,
            Self::Zip(_) => ArchiveKind::Zip,
        }
    }

    /// Returns the archive handle.
    #[must_use]
    pub fn archive(&self) -> &ArchivePath {
        match self {
            Self::Tar(inner) => inner.archive(),
            Self::Zip(inner) => inner.archive(),
        }
    }

    /// Extracts with `options`.
    ///
    /// # Errors
    ///
    /// See [`ArchiveExtractor::extract_with`].
    pub fn extract_with(
        &self,
        destination: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<ExtractionReport> {
        match self {
            Self::Tar(inner) => inner.extract_with(destination, options),
            Self::Zip(inner) => inner.extract_with(destination, options),
        }
    }

    /// Extracts with default options and returns the destination.
    ///
    /// # Errors
    ///
    /// See [`ArchiveExtractor::extract`].
    pub fn extract(&self, destination: impl AsRef<Path>) -> Result<std::path::PathBuf> {
        match self {
            Self::Tar(inner) => inner.extract(destination),
            Self::Zip(inner) => inner.extract(destination),
        }
    }

    /// Decodes the whole archive without writing anything and returns the
    /// number of members.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchive` if the archive cannot be decoded.
    pub fn verify(&self) -> Result<usize> {
        match self {
            Self::Tar(inner) => crate::formats::tar::verify_stream(inner.archive()),
            Self::Zip(inner) => inner.verify_members(),
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.archive(), f)
    }
}

impl From<TarExtractor> for Extractor {
    fn from(inner: TarExtractor) -> Self {
        Self::Tar(inner)
    }
}

impl From<ZipExtractor> for Extractor {
    fn from(inner: ZipExtractor) -> Self {
        Self::Zip(inner)
    }
}
