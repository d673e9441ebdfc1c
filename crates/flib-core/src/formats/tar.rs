//! Tar archive extractor.
//!
//! Handles plain tar and tar wrapped in gzip, bzip2, xz or zstd. The codec is
//! sniffed from magic bytes; the suffix only decides whether the extractor
//! accepts the file.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;
use tracing::warn;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::formats::common::EntryWriter;
use crate::formats::compression::CompressionCodec;
use crate::formats::traits::ArchiveExtractor;
use crate::security::EntryFilter;
use crate::types::ArchivePath;
use crate::types::DestDir;
use crate::types::EntryKind;

/// Extractor for the tar family.
///
/// # Examples
///
/// ```no_run
/// use flib_core::formats::ArchiveExtractor;
/// use flib_core::formats::TarExtractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = TarExtractor::new("src.tar.gz")?;
/// let out = extractor.extract("build/src")?;
/// assert!(out.ends_with("src"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarExtractor {
    archive: ArchivePath,
}

impl ArchiveExtractor for TarExtractor {
    const SUFFIXES: &'static [&'static str] = &[
        ".tar", ".tar.gz", ".tgz", ".gz", ".gzip", ".tar.bz2", ".tbz2", ".bz2", ".tar.xz",
        ".txz", ".xz", ".tar.zst", ".tzst", ".zst",
    ];
    const FORMAT_NAME: &'static str = "tar";

    fn from_archive(archive: ArchivePath) -> Self {
        Self { archive }
    }

    fn archive(&self) -> &ArchivePath {
        &self.archive
    }

    fn extract_with(
        &self,
        destination: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<ExtractionReport> {
        let Some(policy) = options.filter else {
            return Err(ExtractionError::UnsafeExtractionUnsupported {
                archive: self.archive.as_path().to_path_buf(),
            });
        };

        let start = Instant::now();
        let dest = DestDir::prepare(destination.as_ref(), options.create_destination)?;

        let mut file = File::open(self.archive.as_path())?;
        let codec = CompressionCodec::detect(&mut file)?;
        debug!(
            archive = %self.archive,
            destination = %dest.as_path().display(),
            codec = codec.map_or("none", CompressionCodec::name),
            filter = %policy,
            "extracting tar archive"
        );

        let mut archive = tar::Archive::new(CompressionCodec::decoder(codec, file));
        let filter = EntryFilter::new(policy, options, &dest);
        let mut writer = EntryWriter::new(&dest, options.overwrite);

        for entry in archive.entries().map_err(invalid_archive)? {
            let mut entry = entry.map_err(invalid_archive)?;
            let header = entry.header();
            let entry_type = header.entry_type();

            if is_bookkeeping(entry_type) {
                writer.skip(None);
                continue;
            }

            let path = entry.path().map_err(invalid_archive)?.into_owned();
            let kind = entry_kind(entry_type, entry.link_name().map_err(invalid_archive)?)?;
            let mode = header.mode().ok();

            let validated = filter.validate_entry(&path, &kind, mode).inspect_err(|err| {
                warn!(member = %path.display(), kind = kind.label(), %err, "member rejected");
            })?;
            writer.write(&validated, &mut entry)?;
        }

        let mut report = writer.finish()?;
        report.duration = start.elapsed();
        debug!(
            files = report.files_extracted,
            directories = report.directories_created,
            bytes = report.bytes_written,
            "tar extraction complete"
        );
        Ok(report)
    }
}

impl TarExtractor {
    /// Returns the codec detected from the archive's leading bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or read.
    pub fn compression(&self) -> Result<Option<CompressionCodec>> {
        let mut file = File::open(self.archive.as_path())?;
        CompressionCodec::detect(&mut file)
    }
}

impl fmt::Display for TarExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.archive, f)
    }
}

/// PAX and GNU long-name records carry metadata for the next member.
fn is_bookkeeping(entry_type: tar::EntryType) -> bool {
    matches!(
        entry_type,
        tar::EntryType::XHeader
            | tar::EntryType::XGlobalHeader
            | tar::EntryType::GNULongName
            | tar::EntryType::GNULongLink
    )
}

fn entry_kind(
    entry_type: tar::EntryType,
    link_name: Option<std::borrow::Cow<'_, Path>>,
) -> Result<EntryKind> {
    let link_target = || -> Result<PathBuf> {
        link_name
            .as_deref()
            .map(Path::to_path_buf)
            .ok_or_else(|| ExtractionError::InvalidArchive("link member without target".into()))
    };

    Ok(match entry_type {
        tar::EntryType::Regular | tar::EntryType::Continuous | tar::EntryType::GNUSparse => {
            EntryKind::File
        }
        tar::EntryType::Directory => EntryKind::Directory,
        tar::EntryType::Symlink => EntryKind::Symlink {
            target: link_target()?,
        },
        tar::EntryType::Link => EntryKind::Hardlink {
            target: link_target()?,
        },
        _ => EntryKind::Special,
    })
}

fn invalid_archive(err: std::io::Error) -> ExtractionError {
    ExtractionError::InvalidArchive(err.to_string())
}

/// Reads the whole archive stream once without writing anything.
///
/// Used by `flib check` to confirm an archive can be decoded.
///
/// # Errors
///
/// Returns `InvalidArchive` if the stream cannot be decoded.
pub fn verify_stream(archive: &ArchivePath) -> Result<usize> {
    let mut file = File::open(archive.as_path())?;
    let codec = CompressionCodec::detect(&mut file)?;
    let mut reader = tar::Archive::new(CompressionCodec::decoder(codec, file));
    let mut count = 0;
    for entry in reader.entries().map_err(invalid_archive)? {
        let mut entry = entry.map_err(invalid_archive)?;
        std::io::copy(&mut entry, &mut std::io::sink()).map_err(invalid_archive)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ExtractionFilter;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::gz;
    use crate::test_utils::write_archive;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_suffixes() {
        assert!(TarExtractor::SUFFIXES.contains(&".tar.gz"));
        assert!(TarExtractor::SUFFIXES.contains(&".gzip"));
        assert!(!TarExtractor::SUFFIXES.contains(&".zip"));
        assert_eq!(TarExtractor::FORMAT_NAME, "tar");
    }

    #[test]
    fn test_extract_plain_tar() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("dir/")
            .add_file("dir/hello.txt", b"hi")
            .build();
        let archive = write_archive(temp.path(), "src.tar", &data);
        let out = temp.path().join("out");

        let report = TarExtractor::new(&archive)
            .unwrap()
            .extract_with(&out, &ExtractOptions::default())
            .unwrap();

        assert_eq!(fs::read(out.join("dir/hello.txt")).unwrap(), b"hi");
        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.bytes_written, 2);
    }

    #[test]
    fn test_extract_gzip_sniffed_not_suffix() {
        let temp = TempDir::new().unwrap();
        let data = gz(&TarTestBuilder::new().add_file("a.txt", b"gz").build());
        // Compressed content behind a plain `.tar` suffix.
        let archive = write_archive(temp.path(), "src.tar", &data);

        let extractor = TarExtractor::new(&archive).unwrap();
        assert_eq!(extractor.compression().unwrap(), Some(CompressionCodec::Gzip));

        let out = extractor.extract(temp.path().join("out")).unwrap();
        assert_eq!(fs::read(out.join("a.txt")).unwrap(), b"gz");
    }

    #[test]
    fn test_unfiltered_refused_before_destination() {
        let temp = TempDir::new().unwrap();
        let data = gz(&TarTestBuilder::new().add_file("a.txt", b"x").build());
        let archive = write_archive(temp.path(), "src.tar.gz", &data);
        let out = temp.path().join("out");

        let err = TarExtractor::new(&archive)
            .unwrap()
            .extract_with(&out, &ExtractOptions::unfiltered())
            .unwrap_err();

        assert!(matches!(err, ExtractionError::UnsafeExtractionUnsupported { ref archive } if archive.ends_with("src.tar.gz")));
        assert!(!out.exists());
    }

    #[test]
    fn test_traversal_member_rejected() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_raw_name("../escape.txt", b"evil")
            .build();
        let archive = write_archive(temp.path(), "evil.tar", &data);
        let out = temp.path().join("out");

        let err = TarExtractor::new(&archive).unwrap().extract(&out).unwrap_err();
        assert!(matches!(err, ExtractionError::PathTraversal { .. }));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_absolute_member_stripped() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_raw_name("/etc/motd", b"hello")
            .build();
        let archive = write_archive(temp.path(), "abs.tar", &data);
        let out = temp.path().join("out");

        TarExtractor::new(&archive).unwrap().extract(&out).unwrap();
        assert_eq!(fs::read(out.join("etc/motd")).unwrap(), b"hello");
    }

    #[test]
    fn test_symlink_escape_rejected_by_data_filter() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_symlink("link", "../../etc/passwd")
            .build();
        let archive = write_archive(temp.path(), "link.tar", &data);

        let err = TarExtractor::new(&archive)
            .unwrap()
            .extract(temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::LinkEscape { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_absolute_allowed_by_tar_filter() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_symlink("link", "/etc/hostname")
            .build();
        let archive = write_archive(temp.path(), "link.tar", &data);
        let out = temp.path().join("out");

        let options = ExtractOptions::default().with_filter(ExtractionFilter::Tar);
        let report = TarExtractor::new(&archive)
            .unwrap()
            .extract_with(&out, &options)
            .unwrap();

        assert_eq!(report.symlinks_created, 1);
        assert_eq!(
            fs::read_link(out.join("link")).unwrap(),
            PathBuf::from("/etc/hostname")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_permissions_sanitized() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file_with_mode("suid.sh", b"#!/bin/sh", 0o4777)
            .add_file_with_mode("readonly.txt", b"r", 0o444)
            .build();
        let archive = write_archive(temp.path(), "perm.tar", &data);
        let out = TarExtractor::new(&archive)
            .unwrap()
            .extract(temp.path().join("out"))
            .unwrap();

        let mode = |name: &str| fs::metadata(out.join(name)).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode("suid.sh"), 0o755);
        assert_eq!(mode("readonly.txt"), 0o644);
    }

    #[test]
    fn test_special_member_rejected() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new().add_fifo("pipe").build();
        let archive = write_archive(temp.path(), "fifo.tar", &data);

        let err = TarExtractor::new(&archive)
            .unwrap()
            .extract(temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::SpecialFile { .. }));
    }

    #[test]
    fn test_hardlink_extracted() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("original.txt", b"shared")
            .add_hardlink("copy.txt", "original.txt")
            .build();
        let archive = write_archive(temp.path(), "links.tar", &data);

        let report = TarExtractor::new(&archive)
            .unwrap()
            .extract_with(temp.path().join("out"), &ExtractOptions::default())
            .unwrap();

        assert_eq!(report.hardlinks_created, 1);
        assert_eq!(
            fs::read(temp.path().join("out/copy.txt")).unwrap(),
            b"shared"
        );
    }

    #[test]
    fn test_missing_destination_without_create() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new().add_file("a.txt", b"x").build();
        let archive = write_archive(temp.path(), "a.tar", &data);

        let options = ExtractOptions::default().with_create_destination(false);
        let err = TarExtractor::new(&archive)
            .unwrap()
            .extract_with(temp.path().join("missing"), &options)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn test_corrupt_archive() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(temp.path(), "bad.tar.gz", &[0x1F, 0x8B, 0x00, 0x01, 0x02]);

        let err = TarExtractor::new(&archive)
            .unwrap()
            .extract(temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidArchive(_)));
    }

    #[test]
    fn test_verify_stream() {
        let temp = TempDir::new().unwrap();
        let data = gz(
            &TarTestBuilder::new()
                .add_file("a.txt", b"a")
                .add_file("b.txt", b"b")
                .build(),
        );
        let archive = write_archive(temp.path(), "v.tgz", &data);
        let archive = ArchivePath::validate(&archive, TarExtractor::SUFFIXES, true).unwrap();

        assert_eq!(verify_stream(&archive).unwrap(), 2);
    }

    #[test]
    fn test_display() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(temp.path(), "d.tar", &TarTestBuilder::new().build());
        let extractor = TarExtractor::new(&archive).unwrap();
        assert_eq!(extractor.to_string(), archive.display().to_string());
    }
}
