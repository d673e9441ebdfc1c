//! Zip archive extractor.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
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
use crate::formats::common::member_read_error;
use crate::formats::traits::ArchiveExtractor;
use crate::security::EntryFilter;
use crate::types::ArchivePath;
use crate::types::DestDir;
use crate::types::EntryKind;

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;
const S_IFREG: u32 = 0o100_000;
const S_IFDIR: u32 = 0o040_000;

/// Extractor for zip archives.
///
/// Zip members are always run through a filter: when the options carry no
/// filter the `data` policy is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipExtractor {
    archive: ArchivePath,
}

impl ArchiveExtractor for ZipExtractor {
    const SUFFIXES: &'static [&'static str] = &[".zip"];
    const FORMAT_NAME: &'static str = "zip";

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
        let start = Instant::now();
        let policy = options.filter_or_data();
        let mut archive = self.open_archive()?;
        let dest = DestDir::prepare(destination.as_ref(), options.create_destination)?;

        debug!(
            archive = %self.archive,
            destination = %dest.as_path().display(),
            members = archive.len(),
            filter = %policy,
            "extracting zip archive"
        );

        let filter = EntryFilter::new(policy, options, &dest);
        let mut writer = EntryWriter::new(&dest, options.overwrite);

        for index in 0..archive.len() {
            let mut file = archive.by_index(index).map_err(invalid_archive)?;
            let path = PathBuf::from(file.name());
            let kind = zip_entry_kind(&mut file)?;

            let validated = filter
                .validate_entry(&path, &kind, file.unix_mode())
                .inspect_err(|err| {
                    warn!(member = %path.display(), kind = kind.label(), %err, "member rejected");
                })?;
            writer.write(&validated, &mut file)?;
        }

        let mut report = writer.finish()?;
        report.duration = start.elapsed();
        debug!(
            files = report.files_extracted,
            directories = report.directories_created,
            bytes = report.bytes_written,
            "zip extraction complete"
        );
        Ok(report)
    }
}

impl ZipExtractor {
    fn open_archive(&self) -> Result<zip::ZipArchive<BufReader<File>>> {
        let file = File::open(self.archive.as_path())?;
        zip::ZipArchive::new(BufReader::new(file)).map_err(invalid_archive)
    }

    /// Decompresses every member into a sink and returns the member count.
    ///
    /// Checksums are verified as each member is read to the end.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchive` for a malformed archive or a member whose
    /// data does not decode or match its checksum.
    pub fn verify_members(&self) -> Result<usize> {
        let mut archive = self.open_archive()?;
        for index in 0..archive.len() {
            let mut file = archive.by_index(index).map_err(invalid_archive)?;
            std::io::copy(&mut file, &mut std::io::sink())
                .map_err(|err| member_read_error(Path::new(file.name()), err))?;
        }
        Ok(archive.len())
    }
}

impl fmt::Display for ZipExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.archive, f)
    }
}

/// Classifies a member from its directory flag and Unix mode. Symlink
/// targets are stored as the member's contents.
fn zip_entry_kind<R: Read + Seek>(file: &mut zip::read::ZipFile<'_, R>) -> Result<EntryKind> {
    if file.is_dir() {
        return Ok(EntryKind::Directory);
    }

    match file.unix_mode().map(|mode| mode & S_IFMT) {
        None | Some(0 | S_IFREG) => Ok(EntryKind::File),
        Some(S_IFDIR) => Ok(EntryKind::Directory),
        Some(S_IFLNK) => {
            let mut target = String::new();
            file.read_to_string(&mut target)
                .map_err(|err| member_read_error(Path::new(file.name()), err))?;
            Ok(EntryKind::Symlink {
                target: PathBuf::from(target),
            })
        }
        Some(_) => Ok(EntryKind::Special),
    }
}

fn invalid_archive(err: zip::result::ZipError) -> ExtractionError {
    match err {
        zip::result::ZipError::Io(err) => ExtractionError::Io(err),
        other => ExtractionError::InvalidArchive(other.to_string()),
    }
}
