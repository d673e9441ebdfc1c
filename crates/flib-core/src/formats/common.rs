//! Common extraction utilities shared between archive formats.
//!
//! Internal helpers used by the tar and zip extractors once a member has
//! passed the [`EntryFilter`](crate::security::EntryFilter).

use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::security::ValidatedEntry;
use crate::security::ValidatedKind;
use crate::security::apply_mode;
use crate::types::DestDir;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Per-extraction write state.
pub(crate) struct EntryWriter<'a> {
    dest: &'a DestDir,
    overwrite: bool,
    report: ExtractionReport,
    /// Directory modes are applied last so read-only directories do not
    /// block later members.
    deferred_modes: Vec<(PathBuf, u32)>,
}

impl<'a> EntryWriter<'a> {
    pub(crate) fn new(dest: &'a DestDir, overwrite: bool) -> Self {
        Self {
            dest,
            overwrite,
            report: ExtractionReport::for_destination(dest.as_path()),
            deferred_modes: Vec::new(),
        }
    }

    /// Writes a validated member. `reader` supplies file contents and is
    /// ignored for other kinds.
    pub(crate) fn write<R: Read>(&mut self, validated: &ValidatedEntry, reader: &mut R) -> Result<()> {
        match &validated.kind {
            ValidatedKind::File => self.write_file(validated, reader),
            ValidatedKind::Directory => self.create_directory(validated),
            ValidatedKind::Symlink { target } => self.create_symlink(validated, target),
            ValidatedKind::Hardlink { target } => {
                let source = self.dest.join(target);
                self.create_hardlink(validated, &source)
            }
        }
    }

    /// Records a member that was skipped without being written.
    pub(crate) fn skip(&mut self, warning: Option<String>) {
        self.report.entries_skipped += 1;
        if let Some(warning) = warning {
            self.report.add_warning(warning);
        }
    }

    /// Applies deferred directory modes and returns the report.
    pub(crate) fn finish(mut self) -> Result<ExtractionReport> {
        // Deepest first so a parent's mode never blocks a child.
        self.deferred_modes
            .sort_by_key(|(path, _)| std::cmp::Reverse(path.components().count()));
        for (path, mode) in &self.deferred_modes {
            apply_mode(path, Some(*mode))?;
        }
        Ok(self.report)
    }

    fn write_file<R: Read>(&mut self, validated: &ValidatedEntry, reader: &mut R) -> Result<()> {
        let output_path = self.dest.join(&validated.safe_path);
        self.prepare_target(&output_path)?;

        let output_file = File::create(&output_path)?;
        let mut buffered_writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, output_file);
        let bytes_written = std::io::copy(reader, &mut buffered_writer)
            .map_err(|err| member_read_error(validated.safe_path.as_path(), err))?;
        buffered_writer.flush()?;

        apply_mode(&output_path, validated.mode)?;

        self.report.files_extracted += 1;
        self.report.bytes_written = self.report.bytes_written.saturating_add(bytes_written);
        Ok(())
    }

    /// Repeated directory members are fine.
    fn create_directory(&mut self, validated: &ValidatedEntry) -> Result<()> {
        let dir_path = self.dest.join(&validated.safe_path);
        if is_non_directory(&dir_path) {
            self.prepare_target(&dir_path)?;
        }
        self.create_dirs(&dir_path)?;

        if let Some(mode) = validated.mode {
            self.deferred_modes.push((dir_path, mode));
        }
        self.report.directories_created += 1;
        Ok(())
    }

    #[allow(unused_variables)]
    fn create_symlink(&mut self, validated: &ValidatedEntry, target: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            let link_path = self.dest.join(&validated.safe_path);
            self.prepare_target(&link_path)?;
            std::os::unix::fs::symlink(target, &link_path)?;
            self.report.symlinks_created += 1;
            Ok(())
        }

        #[cfg(not(unix))]
        {
            Err(ExtractionError::SecurityViolation {
                reason: "symlinks are not supported on this platform".into(),
            })
        }
    }

    fn create_hardlink(&mut self, validated: &ValidatedEntry, source: &Path) -> Result<()> {
        if !source.is_file() {
            return Err(ExtractionError::InvalidArchive(format!(
                "hardlink {} refers to missing member {}",
                validated.safe_path.as_path().display(),
                source.display()
            )));
        }

        let link_path = self.dest.join(&validated.safe_path);
        self.prepare_target(&link_path)?;
        std::fs::hard_link(source, &link_path)?;

        self.report.hardlinks_created += 1;
        Ok(())
    }

    /// Creates missing parents and clears an existing non-directory at
    /// `path`, so writes never follow a previously extracted symlink.
    fn prepare_target(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dirs(parent)?;
        }

        let Ok(metadata) = std::fs::symlink_metadata(path) else {
            return Ok(());
        };
        if metadata.is_dir() {
            return Err(ExtractionError::InvalidArchive(format!(
                "member would replace existing directory: {}",
                path.display()
            )));
        }
        if !self.overwrite {
            return Err(ExtractionError::SecurityViolation {
                reason: format!("refusing to overwrite existing file: {}", path.display()),
            });
        }
        std::fs::remove_file(path)?;
        Ok(())
    }

    /// Creates `dir` one component at a time below the destination.
    ///
    /// An existing symlink component is only walked through when it resolves
    /// inside the destination.
    fn create_dirs(&self, dir: &Path) -> Result<()> {
        let root = self.dest.as_path();
        let relative = dir
            .strip_prefix(root)
            .map_err(|_| ExtractionError::PathTraversal {
                path: dir.to_path_buf(),
            })?;

        let mut current = root.to_path_buf();
        for component in relative.components() {
            current.push(component);
            match std::fs::symlink_metadata(&current) {
                Ok(metadata) if metadata.file_type().is_symlink() => {
                    if !current.canonicalize()?.starts_with(root) {
                        return Err(ExtractionError::PathTraversal { path: current });
                    }
                }
                Ok(_) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    std::fs::create_dir(&current)?;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

/// Decoder and checksum failures while reading a member's data are archive
/// faults, not I/O faults.
pub(crate) fn member_read_error(member: &Path, err: std::io::Error) -> ExtractionError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        ExtractionError::InvalidArchive(format!("corrupt member {}: {err}", member.display()))
    } else {
        ExtractionError::Io(err)
    }
}

fn is_non_directory(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|metadata| !metadata.is_dir())
}
