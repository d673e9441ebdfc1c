//! Human-readable output formatter with colors and styling.

use super::formatter::CheckResult;
use super::formatter::FormatSummary;
use super::formatter::OutputFormatter;
use super::formatter::SystemSummary;
use anyhow::Result;
use console::Term;
use console::style;
use flib_core::ArchiveKind;
use flib_core::ExtractionReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn format_flag(value: bool) -> &'static str {
        if value { "yes" } else { "no" }
    }

    fn write_header(&self, marker: &str, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style(marker).green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(
        &self,
        archive: &Path,
        kind: ArchiveKind,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_header(
            "✓",
            &format!("Extracted {} ({kind})", archive.display()),
        );

        let _ = self.term.write_line(&format!(
            "  Destination:     {}",
            report.destination.display()
        ));
        let _ = self.term.write_line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:     {}",
            Self::format_number(report.directories_created)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:      {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Symlinks:        {}", report.symlinks_created));
            let _ = self
                .term
                .write_line(&format!("  Hardlinks:       {}", report.hardlinks_created));
            let _ = self
                .term
                .write_line(&format!("  Skipped:         {}", report.entries_skipped));
            let _ = self
                .term
                .write_line(&format!("  Duration:        {:?}", report.duration));
        }

        for warning in &report.warnings {
            self.format_warning(warning);
        }

        Ok(())
    }

    fn format_check_results(&self, results: &[CheckResult]) -> Result<()> {
        for result in results {
            match (&result.error, result.format, result.members) {
                (None, Some(format), Some(members)) => {
                    if self.quiet {
                        continue;
                    }
                    self.write_header(
                        "✓",
                        &format!(
                            "{}: {format}, {} members",
                            result.archive,
                            Self::format_number(members)
                        ),
                    );
                }
                (Some(error), _, _) => {
                    // Failures are reported even in quiet mode
                    if self.use_colors {
                        let _ = self.term.write_line(&format!(
                            "{} {}: {error}",
                            style("✗").red().bold(),
                            result.archive
                        ));
                    } else {
                        let _ = self
                            .term
                            .write_line(&format!("FAILED {}: {error}", result.archive));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn format_formats(&self, formats: &[FormatSummary]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for format in formats {
            let name = if self.use_colors {
                style(format!("{:<5}", format.name)).cyan().bold().to_string()
            } else {
                format!("{:<5}", format.name)
            };
            let _ = self
                .term
                .write_line(&format!("{name} {}", format.suffixes.join(" ")));
        }

        Ok(())
    }

    fn format_system_info(&self, info: &SystemSummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let unknown = "unknown".to_string();
        let _ = self.term.write_line(&format!("OS:           {}", info.os));
        let _ = self
            .term
            .write_line(&format!("POSIX:        {}", Self::format_flag(info.posix)));
        let _ = self
            .term
            .write_line(&format!("Machine:      {}", info.machine));
        let _ = self.term.write_line(&format!(
            "Architecture: {}",
            info.architecture.as_ref().unwrap_or(&unknown)
        ));
        let _ = self
            .term
            .write_line(&format!("Pointer size: {} bit", info.pointer_width));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "Config dir:   {}",
                info.config_dir.as_ref().unwrap_or(&unknown)
            ));
            let _ = self.term.write_line(&format!(
                "Data dir:     {}",
                info.data_dir.as_ref().unwrap_or(&unknown)
            ));
        }

        let _ = self.term.write_line(&format!(
            "CI:           {}",
            Self::format_flag(info.ci)
        ));
        let _ = self.term.write_line(&format!(
            "Debug:        {}",
            Self::format_flag(info.debug)
        ));
        let _ = self.term.write_line(&format!(
            "Verbose:      {}",
            Self::format_flag(info.verbose)
        ));

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
