//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use flib_core::ArchiveKind;
use flib_core::ExtractionFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flib")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract archive contents
    Extract(ExtractArgs),
    /// Check that archives can be opened and read
    Check(CheckArgs),
    /// List supported archive formats and suffixes
    Formats,
    /// Show operating system and machine information
    Info,
    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Archive format selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Choose from the file suffix
    Auto,
    /// Tar, optionally compressed
    Tar,
    /// Zip
    Zip,
}

impl FormatArg {
    pub const fn kind(self) -> Option<ArchiveKind> {
        match self {
            Self::Auto => None,
            Self::Tar => Some(ArchiveKind::Tar),
            Self::Zip => Some(ArchiveKind::Zip),
        }
    }
}

/// Member filter selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Refuse links leaving the destination and strip unsafe mode bits
    Data,
    /// Like data, but keep absolute symlinks and most mode bits
    Tar,
}

impl From<FilterArg> for ExtractionFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::Data => Self::Data,
            FilterArg::Tar => Self::Tar,
        }
    }
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Archive format
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Accept archives whose suffix does not match --format
    #[arg(long)]
    pub no_strict: bool,

    /// Member filter
    #[arg(long, value_enum, default_value_t = FilterArg::Data)]
    pub filter: FilterArg,

    /// Fail if the output directory does not exist
    #[arg(long)]
    pub no_create: bool,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Archives to check
    #[arg(value_name = "ARCHIVE", required = true)]
    pub archives: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
