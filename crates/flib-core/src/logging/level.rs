//! Log levels, including the levels `tracing` has no name for.

use std::fmt;
use std::str::FromStr;

use tracing::Level;
use tracing::level_filters::LevelFilter;

/// Numeric log level.
///
/// Values between the standard levels add `VERBOSE`, `NOTICE` and
/// `SUCCESS`.
///
/// # Examples
///
/// ```
/// use flib_core::logging::LogLevel;
///
/// assert_eq!(LogLevel::from_verbosity(2), LogLevel::Verbose);
/// assert_eq!(LogLevel::Notice.value(), 25);
/// assert!(LogLevel::has_value(35));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Everything.
    NotSet = 0,
    /// Debugging detail.
    Debug = 10,
    /// More detail than `Info`.
    Verbose = 15,
    /// General information.
    #[default]
    Info = 20,
    /// Noteworthy information.
    Notice = 25,
    /// Something unexpected.
    Warning = 30,
    /// An operation succeeded.
    Success = 35,
    /// An operation failed.
    Error = 40,
    /// The program cannot continue.
    Fatal = 50,
}

impl LogLevel {
    /// All levels in ascending order.
    pub const ALL: &'static [Self] = &[
        Self::NotSet,
        Self::Debug,
        Self::Verbose,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Success,
        Self::Error,
        Self::Fatal,
    ];

    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Level with the given numeric value.
    #[must_use]
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| u32::from(level.value()) == value)
    }

    /// Whether a level has the given numeric value.
    #[must_use]
    pub fn has_value(value: u32) -> bool {
        Self::from_value(value).is_some()
    }

    /// Maps a `-v` count to a level. 0 is `Fatal`.
    #[must_use]
    pub const fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => Self::Fatal,
            1 => Self::Info,
            2 => Self::Verbose,
            3 | 4 => Self::Debug,
            _ => Self::NotSet,
        }
    }

    /// Upper-case level name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotSet => "NOTSET",
            Self::Debug => "DEBUG",
            Self::Verbose => "VERBOSE",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warning => "WARNING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// `tracing` level events of this level are emitted at.
    ///
    /// `Fatal` and `Error` share `ERROR`, so a `Fatal` filter lets both through.
    #[must_use]
    pub const fn tracing_level(self) -> Level {
        match self {
            Self::Fatal | Self::Error => Level::ERROR,
            Self::Success | Self::Warning => Level::WARN,
            Self::Notice | Self::Info => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Debug | Self::NotSet => Level::TRACE,
        }
    }

    /// Most verbose filter that still shows events of this level.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        LevelFilter::from_level(self.tracing_level())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown log level: {s}"))
    }
}
