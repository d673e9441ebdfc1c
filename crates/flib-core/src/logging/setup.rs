//! Installing the console subscriber.

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::util::TryInitError;

use super::ConsoleFormatter;
use super::LogLevel;

static LEVEL_HANDLE: OnceCell<reload::Handle<LevelFilter, Registry>> = OnceCell::new();

/// Console output settings.
///
/// # Defaults
///
/// - `enable_markup`: `false`
/// - `highlight`: `true`
/// - `show_level`: `true`
/// - `show_logger_name`: `false`
/// - `show_time`: `false`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    /// Style messages with their level colour unless the event says otherwise.
    pub enable_markup: bool,

    /// Apply the default [`Highlighter`](super::Highlighter).
    pub highlight: bool,

    /// Render the `[LEVEL]` column.
    pub show_level: bool,

    /// Render `logger:` before the message.
    pub show_logger_name: bool,

    /// Render a timestamp before the level.
    pub show_time: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enable_markup: false,
            highlight: true,
            show_level: true,
            show_logger_name: false,
            show_time: false,
        }
    }
}

/// Settings for [`setup_logging`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Console output settings, used on first installation only.
    pub console: ConsoleSettings,

    /// Least severe level shown.
    pub level: LogLevel,

    /// Swap the level if logging is already set up.
    pub reconfigure: bool,
}

impl LoggingSettings {
    /// Settings for a `-v` count.
    ///
    /// Logger names are shown from `-vv` upwards.
    ///
    /// A count of 0 selects [`LogLevel::Fatal`]. `tracing` has no level above
    /// `ERROR`, so the console filter still shows `ERROR` events; only a
    /// [`Logger`](super::Logger) set to `Fatal` drops its `error` calls.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = LogLevel::from_verbosity(verbosity);
        Self {
            console: ConsoleSettings {
                show_logger_name: level <= LogLevel::Verbose,
                ..ConsoleSettings::default()
            },
            level,
            reconfigure: false,
        }
    }
}

/// What [`setup_logging`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The subscriber was installed.
    Installed,
    /// Logging was already set up and left unchanged.
    AlreadyConfigured,
    /// Logging was already set up and its level was replaced.
    Reconfigured,
}

/// Errors raised while setting up logging.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Another global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),

    /// The level could not be replaced.
    #[error("failed to change log level: {0}")]
    Reload(#[from] reload::Error),
}

/// Installs the console subscriber writing to stderr.
///
/// Only the first call installs anything. Later calls leave the subscriber
/// in place and, when `settings.reconfigure` is set, replace its level.
///
/// # Errors
///
/// Returns `LoggingError::Init` if a different global subscriber is already
/// installed.
pub fn setup_logging(settings: &LoggingSettings) -> Result<SetupOutcome, LoggingError> {
    let mut installed = false;
    let handle = LEVEL_HANDLE.get_or_try_init(|| {
        let handle = install(settings)?;
        installed = true;
        Ok::<_, LoggingError>(handle)
    })?;

    if installed {
        return Ok(SetupOutcome::Installed);
    }
    if !settings.reconfigure {
        return Ok(SetupOutcome::AlreadyConfigured);
    }
    handle.reload(settings.level.level_filter())?;
    debug!(level = %settings.level, "log level changed");
    Ok(SetupOutcome::Reconfigured)
}

fn install(settings: &LoggingSettings) -> Result<reload::Handle<LevelFilter, Registry>, LoggingError> {
    let (filter, handle) = reload::Layer::new(settings.level.level_filter());
    let console = fmt::layer()
        .event_format(ConsoleFormatter::new(settings.console.clone()))
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()?;
    Ok(handle)
}
