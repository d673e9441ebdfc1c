//! Named loggers emitting `tracing` events.

use tracing::Level;

use super::LogLevel;

/// Something messages can be logged to.
///
/// Only [`Log::log`] is required; the per-level methods delegate to it.
pub trait Log {
    /// Logs `msg` at `level`.
    fn log(&self, level: LogLevel, msg: &str);

    /// Logs at [`LogLevel::Debug`].
    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    /// Logs at [`LogLevel::Verbose`].
    fn verbose(&self, msg: &str) {
        self.log(LogLevel::Verbose, msg);
    }

    /// Logs at [`LogLevel::Info`].
    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    /// Logs at [`LogLevel::Notice`].
    fn notice(&self, msg: &str) {
        self.log(LogLevel::Notice, msg);
    }

    /// Logs at [`LogLevel::Warning`].
    fn warning(&self, msg: &str) {
        self.log(LogLevel::Warning, msg);
    }

    /// Logs at [`LogLevel::Success`].
    fn success(&self, msg: &str) {
        self.log(LogLevel::Success, msg);
    }

    /// Logs at [`LogLevel::Error`].
    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }

    /// Logs at [`LogLevel::Fatal`].
    fn fatal(&self, msg: &str) {
        self.log(LogLevel::Fatal, msg);
    }
}

impl<L: Log + ?Sized> Log for &L {
    fn log(&self, level: LogLevel, msg: &str) {
        (**self).log(level, msg);
    }
}

/// A named logger.
///
/// Events carry `logger`, `level_name` and `markup` fields that
/// [`ConsoleFormatter`](super::ConsoleFormatter) renders.
///
/// # Examples
///
/// ```
/// use flib_core::logging::Log;
/// use flib_core::logging::LogLevel;
/// use flib_core::logging::Logger;
///
/// let logger = Logger::new("flib.example").with_level(LogLevel::Info);
/// assert!(!logger.is_enabled_for(LogLevel::Debug));
/// logger.success("done");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    name: String,
    level: LogLevel,
    markup: bool,
}

impl Logger {
    /// Creates a logger that forwards every level.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::NotSet,
            markup: false,
        }
    }

    /// Sets the minimum level forwarded.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Requests level styling of messages.
    #[must_use]
    pub const fn with_markup(mut self, markup: bool) -> Self {
        self.markup = markup;
        self
    }

    /// Logger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum level forwarded.
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether markup is requested.
    pub const fn markup(&self) -> bool {
        self.markup
    }

    /// Whether messages at `level` are forwarded.
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.level
    }
}

macro_rules! emit {
    ($level:expr, $logger:expr, $level_name:expr, $msg:expr) => {
        tracing::event!(
            $level,
            logger = $logger.name.as_str(),
            level_name = $level_name,
            markup = $logger.markup,
            "{}",
            $msg
        )
    };
}

impl Log for Logger {
    fn log(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled_for(level) {
            return;
        }
        let name = level.name();
        match level {
            LogLevel::Fatal | LogLevel::Error => emit!(Level::ERROR, self, name, msg),
            LogLevel::Success | LogLevel::Warning => emit!(Level::WARN, self, name, msg),
            LogLevel::Notice | LogLevel::Info => emit!(Level::INFO, self, name, msg),
            LogLevel::Verbose => emit!(Level::DEBUG, self, name, msg),
            LogLevel::Debug | LogLevel::NotSet => emit!(Level::TRACE, self, name, msg),
        }
    }
}
