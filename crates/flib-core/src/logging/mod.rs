//! Leveled, prefixed and highlighted console logging on top of `tracing`.
//!
//! Library code emits plain `tracing` events. [`Logger`] adds the
//! `VERBOSE`, `NOTICE` and `SUCCESS` levels by tagging events with their
//! level name, and [`setup_logging`] installs a subscriber rendering them
//! with [`ConsoleFormatter`].
//!
//! # Examples
//!
//! ```no_run
//! use flib_core::logging::Log;
//! use flib_core::logging::Logger;
//! use flib_core::logging::LoggingSettings;
//! use flib_core::logging::PrefixAdaptor;
//! use flib_core::logging::setup_logging;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! setup_logging(&LoggingSettings::from_verbosity(2))?;
//!
//! let logger = Logger::new("flib.deploy");
//! let stack = PrefixAdaptor::new("stack-a", &logger);
//! stack.notice("deploying to us-east-1");
//! # Ok(())
//! # }
//! ```

mod format;
mod highlight;
mod level;
mod logger;
mod prefix;
mod setup;

pub use format::ConsoleFormatter;
pub use format::LEVEL_WIDTH;
pub use highlight::DEFAULT_PATTERNS;
pub use highlight::HighlightRule;
pub use highlight::Highlighter;
pub use highlight::Span;
pub use level::LogLevel;
pub use logger::Log;
pub use logger::Logger;
pub use prefix::DEFAULT_PREFIX_TEMPLATE;
pub use prefix::PrefixAdaptor;
pub use setup::ConsoleSettings;
pub use setup::LoggingError;
pub use setup::LoggingSettings;
pub use setup::SetupOutcome;
pub use setup::setup_logging;
