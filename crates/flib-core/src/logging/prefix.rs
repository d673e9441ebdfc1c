//! Adaptor that prefixes every message before forwarding it.

use super::Log;
use super::LogLevel;

/// Template used when none is given.
pub const DEFAULT_PREFIX_TEMPLATE: &str = "{prefix}: {msg}";

/// Prefixes messages and forwards them to another [`Log`].
///
/// Adaptors nest: wrapping an adaptor applies the outer prefix to an
/// already prefixed message.
///
/// # Examples
///
/// ```
/// use flib_core::logging::Logger;
/// use flib_core::logging::PrefixAdaptor;
///
/// let logger = Logger::new("flib.example");
/// let inner = PrefixAdaptor::new("inner", &logger);
/// let outer = PrefixAdaptor::new("outer", &inner);
/// assert_eq!(outer.process("msg"), "outer: msg");
/// assert_eq!(inner.process(&outer.process("msg")), "inner: outer: msg");
/// ```
#[derive(Debug, Clone)]
pub struct PrefixAdaptor<L: Log> {
    prefix: String,
    logger: L,
    prefix_template: String,
}

impl<L: Log> PrefixAdaptor<L> {
    /// Wraps `logger` with the default template.
    pub fn new(prefix: impl Into<String>, logger: L) -> Self {
        Self {
            prefix: prefix.into(),
            logger,
            prefix_template: DEFAULT_PREFIX_TEMPLATE.to_string(),
        }
    }

    /// Replaces the template. `{prefix}` and `{msg}` are substituted.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.prefix_template = template.into();
        self
    }

    /// The prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The wrapped logger.
    pub const fn inner(&self) -> &L {
        &self.logger
    }

    /// Renders the template for `msg`.
    pub fn process(&self, msg: &str) -> String {
        let mut out = String::with_capacity(self.prefix_template.len() + msg.len());
        let mut rest = self.prefix_template.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{prefix}") {
                out.push_str(&self.prefix);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{msg}") {
                out.push_str(msg);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

impl<L: Log> Log for PrefixAdaptor<L> {
    fn log(&self, level: LogLevel, msg: &str) {
        self.logger.log(level, &self.process(msg));
    }
}
