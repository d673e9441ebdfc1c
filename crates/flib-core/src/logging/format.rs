//! Console event formatter for `tracing-subscriber`.

use std::fmt;
use std::fmt::Write as _;

use console::Style;
use tracing::Event;
use tracing::Subscriber;
use tracing::field::Field;
use tracing::field::Visit;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::registry::LookupSpan;

use super::ConsoleSettings;
use super::Highlighter;

/// Width the `[LEVEL]` column is padded to.
pub const LEVEL_WIDTH: usize = 9;

/// Renders events as `[LEVEL]   message`.
///
/// Events from [`Logger`](super::Logger) carry their own level name and
/// markup flag; other events use the `tracing` level.
#[derive(Debug, Clone, Default)]
pub struct ConsoleFormatter {
    settings: ConsoleSettings,
    highlighter: Option<Highlighter>,
}

impl ConsoleFormatter {
    /// Creates a formatter, with the default highlighter when
    /// `settings.highlight` is set.
    pub fn new(settings: ConsoleSettings) -> Self {
        let highlighter = settings.highlight.then(Highlighter::default);
        Self {
            settings,
            highlighter,
        }
    }

    /// Replaces the highlighter.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Option<Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Settings in use.
    pub const fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    /// Renders one line, without time or trailing newline.
    pub fn render_line(
        &self,
        level_name: &str,
        logger: Option<&str>,
        message: &str,
        markup: Option<bool>,
    ) -> String {
        let style = level_style(level_name);
        let mut line = String::new();

        if self.settings.show_level {
            let tag = format!("{:<LEVEL_WIDTH$}", format!("[{level_name}]"));
            line.push_str(&style.apply_to(tag).to_string());
            line.push(' ');
        }

        if self.settings.show_logger_name {
            if let Some(name) = logger {
                line.push_str(name);
                line.push(':');
            }
        }

        let body = self
            .highlighter
            .as_ref()
            .map_or_else(|| message.to_string(), |h| h.highlight(message));
        if markup.unwrap_or(self.settings.enable_markup) {
            line.push_str(&style.apply_to(body).to_string());
        } else {
            line.push_str(&body);
        }
        line
    }
}

fn level_style(level_name: &str) -> Style {
    match level_name {
        "FATAL" | "ERROR" => Style::new().red().bold(),
        "WARNING" | "WARN" => Style::new().yellow(),
        "SUCCESS" => Style::new().green(),
        "NOTICE" => Style::new().cyan(),
        "INFO" => Style::new().blue(),
        _ => Style::new().dim(),
    }
}

#[derive(Default)]
struct EventFields {
    message: String,
    logger: Option<String>,
    level_name: Option<String>,
    markup: Option<bool>,
    extra: Vec<(String, String)>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "logger" => self.logger = Some(value.to_string()),
            "level_name" => self.level_name = Some(value.to_string()),
            name => self.extra.push((name.to_string(), value.to_string())),
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "markup" {
            self.markup = Some(value);
        } else {
            self.extra.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.extra
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        let mut message = fields.message;
        for (key, value) in &fields.extra {
            write!(message, " {key}={value}")?;
        }

        if self.settings.show_time {
            SystemTime.format_time(&mut writer)?;
            writer.write_char(' ')?;
        }

        let level_name = fields
            .level_name
            .unwrap_or_else(|| event.metadata().level().as_str().to_string());
        let logger = fields
            .logger
            .unwrap_or_else(|| event.metadata().target().to_string());
        let line = self.render_line(&level_name, Some(&logger), &message, fields.markup);
        writeln!(writer, "{line}")
    }
}
