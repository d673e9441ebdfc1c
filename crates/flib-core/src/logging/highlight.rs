//! Regex based highlighting of log messages.

use std::ops::Range;

use console::Style;
use regex::Regex;

/// Default highlight patterns, in priority order.
pub const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    (
        "aws.region",
        r"(us(-gov)?|ap|ca|cn|eu|sa)-(central|(north|south)?(east|west)?)-\d",
    ),
    ("repr.str", r#""[^"]*"|'[^']*'"#),
    ("repr.number", r"\b\d+(\.\d+)?\b"),
];

/// A named pattern and the style applied to its matches.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    name: String,
    pattern: Regex,
    style: Style,
}

impl HighlightRule {
    /// Compiles a rule.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn new(name: impl Into<String>, pattern: &str, style: Style) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            style,
        })
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A matched range and the index of the rule that matched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range in the message.
    pub range: Range<usize>,
    /// Index into [`Highlighter::rules`].
    pub rule: usize,
}

/// Applies `console` styles to the parts of a message matching its rules.
///
/// Earlier rules win where matches overlap.
///
/// # Examples
///
/// ```
/// use flib_core::logging::Highlighter;
///
/// let highlighter = Highlighter::default();
/// let spans = highlighter.spans("deploying to us-east-1");
/// assert_eq!(spans.len(), 1);
/// assert_eq!(highlighter.rules()[spans[0].rule].name(), "aws.region");
/// ```
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Vec<HighlightRule>,
}

impl Default for Highlighter {
    fn default() -> Self {
        let rules = DEFAULT_PATTERNS
            .iter()
            .filter_map(|(name, pattern)| {
                HighlightRule::new(*name, pattern, default_style(name)).ok()
            })
            .collect();
        Self { rules }
    }
}

fn default_style(name: &str) -> Style {
    match name {
        "aws.region" => Style::new().yellow(),
        "repr.str" => Style::new().green(),
        _ => Style::new().cyan().bold(),
    }
}

impl Highlighter {
    /// Highlighter without rules.
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        pattern: &str,
        style: Style,
    ) -> Result<Self, regex::Error> {
        self.rules.push(HighlightRule::new(name, pattern, style)?);
        Ok(self)
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// Non-overlapping matches ordered by position.
    pub fn spans(&self, text: &str) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            for found in rule.pattern.find_iter(text) {
                let range = found.range();
                if range.is_empty() {
                    continue;
                }
                let overlaps = spans
                    .iter()
                    .any(|span| range.start < span.range.end && span.range.start < range.end);
                if !overlaps {
                    spans.push(Span { range, rule: index });
                }
            }
        }
        spans.sort_by_key(|span| span.range.start);
        spans
    }

    /// Returns `text` with matched ranges styled.
    pub fn highlight(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in self.spans(text) {
            out.push_str(&text[cursor..span.range.start]);
            let styled = self.rules[span.rule]
                .style
                .apply_to(&text[span.range.clone()]);
            out.push_str(&styled.to_string());
            cursor = span.range.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}
