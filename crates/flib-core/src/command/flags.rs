//! Conversion of named options into command-line flags.

use std::path::Path;
use std::path::PathBuf;

/// Prefix used when none is given.
pub const DEFAULT_FLAG_PREFIX: &str = "--";

/// Converts an option name into a flag, replacing `_` with `-`.
///
/// # Examples
///
/// ```
/// use flib_core::command::convert_to_cli_flag;
///
/// assert_eq!(convert_to_cli_flag("foo", "--"), "--foo");
/// assert_eq!(convert_to_cli_flag("foo_bar", "-"), "-foo-bar");
/// ```
#[must_use]
pub fn convert_to_cli_flag(name: &str, prefix: &str) -> String {
    format!("{prefix}{}", name.replace('_', "-"))
}

/// Value attached to a named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliValue {
    /// Emitted as a bare flag when `true`, omitted when `false`.
    Flag(bool),
    /// Emitted as `--name value`.
    Value(String),
    /// Emitted as `--name item` once per item.
    List(Vec<String>),
}

impl From<bool> for CliValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for CliValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for CliValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&Path> for CliValue {
    fn from(value: &Path) -> Self {
        Self::Value(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for CliValue {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<Vec<String>> for CliValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for CliValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<PathBuf>> for CliValue {
    fn from(value: Vec<PathBuf>) -> Self {
        Self::List(
            value
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
        )
    }
}

/// Converts named options into a flat argument list, preserving order.
///
/// # Examples
///
/// ```
/// use flib_core::command::CliValue;
/// use flib_core::command::convert_kwargs_to_shell_list;
///
/// let args = convert_kwargs_to_shell_list([
///     ("key", CliValue::from("val")),
///     ("is_flag", CliValue::from(true)),
///     ("user", CliValue::from(vec!["foo", "bar"])),
/// ]);
/// assert_eq!(args, ["--key", "val", "--is-flag", "--user", "foo", "--user", "bar"]);
/// ```
pub fn convert_kwargs_to_shell_list<I, K>(kwargs: I) -> Vec<String>
where
    I: IntoIterator<Item = (K, CliValue)>,
    K: AsRef<str>,
{
    let mut args = Vec::new();
    for (name, value) in kwargs {
        let flag = convert_to_cli_flag(name.as_ref(), DEFAULT_FLAG_PREFIX);
        match value {
            CliValue::Flag(true) => args.push(flag),
            CliValue::Flag(false) => {}
            CliValue::Value(value) => {
                args.push(flag);
                args.push(value);
            }
            CliValue::List(items) => {
                for item in items {
                    args.push(flag.clone());
                    args.push(item);
                }
            }
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(kwargs: Vec<(&str, CliValue)>) -> Vec<String> {
        convert_kwargs_to_shell_list(kwargs)
    }

    #[test]
    fn test_convert_to_cli_flag() {
        assert_eq!(convert_to_cli_flag("foo", DEFAULT_FLAG_PREFIX), "--foo");
        assert_eq!(convert_to_cli_flag("foo_bar", "-"), "-foo-bar");
        assert_eq!(convert_to_cli_flag("foo-bar", "--"), "--foo-bar");
    }

    #[test]
    fn test_empty() {
        assert!(convert(vec![]).is_empty());
    }

    #[test]
    fn test_flags() {
        assert_eq!(convert(vec![("is_flag", true.into())]), ["--is-flag"]);
        assert!(convert(vec![("is_flag", false.into())]).is_empty());
    }

    #[test]
    fn test_value_then_flag() {
        assert_eq!(
            convert(vec![("key", "val".into()), ("is-flag", true.into())]),
            ["--key", "val", "--is-flag"]
        );
    }

    #[test]
    fn test_list_repeats_flag() {
        assert_eq!(
            convert(vec![("user", vec!["foo", "bar"].into())]),
            ["--user", "foo", "--user", "bar"]
        );
    }

    #[test]
    fn test_path_list() {
        let files = vec![PathBuf::from("/tmp/foo"), PathBuf::from("/tmp/bar")];
        assert_eq!(
            convert(vec![("file", files.into())]),
            ["--file", "/tmp/foo", "--file", "/tmp/bar"]
        );
    }

    #[test]
    fn test_path_value() {
        assert_eq!(
            CliValue::from(Path::new("/tmp/foo")),
            CliValue::Value("/tmp/foo".to_string())
        );
    }
}
