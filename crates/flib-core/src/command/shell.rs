//! Joining argument lists into a single shell command string.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::system::OsInfo;

#[allow(clippy::expect_used)]
static UNSAFE_POSIX_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_@%+=:,./-]").expect("valid pattern"));

/// Joins `args` into one string the platform shell splits back into `args`.
///
/// POSIX quoting is used everywhere except Windows, which follows the
/// Microsoft C runtime parsing rules.
///
/// # Examples
///
/// ```
/// use flib_core::command::convert_list_to_shell_str;
/// use flib_core::system::OsInfo;
///
/// let linux = OsInfo::from_system("Linux", true);
/// assert_eq!(convert_list_to_shell_str(&["echo", "a b"], &linux), "echo 'a b'");
///
/// let windows = OsInfo::from_system("Windows", false);
/// assert_eq!(convert_list_to_shell_str(&["echo", "a b"], &windows), "echo \"a b\"");
/// ```
pub fn convert_list_to_shell_str<S: AsRef<str>>(args: &[S], os: &OsInfo) -> String {
    if os.is_windows() {
        list2cmdline(args)
    } else {
        args.iter()
            .map(|arg| posix_quote(arg.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quotes a single argument for a POSIX shell.
#[must_use]
pub fn posix_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if !UNSAFE_POSIX_CHARS.is_match(arg) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r#"'"'"'"#))
}

fn list2cmdline<S: AsRef<str>>(args: &[S]) -> String {
    let mut line = String::new();
    for arg in args {
        let arg = arg.as_ref();
        if !line.is_empty() {
            line.push(' ');
        }
        let needs_quotes = arg.is_empty() || arg.contains(' ') || arg.contains('\t');
        if needs_quotes {
            line.push('"');
        }

        let mut backslashes = 0usize;
        for c in arg.chars() {
            match c {
                '\\' => backslashes += 1,
                '"' => {
                    line.push_str(&"\\".repeat(backslashes * 2));
                    backslashes = 0;
                    line.push_str("\\\"");
                }
                _ => {
                    line.push_str(&"\\".repeat(backslashes));
                    backslashes = 0;
                    line.push(c);
                }
            }
        }

        line.push_str(&"\\".repeat(backslashes));
        if needs_quotes {
            // Doubled so the closing quote is not escaped.
            line.push_str(&"\\".repeat(backslashes));
            line.push('"');
        }
    }
    line
}
