//! Lexical suffix matching on archive file names.
//!
//! A file name matches a suffix when it ends with that suffix and something
//! is left in front of it: `src.tar.gz` matches `.tar.gz` and `.gz`, while a
//! bare `.gz` or `src.tgz` does not match `.gz`. Matching is case-sensitive
//! and looks only at the final path component.

use std::path::Path;

/// Returns the final component of `path` as UTF-8, if any.
fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Returns `true` if the file name of `path` ends with `suffix` and has a
/// non-empty stem.
///
/// # Examples
///
/// ```
/// use flib_core::formats::suffix::has_suffix;
/// use std::path::Path;
///
/// assert!(has_suffix(Path::new("dist/src.tar.gz"), ".tar.gz"));
/// assert!(has_suffix(Path::new("dist/src.tar.gz"), ".gz"));
/// assert!(!has_suffix(Path::new("dist/src.tgz"), ".gz"));
/// assert!(!has_suffix(Path::new(".gz"), ".gz"));
/// ```
#[must_use]
pub fn has_suffix(path: &Path, suffix: &str) -> bool {
    file_name(path).is_some_and(|name| name.len() > suffix.len() && name.ends_with(suffix))
}

/// Returns the longest entry of `suffixes` matched by `path`.
#[must_use]
pub fn longest_match<'a>(path: &Path, suffixes: &[&'a str]) -> Option<&'a str> {
    suffixes
        .iter()
        .copied()
        .filter(|suffix| has_suffix(path, suffix))
        .max_by_key(|suffix| suffix.len())
}

/// Returns `true` if `path` matches any entry of `suffixes`.
#[must_use]
pub fn matches_any(path: &Path, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| has_suffix(path, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAR_LIKE: &[&str] = &[".tar", ".tar.gz", ".tgz", ".gz"];

    #[test]
    fn test_single_extension() {
        assert!(has_suffix(Path::new("archive.zip"), ".zip"));
        assert!(has_suffix(Path::new("archive.tgz"), ".tgz"));
        assert!(!has_suffix(Path::new("archive.zip"), ".tar"));
    }

    #[test]
    fn test_double_extension() {
        let path = Path::new("/tmp/src.tar.gz");
        assert!(has_suffix(path, ".tar.gz"));
        assert!(has_suffix(path, ".gz"));
        assert!(!has_suffix(path, ".tar"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!has_suffix(Path::new("ARCHIVE.ZIP"), ".zip"));
    }

    #[test]
    fn test_empty_stem_rejected() {
        assert!(!has_suffix(Path::new(".zip"), ".zip"));
        assert!(!has_suffix(Path::new("dir/.tar.gz"), ".tar.gz"));
    }

    #[test]
    fn test_only_final_component() {
        assert!(!has_suffix(Path::new("foo.zip/readme"), ".zip"));
        assert!(!has_suffix(Path::new("/"), ".zip"));
    }

    #[test]
    fn test_longest_match() {
        assert_eq!(
            longest_match(Path::new("src.tar.gz"), TAR_LIKE),
            Some(".tar.gz")
        );
        assert_eq!(longest_match(Path::new("src.gz"), TAR_LIKE), Some(".gz"));
        assert_eq!(longest_match(Path::new("src.zip"), TAR_LIKE), None);
    }

    #[test]
    fn test_matches_any() {
        assert!(matches_any(Path::new("a.tgz"), TAR_LIKE));
        assert!(!matches_any(Path::new("a.rar"), TAR_LIKE));
        assert!(!matches_any(Path::new("a.tar"), &[]));
    }
}
