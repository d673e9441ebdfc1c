//! Property-based tests for suffix detection and path validation.
//!
//! These tests use proptest to generate arbitrary inputs and verify
//! the properties hold across a wide range of cases.

#![allow(clippy::expect_used)]

use flib_core::ArchiveExtractor;
use flib_core::ArchiveKind;
use flib_core::TarExtractor;
use flib_core::ZipExtractor;
use flib_core::formats::suffix::has_suffix;
use flib_core::formats::suffix::longest_match;
use flib_core::types::DestDir;
use flib_core::types::SafePath;
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn create_test_dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let dest = DestDir::new(temp.path().to_path_buf()).expect("failed to create dest");
    (temp, dest)
}

proptest! {
    /// A non-empty stem plus any declared tar suffix is detected as tar.
    #[test]
    fn prop_tar_suffixes_detected(
        stem in "[a-zA-Z0-9_-]{1,16}",
        index in 0..TarExtractor::SUFFIXES.len(),
    ) {
        let suffix = TarExtractor::SUFFIXES[index];
        let path = PathBuf::from(format!("{stem}{suffix}"));
        prop_assert!(has_suffix(&path, suffix));
        prop_assert_eq!(ArchiveKind::detect(&path), Some(ArchiveKind::Tar));
    }

    /// A suffix alone, with no stem, never matches.
    #[test]
    fn prop_bare_suffix_never_matches(
        index in 0..TarExtractor::SUFFIXES.len(),
        dir in "([a-z]{1,8}/){0,3}",
    ) {
        let suffix = TarExtractor::SUFFIXES[index];
        let path = PathBuf::from(format!("{dir}{suffix}"));
        prop_assert!(!has_suffix(&path, suffix));
    }

    /// The longest matching suffix is reported for double extensions.
    #[test]
    fn prop_longest_suffix_wins(stem in "[a-z]{1,12}") {
        let path = PathBuf::from(format!("{stem}.tar.gz"));
        prop_assert_eq!(longest_match(&path, TarExtractor::SUFFIXES), Some(".tar.gz"));
    }

    /// Names without a known suffix are not detected.
    #[test]
    fn prop_unknown_extension_rejected(stem in "[a-z]{1,12}", ext in "(txt|rs|json|rar|7z)") {
        let path = PathBuf::from(format!("{stem}.{ext}"));
        prop_assert_eq!(ArchiveKind::detect(&path), None);
        prop_assert!(!has_suffix(&path, ZipExtractor::SUFFIXES[0]));
    }

    /// Any path climbing above the root is rejected.
    #[test]
    fn prop_parent_escape_rejected(depth in 1usize..4, tail in "[a-z]{1,8}") {
        let (_temp, dest) = create_test_dest();
        let path = PathBuf::from(format!("{}{tail}", "../".repeat(depth)));
        prop_assert!(SafePath::validate(&path, &dest, 32).is_err());
    }

    /// Plain relative paths are accepted and stay under the destination.
    #[test]
    fn prop_valid_relative_paths_accepted(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..5)
    ) {
        let (_temp, dest) = create_test_dest();
        let path = PathBuf::from(components.join("/"));
        let safe = SafePath::validate(&path, &dest, 32);
        prop_assert!(safe.is_ok());
        prop_assert!(dest.join(&safe.expect("validated")).starts_with(dest.as_path()));
    }

    /// Paths deeper than the limit are rejected.
    #[test]
    fn prop_excessive_depth_rejected(extra in 1usize..5) {
        let (_temp, dest) = create_test_dest();
        let limit = 4;
        let path = PathBuf::from(vec!["d"; limit + extra].join("/"));
        prop_assert!(SafePath::validate(&path, &dest, limit).is_err());
    }
}
