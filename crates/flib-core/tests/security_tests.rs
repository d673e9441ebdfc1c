//! Attack scenarios run against the member filter and full extraction.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use flib_core::ExtractOptions;
use flib_core::ExtractionError;
use flib_core::ExtractionFilter;
use flib_core::extract_archive;
use flib_core::security::EntryFilter;
use flib_core::security::ValidatedKind;
use flib_core::test_utils::TarTestBuilder;
use flib_core::test_utils::ZipTestBuilder;
use flib_core::test_utils::write_archive;
use flib_core::types::DestDir;
use flib_core::types::EntryKind;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().unwrap();
    let dest = DestDir::new(temp.path()).unwrap();
    (temp, dest)
}

fn symlink(target: &str) -> EntryKind {
    EntryKind::Symlink {
        target: PathBuf::from(target),
    }
}

fn hardlink(target: &str) -> EntryKind {
    EntryKind::Hardlink {
        target: PathBuf::from(target),
    }
}

#[test]
fn test_parent_traversal_variants_rejected() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);

    for path in [
        "../etc/passwd",
        "../../etc/passwd",
        "foo/../../etc/passwd",
        "foo/../../../etc/passwd",
    ] {
        let result = filter.validate_entry(Path::new(path), &EntryKind::File, Some(0o644));
        assert!(
            matches!(result, Err(ExtractionError::PathTraversal { .. })),
            "path should be rejected: {path}"
        );
    }
}

#[test]
fn test_leading_slash_is_stripped() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);

    let entry = filter
        .validate_entry(Path::new("/etc/passwd"), &EntryKind::File, Some(0o644))
        .unwrap();
    assert_eq!(entry.safe_path.as_path(), Path::new("etc/passwd"));
}

#[test]
fn test_deep_path_nesting_rejected() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);
    let deep = (0..40).map(|i| format!("dir{i}")).collect::<Vec<_>>().join("/");

    let result = filter.validate_entry(Path::new(&deep), &EntryKind::File, None);
    assert!(matches!(result, Err(ExtractionError::SecurityViolation { .. })));
}

#[test]
fn test_symlink_escapes_rejected_by_data_filter() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);

    for (path, target) in [
        ("malicious_link", "/etc/passwd"),
        ("link", "../outside"),
        ("a/b/link", "../../../etc"),
    ] {
        let result = filter.validate_entry(Path::new(path), &symlink(target), None);
        assert!(
            matches!(result, Err(ExtractionError::LinkEscape { .. })),
            "symlink should be rejected: {path} -> {target}"
        );
    }
}

#[test]
fn test_symlinks_inside_destination_allowed() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);

    for (path, target) in [
        ("link", "target.txt"),
        ("dir/link", "../other/file.txt"),
        ("dir/link", "./sibling"),
    ] {
        let entry = filter
            .validate_entry(Path::new(path), &symlink(target), None)
            .unwrap_or_else(|e| panic!("{path} -> {target}: {e}"));
        assert!(matches!(entry.kind, ValidatedKind::Symlink { .. }));
    }
}

#[test]
fn test_tar_filter_keeps_absolute_symlink_target() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Tar, &options, &dest);

    let entry = filter
        .validate_entry(Path::new("passwd"), &symlink("/etc/passwd"), None)
        .unwrap();
    match entry.kind {
        ValidatedKind::Symlink { target } => assert_eq!(target, Path::new("/etc/passwd")),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn test_hardlink_escapes_rejected() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();

    for policy in [ExtractionFilter::Data, ExtractionFilter::Tar] {
        let filter = EntryFilter::new(policy, &options, &dest);
        let result = filter.validate_entry(Path::new("link"), &hardlink("../../etc/shadow"), None);
        assert!(
            matches!(result, Err(ExtractionError::LinkEscape { .. })),
            "{policy:?} accepted an escaping hardlink"
        );
    }

    let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);
    let result = filter.validate_entry(Path::new("link"), &hardlink("/etc/shadow"), None);
    assert!(matches!(result, Err(ExtractionError::LinkEscape { .. })));
}

#[test]
fn test_hardlink_inside_destination_allowed() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Data, &options, &dest);

    let entry = filter
        .validate_entry(Path::new("dir/link"), &hardlink("dir/original.txt"), None)
        .unwrap();
    match entry.kind {
        ValidatedKind::Hardlink { target } => {
            assert_eq!(target.as_path(), Path::new("dir/original.txt"));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn test_special_members_rejected() {
    let (_temp, dest) = dest();
    let options = ExtractOptions::default();

    for policy in [ExtractionFilter::Data, ExtractionFilter::Tar] {
        let filter = EntryFilter::new(policy, &options, &dest);
        let result = filter.validate_entry(Path::new("dev/null"), &EntryKind::Special, None);
        assert!(matches!(result, Err(ExtractionError::SpecialFile { .. })));
    }
}

#[test]
#[cfg(unix)]
fn test_write_through_planted_symlink_rejected() {
    let outside = TempDir::new().unwrap();
    let (temp, dest) = dest();
    std::os::unix::fs::symlink(outside.path(), temp.path().join("escape")).unwrap();

    let options = ExtractOptions::default();
    let filter = EntryFilter::new(ExtractionFilter::Tar, &options, &dest);
    let result = filter.validate_entry(Path::new("escape/payload"), &EntryKind::File, None);

    assert!(matches!(result, Err(ExtractionError::PathTraversal { .. })));
}

#[test]
#[cfg(unix)]
fn test_symlink_chain_escape_in_archive() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_symlink("a", ".")
        .add_symlink("a/b", "..")
        .add_file("a/b/escaped.txt", b"x")
        .build();
    let archive = write_archive(temp.path(), "chain.tar", &data);
    let out = temp.path().join("out");

    let result = extract_archive(&archive, &out, &ExtractOptions::default());

    assert!(result.is_err());
    assert!(!temp.path().join("escaped.txt").exists());
}

#[test]
#[cfg(unix)]
fn test_nested_write_through_planted_symlink_rejected() {
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    std::fs::create_dir(&outside).unwrap();
    let data = TarTestBuilder::new()
        .add_symlink("escape", outside.to_str().unwrap())
        .add_file("escape/new/pwned.txt", b"x")
        .build();
    let archive = write_archive(temp.path(), "nested.tar", &data);
    let options = ExtractOptions::default().with_filter(ExtractionFilter::Tar);

    let result = extract_archive(&archive, temp.path().join("out"), &options);

    assert!(matches!(result, Err(ExtractionError::PathTraversal { .. })));
    assert!(!outside.join("new").exists());
}

#[test]
#[cfg(unix)]
fn test_link_redirected_by_later_link_tar() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_symlink("a", "p/..")
        .add_symlink("p", ".")
        .add_file("a/x/pwned.txt", b"x")
        .build();
    let archive = write_archive(temp.path(), "redirect.tar", &data);

    let result = extract_archive(&archive, temp.path().join("out"), &ExtractOptions::default());

    assert!(matches!(result, Err(ExtractionError::LinkEscape { .. })));
    assert!(!temp.path().join("x/pwned.txt").exists());
}

#[test]
#[cfg(unix)]
fn test_link_redirected_by_later_link_zip() {
    let temp = TempDir::new().unwrap();
    let data = ZipTestBuilder::new()
        .add_symlink("a", "p/..")
        .add_symlink("p", ".")
        .add_file("a/x/pwned.txt", b"x")
        .build();
    let archive = write_archive(temp.path(), "redirect.zip", &data);

    let result = extract_archive(&archive, temp.path().join("out"), &ExtractOptions::default());

    assert!(matches!(result, Err(ExtractionError::LinkEscape { .. })));
    assert!(!temp.path().join("x/pwned.txt").exists());
}

#[test]
fn test_fifo_member_aborts_extraction() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_file("ok.txt", b"ok")
        .add_fifo("pipe")
        .build();
    let archive = write_archive(temp.path(), "fifo.tar", &data);

    let err = extract_archive(&archive, temp.path().join("out"), &ExtractOptions::default())
        .unwrap_err();
    assert!(matches!(err, ExtractionError::SpecialFile { .. }));
}
