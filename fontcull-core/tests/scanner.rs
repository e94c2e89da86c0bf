//! Behaviour tests for the directory-walking character collector.

use std::{fs, path::Path};

use fontcull_core::{ScanError, Scanner, ScannerBuilder, baseline};
use rstest::rstest;
use tempfile::TempDir;

fn write_source(project: &Path, relative: &str, contents: &str) {
    let path = project.join(relative);
    let parent = path.parent().expect("source path must have a parent");
    fs::create_dir_all(parent).expect("failed to create source directories");
    fs::write(&path, contents).expect("failed to write source file");
}

fn default_scanner() -> Scanner {
    ScannerBuilder::new()
        .build()
        .expect("default scanner must build")
}

#[test]
fn collects_characters_from_matching_sources() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/app.ts", "const greeting = 'héllo';");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert!(outcome.charset().contains('é'));
    assert_eq!(outcome.files_scanned(), 1);
    assert_eq!(outcome.files_skipped(), 0);
}

#[test]
fn seeds_the_collection_with_the_baseline() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/app.ts", "x");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert!(baseline().iter().all(|ch| outcome.charset().contains(ch)));
}

#[test]
fn empty_project_collects_the_baseline_only() {
    let project = TempDir::new().expect("failed to create project dir");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert_eq!(outcome.charset(), baseline());
    assert_eq!(outcome.files_scanned(), 0);
    assert_eq!(outcome.files_skipped(), 0);
}

#[test]
fn prunes_skip_listed_directories_at_any_depth() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/app.ts", "plain");
    write_source(project.path(), "src/node_modules/lib.ts", "Ω");
    write_source(project.path(), "src/nested/dist/bundle.js", "Ψ");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert!(!outcome.charset().contains('Ω'));
    assert!(!outcome.charset().contains('Ψ'));
    assert_eq!(outcome.files_scanned(), 1);
}

#[test]
fn matches_extensions_case_insensitively() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/App.TS", "Ƶ");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert!(outcome.charset().contains('Ƶ'));
    assert_eq!(outcome.files_scanned(), 1);
}

#[test]
fn ignores_unmatched_and_extensionless_files() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/readme.md", "µ");
    write_source(project.path(), "src/Makefile", "ß");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert!(!outcome.charset().contains('µ'));
    assert!(!outcome.charset().contains('ß'));
    assert_eq!(outcome.files_scanned(), 0);
}

#[test]
fn skips_files_that_are_not_utf8() {
    let project = TempDir::new().expect("failed to create project dir");
    let path = project.path().join("src/bad.ts");
    fs::create_dir_all(path.parent().expect("path must have a parent"))
        .expect("failed to create source directories");
    fs::write(&path, [0xff, 0xfe, 0xfd]).expect("failed to write source file");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert_eq!(outcome.files_scanned(), 0);
    assert_eq!(outcome.files_skipped(), 1);
}

#[test]
fn merges_root_file_characters() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "index.html", "<title>☃</title>");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert!(outcome.charset().contains('☃'));
    assert_eq!(outcome.files_scanned(), 1);
}

#[test]
fn unreadable_root_file_fails_the_scan() {
    let project = TempDir::new().expect("failed to create project dir");
    fs::write(project.path().join("index.html"), [0xff, 0xfe])
        .expect("failed to write root file");

    let err = default_scanner()
        .collect(project.path())
        .expect_err("non-UTF-8 root file must fail");

    match err {
        ScanError::RootFileRead { path, .. } => assert!(path.ends_with("index.html")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn disabled_root_file_is_never_read() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "index.html", "☃");

    let scanner = ScannerBuilder::new()
        .without_root_file()
        .build()
        .expect("scanner must build");
    let outcome = scanner.collect(project.path()).expect("scan must succeed");

    assert!(!outcome.charset().contains('☃'));
    assert_eq!(outcome.files_scanned(), 0);
}

#[test]
fn custom_source_dir_and_root_file_are_honoured() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "app/main.ts", "Ω");
    write_source(project.path(), "src/ignored.ts", "Ψ");
    write_source(project.path(), "main.html", "☃");

    let scanner = ScannerBuilder::new()
        .with_source_dir("app")
        .with_root_file("main.html")
        .build()
        .expect("scanner must build");
    let outcome = scanner.collect(project.path()).expect("scan must succeed");

    assert!(outcome.charset().contains('Ω'));
    assert!(outcome.charset().contains('☃'));
    assert!(!outcome.charset().contains('Ψ'));
}

#[test]
fn custom_extensions_replace_the_defaults() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/lib.rs", "Ω");
    write_source(project.path(), "src/app.ts", "Ψ");

    let scanner = ScannerBuilder::new()
        .with_extensions(["RS"])
        .build()
        .expect("scanner must build");
    let outcome = scanner.collect(project.path()).expect("scan must succeed");

    assert!(outcome.charset().contains('Ω'));
    assert!(!outcome.charset().contains('Ψ'));
}

#[test]
fn custom_skip_dirs_replace_the_defaults() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/generated/gen.ts", "Ω");
    write_source(project.path(), "src/node_modules/dep.ts", "Ψ");

    let scanner = ScannerBuilder::new()
        .with_skip_dirs(["generated"])
        .build()
        .expect("scanner must build");
    let outcome = scanner.collect(project.path()).expect("scan must succeed");

    assert!(!outcome.charset().contains('Ω'));
    assert!(outcome.charset().contains('Ψ'));
}

#[test]
fn skip_names_never_apply_to_files() {
    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "src/vendor.ts", "Ω");

    let scanner = ScannerBuilder::new()
        .with_skip_dirs(["vendor.ts"])
        .build()
        .expect("scanner must build");
    let outcome = scanner.collect(project.path()).expect("scan must succeed");

    assert!(outcome.charset().contains('Ω'));
    assert_eq!(outcome.files_scanned(), 1);
}

#[cfg(unix)]
#[test]
fn symbolic_links_are_not_followed() {
    use std::os::unix::fs::symlink;

    let project = TempDir::new().expect("failed to create project dir");
    write_source(project.path(), "assets/real.ts", "Ω");
    write_source(project.path(), "shared/nested.ts", "Ψ");
    fs::create_dir_all(project.path().join("src"))
        .expect("failed to create source directories");
    symlink(
        project.path().join("assets/real.ts"),
        project.path().join("src/link.ts"),
    )
    .expect("failed to link source file");
    symlink(project.path().join("shared"), project.path().join("src/shared"))
        .expect("failed to link source directory");

    let outcome = default_scanner()
        .collect(project.path())
        .expect("scan must succeed");

    assert!(!outcome.charset().contains('Ω'));
    assert!(!outcome.charset().contains('Ψ'));
    assert_eq!(outcome.files_scanned(), 0);
    assert_eq!(outcome.files_skipped(), 0);
}

#[test]
fn build_rejects_an_empty_extension_list() {
    let err = ScannerBuilder::new()
        .with_extensions(Vec::<String>::new())
        .build()
        .expect_err("empty extension list must fail");

    assert!(matches!(err, ScanError::EmptyExtensions));
}

#[rstest]
#[case(" ")]
#[case(".")]
#[case("..ts")]
#[case("d.ts")]
fn build_rejects_unusable_extensions(#[case] raw: &str) {
    let err = ScannerBuilder::new()
        .with_extensions([raw])
        .build()
        .expect_err("unusable extension must fail");

    match err {
        ScanError::InvalidExtension { raw: reported } => assert_eq!(reported, raw),
        other => panic!("unexpected error: {other}"),
    }
}
