//! Tests for ExtractionService

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use wizstrings::application::services::{ExtractOptions, ExtractionService};
use wizstrings::application::ApplicationError;
use wizstrings::domain::{DomainError, NameMatcher, TreeNode};
use wizstrings::infrastructure::traits::RealFileSystem;
use wizstrings::util::testing;

const HEADER: &str = "// This file is autogenerated\n#include <QtGlobal>\n\n";

/// Helper to create a wizard file (and its directories) for testing
fn create_wizard(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).expect("create dirs");
    fs::write(&path, content).expect("write wizard file");
    path
}

fn service() -> ExtractionService {
    testing::init_test_setup();
    ExtractionService::new(Arc::new(RealFileSystem))
}

fn body_lines(rendered: &str) -> Vec<String> {
    rendered
        .strip_prefix(HEADER)
        .expect("header present")
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn given_two_wizards_at_different_depths_when_building_then_index_is_global() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let first = create_wizard(temp.path(), "a/wizard.json", r#"{"trDisplayName": "First"}"#);
    let second = create_wizard(
        temp.path(),
        "b/deeper/nested/wizard.json",
        r#"{"trDisplayName": "Second"}"#,
    );

    // Act
    let output = service()
        .build_document(temp.path(), &ExtractOptions::default())
        .unwrap();

    // Assert
    assert_eq!(output.sources, vec![first.clone(), second.clone()]);
    let lines = body_lines(&output.document.render());
    assert_eq!(
        lines,
        vec![
            format!(
                "const char *a0 = QT_TRANSLATE_NOOP(\"QtC::ProjectExplorer\", \"First\"); // {}",
                first.display()
            ),
            format!(
                "const char *a1 = QT_TRANSLATE_NOOP(\"QtC::ProjectExplorer\", \"Second\"); // {}",
                second.display()
            ),
        ]
    );
}

#[test]
fn given_several_records_per_file_when_building_then_index_never_resets() {
    let temp = TempDir::new().unwrap();
    create_wizard(
        temp.path(),
        "one/wizard.json",
        r#"{"trA": "1", "trB": "2", "pages": [{"trTitle": "3"}]}"#,
    );
    create_wizard(temp.path(), "two/wizard.json", r#"{"trA": "4", "trB": "5"}"#);

    let output = service()
        .build_document(temp.path(), &ExtractOptions::default())
        .unwrap();

    let lines = body_lines(&output.document.render());
    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        assert!(
            line.starts_with(&format!("const char *a{} = ", i)),
            "line {} has wrong index: {}",
            i,
            line
        );
    }
    // File order, then sorted-key depth-first order inside each file ("pages" < "trA")
    let values: Vec<_> = lines
        .iter()
        .map(|l| l.split('"').nth(3).unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["3", "1", "2", "4", "5"]);
    assert_eq!(output.summary.files, 2);
    assert_eq!(output.summary.records, 5);
}

#[test]
fn given_no_wizard_files_when_building_then_document_is_header_only() {
    let temp = TempDir::new().unwrap();
    create_wizard(temp.path(), "x/other.json", r#"{"trA": "ignored"}"#);

    let output = service()
        .build_document(temp.path(), &ExtractOptions::default())
        .unwrap();

    assert_eq!(output.document.render(), HEADER);
    assert_eq!(output.summary.files, 0);
    assert_eq!(output.summary.records, 0);
}

#[test]
fn given_wizard_file_when_building_then_record_count_equals_matching_leaves() {
    let temp = TempDir::new().unwrap();
    let content = r#"{
        "trDisplayName": "App",
        "trDescription": "Creates an app",
        "id": "Q.App",
        "options": [{"key": "Class", "value": "Main"}],
        "pages": [
            {"trDisplayName": "Location", "typeId": "Project"},
            {"trDisplayName": "Details", "data": [{"trText": "Name", "trToolTip": "The \"name\""}]}
        ],
        "trList": ["x", "y"]
    }"#;
    let path = create_wizard(temp.path(), "wizard.json", content);

    let output = service()
        .build_document(temp.path(), &ExtractOptions::default())
        .unwrap();

    let tree = TreeNode::parse(&fs::read_to_string(path).unwrap()).unwrap();
    let expected = tree.extract_matching(|k| k.starts_with("tr")).count();
    assert_eq!(expected, 6);
    assert_eq!(output.summary.records, expected);
    // Sequence elements are reached with the empty key, so trList items are not extracted
    assert!(!output.document.render().contains("\"x\""));
    assert!(output.document.render().contains(r#""The \"name\"""#));
}

#[test]
fn given_unchanged_tree_when_building_twice_then_output_is_identical() {
    let temp = TempDir::new().unwrap();
    create_wizard(temp.path(), "z/wizard.json", r#"{"trB": "b", "trA": "a"}"#);
    create_wizard(temp.path(), "m/wizard.json", r#"{"trC": "c"}"#);
    create_wizard(temp.path(), "a/wizard.json", r#"{"trD": "d"}"#);

    let svc = service();
    let first = svc
        .build_document(temp.path(), &ExtractOptions::default())
        .unwrap();
    let second = svc
        .build_document(temp.path(), &ExtractOptions::default())
        .unwrap();

    assert_eq!(first.document.render(), second.document.render());
    // Sorted directory order: a, m, z
    let values: Vec<_> = body_lines(&first.document.render())
        .iter()
        .map(|l| l.split('"').nth(3).unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["d", "c", "a", "b"]);
}

#[test]
fn given_malformed_wizard_when_running_then_fails_and_leaves_target_untouched() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_wizard(&src, "good/wizard.json", r#"{"trA": "fine"}"#);
    let bad = create_wizard(&src, "zz/wizard.json", r#"{"trA": "missing brace""#);
    let target = temp.path().join("stub.cpp");
    fs::write(&target, "previous content").unwrap();

    let result = service().run(&src, &target, &ExtractOptions::default());

    match result {
        Err(ApplicationError::Domain(DomainError::Parse { path, .. })) => assert_eq!(path, bad),
        other => panic!("expected parse error, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&target).unwrap(), "previous content");
}

#[test]
fn given_malformed_wizard_and_no_target_when_running_then_target_stays_absent() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_wizard(&src, "wizard.json", "not json");
    let target = temp.path().join("stub.cpp");

    let result = service().run(&src, &target, &ExtractOptions::default());

    assert!(result.is_err());
    assert!(!target.exists());
    // No stray temp files left next to the target
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .filter(|n| n != "src")
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
}

#[test]
fn given_valid_tree_when_running_then_overwrites_target() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_wizard(&src, "w/wizard.json", r#"{"trA": "hello"}"#);
    let target = temp.path().join("stub.cpp");
    fs::write(&target, "stale stuff that is much longer than the new content ......").unwrap();

    let summary = service()
        .run(&src, &target, &ExtractOptions::default())
        .unwrap();

    assert_eq!(summary.records, 1);
    let written = fs::read_to_string(&target).unwrap();
    assert!(written.starts_with(HEADER));
    assert!(written.contains("QT_TRANSLATE_NOOP(\"QtC::ProjectExplorer\", \"hello\")"));
    assert!(!written.contains("stale"));
}

#[test]
fn given_missing_root_when_building_then_root_not_found() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let result = service().build_document(&missing, &ExtractOptions::default());

    assert!(matches!(result, Err(ApplicationError::RootNotFound(p)) if p == missing));
}

#[rstest]
#[case("wizard.json", "tr", 2)]
#[case("wizard.json", "trDisplay", 1)]
#[case("wizard.json", "", 4)]
#[case("custom.json", "tr", 1)]
fn given_options_when_building_then_filters_files_and_keys(
    #[case] file_name: &str,
    #[case] key_prefix: &str,
    #[case] expected: usize,
) {
    let temp = TempDir::new().unwrap();
    create_wizard(
        temp.path(),
        "a/wizard.json",
        r#"{"trDisplayName": "A", "trDescription": "B", "id": "C", "n": 1}"#,
    );
    create_wizard(temp.path(), "b/custom.json", r#"{"trOnly": "D"}"#);

    let options = ExtractOptions {
        file_name: NameMatcher::exact(file_name),
        key: NameMatcher::prefix(key_prefix),
        ..ExtractOptions::default()
    };
    let output = service().build_document(temp.path(), &options).unwrap();

    assert_eq!(output.summary.records, expected);
}

#[test]
fn given_custom_context_when_building_then_lines_use_it() {
    let temp = TempDir::new().unwrap();
    create_wizard(temp.path(), "wizard.json", r#"{"trA": "x"}"#);

    let options = ExtractOptions {
        context: "QtC::Core".into(),
        ..ExtractOptions::default()
    };
    let output = service().build_document(temp.path(), &options).unwrap();

    assert!(output.document.lines()[0].contains("QT_TRANSLATE_NOOP(\"QtC::Core\", \"x\")"));
}

#[test]
fn given_directory_named_like_wizard_when_scanning_then_ignored() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("wizard.json")).unwrap();
    create_wizard(temp.path(), "real/wizard.json", r#"{"trA": "x"}"#);

    let found = service()
        .scan(temp.path(), &ExtractOptions::default())
        .unwrap();

    assert_eq!(found, vec![temp.path().join("real/wizard.json")]);
}

#[test]
fn given_matching_target_when_checking_then_ok_and_stale_after_change() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    let wizard = create_wizard(&src, "wizard.json", r#"{"trA": "x"}"#);
    let target = temp.path().join("stub.cpp");
    let svc = service();
    let options = ExtractOptions::default();

    // Missing target is stale
    let built = svc.build_document(&src, &options).unwrap();
    assert!(matches!(
        svc.check_document(&target, &built.document),
        Err(ApplicationError::Stale(_))
    ));

    svc.write_document(&target, &built.document).unwrap();
    svc.check_document(&target, &built.document).unwrap();

    fs::write(&wizard, r#"{"trA": "changed"}"#).unwrap();
    let rebuilt = svc.build_document(&src, &options).unwrap();
    assert!(matches!(
        svc.check_document(&target, &rebuilt.document),
        Err(ApplicationError::Stale(_))
    ));
    // Check never writes
    assert!(fs::read_to_string(&target).unwrap().contains("\"x\""));
}

#[cfg(unix)]
#[test]
fn given_symlinked_wizard_file_when_building_then_it_is_read() {
    use std::os::unix::fs::symlink;

    let temp = TempDir::new().unwrap();
    let shared = create_wizard(temp.path(), "shared/linked.json", r#"{"trA": "linked"}"#);
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("a")).unwrap();
    symlink(&shared, src.join("a/wizard.json")).unwrap();

    let output = service()
        .build_document(&src, &ExtractOptions::default())
        .unwrap();

    assert_eq!(output.summary.files, 1);
    assert_eq!(output.summary.records, 1);
    assert!(output.document.lines()[0].contains("\"linked\""));
}

#[cfg(unix)]
#[test]
fn given_symlinked_directory_when_building_without_follow_links_then_not_entered() {
    use std::os::unix::fs::symlink;

    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    create_wizard(&outside, "wizard.json", r#"{"trA": "outside"}"#);
    let src = temp.path().join("src");
    create_wizard(&src, "own/wizard.json", r#"{"trA": "own"}"#);
    symlink(&outside, src.join("linked")).unwrap();

    let svc = service();
    let plain = svc
        .build_document(&src, &ExtractOptions::default())
        .unwrap();
    let followed = svc
        .build_document(
            &src,
            &ExtractOptions {
                follow_links: true,
                ..ExtractOptions::default()
            },
        )
        .unwrap();

    assert_eq!(plain.summary.records, 1);
    assert_eq!(followed.summary.records, 2);
}
