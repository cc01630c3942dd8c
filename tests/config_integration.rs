//! Integration tests for session configuration
//!
//! Loading from disk, discovery, and the effect of overrides on analysis.

use css_promptify::config::{discover_config, load_from_path, load_from_str, CONFIG_FILE_NAME};
use css_promptify::{Analyzer, ConfigError, RuleGroup, Severity};
use std::fs;
use tempfile::TempDir;

const CSS: &str = ".a {\n\tmargin: 0px !important;\n}\n";

#[test]
fn test_discover_walks_up() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();

    let found = discover_config(&nested).unwrap();
    assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
}

#[test]
fn test_load_from_path_and_analyze() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        r#"
[rules."format/no-tabs"]
severity = "error"

[groups.tokens]
enabled = false

[groups.education]
severity = "warning"
"#,
    )
    .unwrap();

    let analyzer = Analyzer::new();
    let config = load_from_path(&path, analyzer.registry()).unwrap();
    let result = analyzer.analyze(CSS, &config);

    let tabs = result
        .issues
        .iter()
        .find(|i| i.rule_id == "format/no-tabs")
        .unwrap();
    assert_eq!(tabs.severity, Severity::Error);

    assert!(result.issues.iter().all(|i| i.group != RuleGroup::Tokens));

    let important = result
        .issues
        .iter()
        .find(|i| i.rule_id == "style/important-used")
        .unwrap();
    assert_eq!(important.severity, Severity::Warning);
}

#[test]
fn test_default_rule_can_be_disabled() {
    let analyzer = Analyzer::new();
    let css = ".a {\n  color: red;\n}\n";

    let before = analyzer.analyze(css, &Default::default());
    assert!(before
        .issues
        .iter()
        .any(|i| i.rule_id == "format/single-prop-single-line"));

    let config = load_from_str(
        "[rules.\"format/single-prop-single-line\"]\nenabled = false\n",
        analyzer.registry(),
    )
    .unwrap();
    let after = analyzer.analyze(css, &config);
    assert!(after.issues.is_empty());
}

#[test]
fn test_invalid_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[rules.\"nope/rule\"]\nenabled = true\n").unwrap();

    let analyzer = Analyzer::new();
    let err = load_from_path(&path, analyzer.registry()).unwrap_err();

    assert!(matches!(err, ConfigError::Validation { .. }));
    let message = err.to_string();
    assert!(message.contains("bad.toml"));
    assert!(message.contains("nope/rule"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let analyzer = Analyzer::new();

    let err = load_from_path(dir.path().join("absent.toml"), analyzer.registry()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
