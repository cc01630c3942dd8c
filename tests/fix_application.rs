//! End-to-end tests: analyze a stylesheet, select fixes, apply them.

use css_promptify::{apply_fixes, Analyzer, Issue, SessionConfig};
use proptest::prelude::*;

fn analyze(css: &str) -> Vec<Issue> {
    Analyzer::new()
        .analyze(css, &SessionConfig::default())
        .issues
}

/// Fix ids of every issue reported by `rule_id`.
fn fixes_of(issues: &[Issue], rule_id: &str) -> Vec<String> {
    issues
        .iter()
        .filter(|issue| issue.rule_id == rule_id)
        .filter_map(|issue| issue.fix())
        .map(|fix| fix.id.clone())
        .collect()
}

fn braces_balanced(css: &str) -> bool {
    css.matches('{').count() == css.matches('}').count()
}

#[test]
fn tab_fix_without_comments() {
    let css = ".card {\n\tpadding: 8px;\n}";
    let issues = analyze(css);
    let selected = fixes_of(&issues, "format/no-tabs");
    assert_eq!(selected.len(), 1);

    let result = apply_fixes(css, &issues, &selected, false);

    assert_eq!(result.css, ".card {\n  padding: 8px;\n}");
    assert_eq!(result.applied_fixes.len(), 1);
    assert!(!result.applied_fixes[0].comment.was_inserted);
}

#[test]
fn tab_fix_with_comment() {
    let css = ".card {\n\tpadding: 8px;\n}";
    let issues = analyze(css);
    let selected = fixes_of(&issues, "format/no-tabs");

    let result = apply_fixes(css, &issues, &selected, true);

    assert_eq!(
        result.css,
        ".card {\n  padding: 8px; /* cssreview: format/no-tabs: converted tabs to spaces */\n}"
    );
    let line = result.css.lines().nth(1).unwrap();
    assert_eq!(line.matches("/*").count(), 1);
    assert!(result.applied_fixes[0].comment.was_inserted);
}

#[test]
fn crlf_stylesheet_keeps_line_endings_when_commented() {
    let css = ".card {\r\n\tpadding: 8px;\r\n}\r\n";
    let issues = analyze(css);
    let selected = fixes_of(&issues, "format/no-tabs");

    let result = apply_fixes(css, &issues, &selected, true);

    assert_eq!(
        result.css,
        ".card {\r\n  padding: 8px; /* cssreview: format/no-tabs: converted tabs to spaces */\r\n}\r\n"
    );
}

#[test]
fn padding_longhands_collapse_to_shorthand() {
    let css = ".box {\n  padding-top: 8px;\n  padding-right: 8px;\n  padding-bottom: 8px;\n  padding-left: 8px;\n}";
    let issues = analyze(css);
    let selected = fixes_of(&issues, "consolidate/shorthand-margin-padding");
    assert_eq!(selected.len(), 1);

    let result = apply_fixes(css, &issues, &selected, false);

    assert_eq!(result.css, ".box {\n  padding: 8px;\n}");
    assert!(!result.css.contains(";;"));
}

#[test]
fn duplicate_declaration_keeps_last() {
    let css = ".title {\n  font-weight: 400;\n  font-weight: 700;\n}";
    let issues = analyze(css);
    let selected = fixes_of(&issues, "consolidate/deduplicate-last-wins");
    assert_eq!(selected.len(), 1);

    let result = apply_fixes(css, &issues, &selected, false);

    assert_eq!(result.css, ".title {\n  font-weight: 700;\n}");
}

#[test]
fn empty_selection_returns_input() {
    let css = ".a {\n\tmargin: 0px;\n  color: #FFFFFF;\n}\n";
    let issues = analyze(css);
    assert!(!issues.is_empty());

    let result = apply_fixes(css, &issues, &[] as &[&str], true);

    assert_eq!(result.css, css);
    assert!(result.applied_fixes.is_empty());
    assert!(result.conflicts.is_empty());
}

#[test]
fn unknown_fix_ids_are_ignored() {
    let css = ".a {\n\tcolor: red;\n}";
    let issues = analyze(css);

    let result = apply_fixes(css, &issues, &["fix-nope-1"], false);

    assert_eq!(result.css, css);
    assert!(result.applied_fixes.is_empty());
}

#[test]
fn overlapping_selection_is_rejected_whole() {
    let css = ".a {\n  margin: 0px; padding: 0px;\n}";
    let issues = analyze(css);
    let split = fixes_of(&issues, "format/multiple-declarations-per-line");
    let zeros = fixes_of(&issues, "tokens/zero-units");
    assert_eq!(split.len(), 1);
    assert_eq!(zeros.len(), 2);

    let selected: Vec<String> = split.iter().chain(&zeros).cloned().collect();
    let result = apply_fixes(css, &issues, &selected, true);

    assert_eq!(result.css, css);
    assert!(result.applied_fixes.is_empty());
    assert_eq!(result.conflicts.len(), 2);
    assert!(result.conflicts.iter().all(|c| c.fix_a == split[0]));

    // each side on its own is fine
    let only_zeros = apply_fixes(css, &issues, &zeros, false);
    assert!(only_zeros.conflicts.is_empty());
    assert_eq!(only_zeros.css, ".a {\n  margin: 0; padding: 0;\n}");
}

#[test]
fn every_single_fix_keeps_braces_balanced() {
    let css = "\
.card { color: red; background: blue; }
.box {
\tmargin-top: 0px;
\tmargin-right: 1.50em;
\tmargin-bottom: 0px;
\tmargin-left: 1.50em;
}
.title {
   font-weight: 400;
  font-weight: 700;
  color: #AABBCC;
  background: rgb(255, 0, 0);
}
h1, h2 {
  color: #ffffff;
}
";
    assert!(braces_balanced(css));
    let issues = analyze(css);
    let fix_ids: Vec<&str> = issues
        .iter()
        .filter_map(|issue| issue.fix())
        .map(|fix| fix.id.as_str())
        .collect();
    assert!(fix_ids.len() > 5);

    for id in fix_ids {
        for comments in [false, true] {
            let result = apply_fixes(css, &issues, &[id], comments);
            assert_eq!(result.applied_fixes.len(), 1, "fix {id} was not applied");
            assert!(braces_balanced(&result.css), "fix {id} broke braces:\n{}", result.css);
        }
    }
}

#[test]
fn reset_makes_analysis_repeatable() {
    let css = ".a {\n\tmargin: 0px !important;\n  colr: red;\n}";
    let analyzer = Analyzer::new();
    let config = SessionConfig::default();

    let first = analyzer.analyze(css, &config);
    let continued = analyzer.analyze(css, &config);
    assert_ne!(first.issues[0].id, continued.issues[0].id);

    analyzer.reset_ids();
    let again = analyzer.analyze(css, &config);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&again).unwrap()
    );
}

#[test]
fn fixes_reapplied_after_reanalysis_converge() {
    let css = ".a {\n\tmargin: 0px;\n\tcolor: #FFFFFF;\n}\n";
    let analyzer = Analyzer::new();
    let config = SessionConfig::default();

    let mut current = css.to_string();
    for _ in 0..4 {
        let issues = analyzer.analyze(&current, &config).issues;
        let ids: Vec<&str> = issues
            .iter()
            .filter_map(|issue| issue.fix())
            .map(|fix| fix.id.as_str())
            .collect();
        if ids.is_empty() {
            break;
        }
        let result = apply_fixes(&current, &issues, &ids, false);
        if !result.conflicts.is_empty() {
            let first = [ids[0]];
            current = apply_fixes(&current, &issues, &first, false).css;
        } else {
            current = result.css;
        }
    }

    assert_eq!(current, ".a {\n  margin: 0;\n  color: #fff;\n}\n");
}

proptest! {
    #[test]
    fn zero_selection_is_identity(css in "[a-z#.{}:; \n\t0-9%-]{0,120}") {
        let analyzer = Analyzer::new();
        let result = analyzer.analyze(&css, &SessionConfig::default());
        let applied = apply_fixes(&css, &result.issues, &[] as &[&str], true);
        prop_assert_eq!(applied.css, css);
    }
}
