//! format/no-tabs: replace tab characters with two spaces each.

use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::span::Range;
use once_cell::sync::Lazy;
use regex::Regex;

static TAB_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t+").unwrap());

const META: RuleMeta = RuleMeta {
    rule_id: "format/no-tabs",
    group: RuleGroup::Format,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "all CSS content containing tab characters",
};

#[derive(Debug, Default)]
pub struct NoTabsRule;

impl NoTabsRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoTabsRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (line_no, line) in ctx.lines() {
            let runs: Vec<_> = TAB_RUN.find_iter(line).collect();
            let Some(first) = runs.first() else {
                continue;
            };
            let last = runs[runs.len() - 1];

            let tab_count: usize = runs.iter().map(|m| m.len()).sum();
            let patches = runs
                .iter()
                .map(|m| {
                    Patch::replace(
                        Range::on_line(line_no, m.start() + 1, m.len()),
                        "  ".repeat(m.len()),
                    )
                })
                .collect();
            let location = Range::from_coords(line_no, first.start() + 1, line_no, last.end() + 1);
            let plural = if tab_count > 1 { "s" } else { "" };

            issues.push(
                ctx.report(
                    &META,
                    format!("Found {tab_count} tab{plural}, use spaces instead"),
                    location,
                    RuleLogic::new(
                        format!("Detected {tab_count} tab character{plural}"),
                        "Tabs render inconsistently across editors and make CSS harder for LLMs to parse accurately",
                        "Always safe - tabs and spaces are visually interchangeable for indentation",
                    ),
                )
                .safe(line.replace('\t', "  "), patches, "converted tabs to spaces"),
            );
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check_css, fix_all, fix_all_with};

    #[test]
    fn single_tab_becomes_two_spaces() {
        let source = ".card {\n\tpadding: 8px;\n}";
        let issues = check_css(&NoTabsRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, Range::on_line(2, 1, 1));
        assert_eq!(fix_all(source, &issues), ".card {\n  padding: 8px;\n}");
    }

    #[test]
    fn double_tab_becomes_four_spaces() {
        let source = ".card {\n\t\tpadding: 8px;\n}";
        let issues = check_css(&NoTabsRule::new(), source);
        assert_eq!(fix_all(source, &issues), ".card {\n    padding: 8px;\n}");
    }

    #[test]
    fn every_line_gets_its_own_comment() {
        let source = ".card {\n\tpadding: 8px;\n\tmargin: 0;\n}";
        let issues = check_css(&NoTabsRule::new(), source);

        assert_eq!(issues.len(), 2);
        assert_eq!(
            fix_all_with(source, &issues, true),
            ".card {\n  padding: 8px; /* cssreview: format/no-tabs: converted tabs to spaces */\n  margin: 0; /* cssreview: format/no-tabs: converted tabs to spaces */\n}"
        );
    }

    #[test]
    fn interior_tab_runs_share_one_fix() {
        let source = ".a {\n\tmargin:\t0;\n}";
        let issues = check_css(&NoTabsRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].fix().unwrap().patches.len(), 2);
        assert_eq!(fix_all(source, &issues), ".a {\n  margin:  0;\n}");
    }

    #[test]
    fn clean_source_has_no_issues() {
        assert!(check_css(&NoTabsRule::new(), ".a {\n  color: red;\n}").is_empty());
    }
}
