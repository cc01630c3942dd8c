//! format/one-selector-per-line: put each selector of a list on its own line.

use crate::css::kinds;
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::format::{indentation, selector_list};
use std::collections::HashSet;

const META: RuleMeta = RuleMeta {
    rule_id: "format/one-selector-per-line",
    group: RuleGroup::Format,
    severity: Severity::Info,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "CSS rules with multiple comma-separated selectors",
};

#[derive(Debug, Default)]
pub struct OneSelectorPerLineRule;

impl OneSelectorPerLineRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OneSelectorPerLineRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::SELECTORS, |selectors| {
            if selectors.has_error() {
                return;
            }
            let items: Vec<_> = selectors
                .named_children()
                .into_iter()
                .filter(|n| n.kind() != kinds::COMMENT)
                .collect();
            if items.len() < 2 {
                return;
            }
            let lines: HashSet<usize> = items.iter().map(|n| n.start().line).collect();
            if lines.len() == items.len() {
                return;
            }

            let names = selector_list(selectors);
            let separator = format!(",\n{}", indentation(selectors.start_line_text()));
            let fixed = names.join(&separator);

            issues.push(
                ctx.report(
                    &META,
                    format!("Multiple selectors on same line ({} selectors)", names.len()),
                    selectors.range(),
                    RuleLogic::new(
                        format!(
                            "Found {} comma-separated selectors not each on their own line",
                            names.len()
                        ),
                        "One selector per line improves readability and makes diffs cleaner",
                        "Always safe - formatting only, does not change selector specificity or matching",
                    ),
                )
                .safe(
                    fixed.clone(),
                    vec![Patch::replace(selectors.range(), fixed)],
                    "one selector per line",
                ),
            );
        });

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check_css, fix_all};

    #[test]
    fn splits_selector_list() {
        let source = ".sel-a, .sel-b {\n  color: pink;\n}";
        let issues = check_css(&OneSelectorPerLineRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert_eq!(fix_all(source, &issues), ".sel-a,\n.sel-b {\n  color: pink;\n}");
    }

    #[test]
    fn nested_rule_keeps_its_indentation() {
        let source = "@media print {\n  .a, .b {\n    color: black;\n  }\n}";
        let issues = check_css(&OneSelectorPerLineRule::new(), source);
        assert_eq!(
            fix_all(source, &issues),
            "@media print {\n  .a,\n  .b {\n    color: black;\n  }\n}"
        );
    }

    #[test]
    fn already_split_list_is_clean() {
        let source = ".a,\n.b {\n  color: red;\n}";
        assert!(check_css(&OneSelectorPerLineRule::new(), source).is_empty());
    }

    #[test]
    fn single_selector_is_clean() {
        assert!(check_css(&OneSelectorPerLineRule::new(), ".a { color: red; }").is_empty());
    }
}
