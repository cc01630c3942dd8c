//! format/single-prop-single-line: collapse a multi-line rule holding one
//! declaration onto a single line.

use crate::css::{block_declarations, kinds};
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::format::selector_list;

const META: RuleMeta = RuleMeta {
    rule_id: "format/single-prop-single-line",
    group: RuleGroup::Format,
    severity: Severity::Info,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "rule blocks with exactly one declaration that span multiple lines",
};

#[derive(Debug, Default)]
pub struct SinglePropSingleLineRule;

impl SinglePropSingleLineRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SinglePropSingleLineRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::RULE_SET, |rule| {
            if rule.has_error() || !rule.range().is_multiline() {
                return;
            }
            let (Some(selectors), Some(block)) = (
                rule.child_of_kind(kinds::SELECTORS),
                rule.child_of_kind(kinds::BLOCK),
            ) else {
                return;
            };
            // comments and nested rules would not survive the collapse
            if block.named_children().len() != 1 {
                return;
            }
            let decls = block_declarations(block);
            let [decl] = decls.as_slice() else {
                return;
            };

            let collapsed = format!(
                "{} {{ {} }}",
                selector_list(selectors).join(", "),
                decl.to_canonical()
            );

            issues.push(
                ctx.report(
                    &META,
                    "Single-property rule can be collapsed to one line",
                    rule.range(),
                    RuleLogic::new(
                        "Found multi-line rule with only one property",
                        "Single-property rules on one line save tokens and improve scannability",
                        "Always safe - only affects formatting, not behavior",
                    ),
                )
                .safe(
                    collapsed.clone(),
                    vec![Patch::replace(rule.range(), collapsed)],
                    "single property kept on one line",
                ),
            );
        });

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check_css, fix_all, fix_all_with};

    #[test]
    fn collapses_single_property_rule() {
        let source = ".a {\n  color: #fff;\n}";
        let issues = check_css(&SinglePropSingleLineRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert_eq!(fix_all(source, &issues), ".a { color: #fff; }");
        assert_eq!(
            fix_all_with(source, &issues, true),
            ".a { color: #fff; /* cssreview: format/single-prop-single-line: single property kept on one line */ }"
        );
    }

    #[test]
    fn keeps_selector_list_spacing() {
        let source = ".a,\n.b {\n  margin: 0;\n}\n";
        let issues = check_css(&SinglePropSingleLineRule::new(), source);
        assert_eq!(fix_all(source, &issues), ".a, .b { margin: 0; }\n");
    }

    #[test]
    fn skips_rules_with_several_declarations_or_comments() {
        let source = ".a {\n  color: red;\n  margin: 0;\n}\n.b {\n  /* note */\n  color: red;\n}";
        assert!(check_css(&SinglePropSingleLineRule::new(), source).is_empty());
    }

    #[test]
    fn one_line_rule_is_already_collapsed() {
        assert!(check_css(&SinglePropSingleLineRule::new(), ".a { color: red; }").is_empty());
    }
}
