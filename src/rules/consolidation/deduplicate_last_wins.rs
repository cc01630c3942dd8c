//! consolidate/deduplicate-last-wins: drop declarations a later one overrides.

use crate::css::{block_declarations, kinds, Declaration};
use crate::issue::{Fixability, Issue, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::consolidation::removal_patch;

const META: RuleMeta = RuleMeta {
    rule_id: "consolidate/deduplicate-last-wins",
    group: RuleGroup::Consolidation,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "declaration blocks with duplicate properties",
};

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

#[derive(Debug, Default)]
pub struct DeduplicateLastWinsRule;

impl DeduplicateLastWinsRule {
    pub fn new() -> Self {
        Self
    }

    /// Declarations grouped by property, in order of first appearance.
    fn duplicate_groups<'t>(decls: &[Declaration<'t>]) -> Vec<Vec<Declaration<'t>>> {
        let mut groups: Vec<(String, Vec<Declaration<'t>>)> = Vec::new();
        for decl in decls {
            let key = decl.property_key();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, group)) => group.push(*decl),
                None => groups.push((key, vec![*decl])),
            }
        }
        groups
            .into_iter()
            .map(|(_, group)| group)
            .filter(|group| group.len() > 1)
            .collect()
    }

    /// A group the cascade does not resolve to its last member, or that
    /// carries a vendor-prefixed fallback value.
    fn must_keep(group: &[Declaration<'_>]) -> bool {
        let Some(last) = group.last() else {
            return true;
        };
        let earlier_important = group.iter().any(|d| d.important) && !last.important;
        let fallback = group.iter().any(|d| {
            let value = d.raw_value().to_ascii_lowercase();
            VENDOR_PREFIXES.iter().any(|prefix| value.contains(prefix))
        });
        earlier_important || fallback
    }
}

impl Rule for DeduplicateLastWinsRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let line_count = ctx.lines().count();

        ctx.stylesheet.visit(kinds::BLOCK, |block| {
            let decls = block_declarations(block);
            for group in Self::duplicate_groups(&decls) {
                if Self::must_keep(&group) {
                    continue;
                }
                let Some((last, overridden)) = group.split_last() else {
                    continue;
                };
                let winner = last.value();
                for dup in overridden {
                    let property = dup.property_key();
                    let value = dup.value();
                    issues.push(
                        ctx.report(
                            &META,
                            format!("Duplicate '{property}' will be overridden by later value"),
                            dup.range(),
                            RuleLogic::new(
                                format!("Found duplicate '{property}' with value '{value}'"),
                                format!(
                                    "CSS uses last-wins semantics; this value is overridden by '{winner}'"
                                ),
                                "Safe because CSS already ignores this declaration",
                            ),
                        )
                        .safe(
                            "",
                            vec![removal_patch(dup, line_count)],
                            &format!("removed earlier overridden value {value}"),
                        ),
                    );
                }
            }
        });

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check_css, fix_all, fix_all_with};

    #[test]
    fn removes_overridden_line() {
        let source = ".title {\n  font-weight: 400;\n  font-weight: 700;\n}";
        let issues = check_css(&DeduplicateLastWinsRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Duplicate 'font-weight' will be overridden by later value");
        assert_eq!(fix_all(source, &issues), ".title {\n  font-weight: 700;\n}");
    }

    #[test]
    fn comment_lands_on_surviving_declaration() {
        let source = ".title {\n  font-weight: 400;\n  font-weight: 700;\n}";
        let issues = check_css(&DeduplicateLastWinsRule::new(), source);
        assert_eq!(
            fix_all_with(source, &issues, true),
            ".title {\n  font-weight: 700; /* cssreview: consolidate/deduplicate-last-wins: removed earlier overridden value 400 */\n}"
        );
    }

    #[test]
    fn removes_inline_duplicate_with_its_spacing() {
        let source = ".a { color: red; color: blue; }";
        let issues = check_css(&DeduplicateLastWinsRule::new(), source);
        assert_eq!(fix_all(source, &issues), ".a { color: blue; }");
    }

    #[test]
    fn multi_line_duplicate_leaves_neighbour_intact() {
        let source = ".a {\n  margin:    1px\n    22px; color: red;\n  margin: 0;\n}";
        let issues = check_css(&DeduplicateLastWinsRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert_eq!(fix_all(source, &issues), ".a {\n  color: red;\n  margin: 0;\n}");
    }

    #[test]
    fn multi_line_duplicate_takes_its_lines() {
        let source = ".a {\n  margin: 1px\n    2px;\n  margin: 0;\n}";
        let issues = check_css(&DeduplicateLastWinsRule::new(), source);

        assert_eq!(fix_all(source, &issues), ".a {\n  margin: 0;\n}");
    }

    #[test]
    fn property_names_match_case_insensitively() {
        let source = ".a {\n  COLOR: red;\n  color: blue;\n}";
        assert_eq!(check_css(&DeduplicateLastWinsRule::new(), source).len(), 1);
    }

    #[test]
    fn important_earlier_value_is_kept() {
        let source = ".a {\n  color: red !important;\n  color: blue;\n}";
        assert!(check_css(&DeduplicateLastWinsRule::new(), source).is_empty());
    }

    #[test]
    fn vendor_fallbacks_are_kept() {
        let source = ".a {\n  display: -webkit-box;\n  display: flex;\n}";
        assert!(check_css(&DeduplicateLastWinsRule::new(), source).is_empty());
    }

    #[test]
    fn separate_blocks_do_not_interact() {
        let source = ".a { color: red; }\n.b { color: blue; }";
        assert!(check_css(&DeduplicateLastWinsRule::new(), source).is_empty());
    }
}
