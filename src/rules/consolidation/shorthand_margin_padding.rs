//! consolidate/shorthand-margin-padding: four longhands into one shorthand.

use crate::css::{block_declarations, kinds, Declaration};
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::consolidation::removal_patch;
use crate::span::Range;

const META: RuleMeta = RuleMeta {
    rule_id: "consolidate/shorthand-margin-padding",
    group: RuleGroup::Consolidation,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "declaration blocks with all 4 margin or padding longhands",
};

const SHORTHANDS: &[&str] = &["margin", "padding"];
const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

#[derive(Debug, Default)]
pub struct ShorthandMarginPaddingRule;

impl ShorthandMarginPaddingRule {
    pub fn new() -> Self {
        Self
    }
}

/// Shortest shorthand value for the four sides, in top/right/bottom/left
/// order.
pub(crate) fn compress_sides(top: &str, right: &str, bottom: &str, left: &str) -> String {
    if top == right && right == bottom && bottom == left {
        top.to_string()
    } else if top == bottom && right == left {
        format!("{top} {right}")
    } else if right == left {
        format!("{top} {right} {bottom}")
    } else {
        format!("{top} {right} {bottom} {left}")
    }
}

/// The four longhands of `shorthand` in side order, if each appears exactly
/// once and none is `!important`.
fn longhands<'t>(decls: &[Declaration<'t>], shorthand: &str) -> Option<[Declaration<'t>; 4]> {
    let mut found: [Option<Declaration<'t>>; 4] = [None; 4];
    for decl in decls {
        let key = decl.property_key();
        let Some(side) = SIDES
            .iter()
            .position(|side| key == format!("{shorthand}-{side}"))
        else {
            continue;
        };
        if found[side].is_some() || decl.important {
            return None;
        }
        found[side] = Some(*decl);
    }
    let [top, right, bottom, left] = found;
    Some([top?, right?, bottom?, left?])
}

impl ShorthandMarginPaddingRule {
    fn consolidate(
        ctx: &RuleContext<'_>,
        decls: &[Declaration<'_>],
        shorthand: &str,
    ) -> Option<Issue> {
        let sides = longhands(decls, shorthand)?;
        let values = sides.map(|d| d.value());
        let value = compress_sides(&values[0], &values[1], &values[2], &values[3]);

        let mut ordered = sides;
        ordered.sort_by_key(|d| d.node.byte_range().start);
        let [first, .., last] = ordered;

        let first_idx = decls.iter().position(|d| d.node == first.node)?;
        let last_idx = decls.iter().position(|d| d.node == last.node)?;
        let between = &decls[first_idx..=last_idx];

        // another declaration of the same box in between would change the cascade
        if between.iter().any(|d| {
            d.property_key() == shorthand && !sides.iter().any(|s| s.node == d.node)
        }) {
            return None;
        }

        let declaration = format!("{shorthand}: {value};");
        let contiguous = between.len() == 4
            && between.windows(2).all(|pair| {
                ctx.source
                    .get(pair[0].node.byte_range().end..pair[1].node.byte_range().start)
                    .is_some_and(|gap| gap.trim().is_empty())
            });

        let location = Range::new(first.start(), last.end());
        let line_count = ctx.lines().count();
        let patches = if contiguous {
            vec![Patch::replace(location, declaration.clone())]
        } else {
            let mut patches = vec![Patch::replace(first.range(), declaration.clone())];
            patches.extend(ordered[1..].iter().map(|d| removal_patch(d, line_count)));
            patches
        };

        Some(
            ctx.report(
                &META,
                format!("{shorthand} longhands can be consolidated to: {shorthand}: {value}"),
                location,
                RuleLogic::new(
                    format!("Found all 4 {shorthand} longhands (top, right, bottom, left)"),
                    "Shorthand is more concise and saves tokens",
                    "Safe when all 4 longhands are present in the same block without !important",
                ),
            )
            .safe(
                declaration,
                patches,
                &format!("was {shorthand}-top/right/bottom/left"),
            ),
        )
    }
}

impl Rule for ShorthandMarginPaddingRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        ctx.stylesheet.visit(kinds::BLOCK, |block| {
            let decls = block_declarations(block);
            for shorthand in SHORTHANDS {
                issues.extend(Self::consolidate(ctx, &decls, shorthand));
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
    fn compresses_to_shortest_form() {
        assert_eq!(compress_sides("8px", "8px", "8px", "8px"), "8px");
        assert_eq!(compress_sides("1px", "2px", "1px", "2px"), "1px 2px");
        assert_eq!(compress_sides("1px", "2px", "3px", "2px"), "1px 2px 3px");
        assert_eq!(compress_sides("1px", "2px", "3px", "4px"), "1px 2px 3px 4px");
    }

    #[test]
    fn collapses_padding_box() {
        let source = ".box {\n  padding-top: 8px;\n  padding-right: 8px;\n  padding-bottom: 8px;\n  padding-left: 8px;\n}";
        let issues = check_css(&ShorthandMarginPaddingRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "padding longhands can be consolidated to: padding: 8px"
        );
        assert_eq!(fix_all(source, &issues), ".box {\n  padding: 8px;\n}");
    }

    #[test]
    fn collapsed_line_carries_comment() {
        let source = ".box {\n  margin-top: 0;\n  margin-right: 4px;\n  margin-bottom: 0;\n  margin-left: 4px;\n}";
        let issues = check_css(&ShorthandMarginPaddingRule::new(), source);
        assert_eq!(
            fix_all_with(source, &issues, true),
            ".box {\n  margin: 0 4px; /* cssreview: consolidate/shorthand-margin-padding: was margin-top/right/bottom/left */\n}"
        );
    }

    #[test]
    fn scattered_longhands_are_removed_individually() {
        let source = ".box {\n  margin-top: 1px;\n  color: red;\n  margin-right: 2px;\n  margin-bottom: 3px;\n  margin-left: 4px;\n}";
        let issues = check_css(&ShorthandMarginPaddingRule::new(), source);

        assert_eq!(issues[0].fix().unwrap().patches.len(), 4);
        assert_eq!(
            fix_all(source, &issues),
            ".box {\n  margin: 1px 2px 3px 4px;\n  color: red;\n}"
        );
    }

    #[test]
    fn incomplete_or_important_sets_are_left_alone() {
        let partial = ".a {\n  margin-top: 1px;\n  margin-left: 1px;\n}";
        let important = ".a {\n  margin-top: 1px !important;\n  margin-right: 1px;\n  margin-bottom: 1px;\n  margin-left: 1px;\n}";

        assert!(check_css(&ShorthandMarginPaddingRule::new(), partial).is_empty());
        assert!(check_css(&ShorthandMarginPaddingRule::new(), important).is_empty());
    }

    #[test]
    fn intervening_shorthand_blocks_consolidation() {
        let source = ".a {\n  margin-top: 1px;\n  margin: 0;\n  margin-right: 1px;\n  margin-bottom: 1px;\n  margin-left: 1px;\n}";
        assert!(check_css(&ShorthandMarginPaddingRule::new(), source).is_empty());
    }
}
