//! layout/flex-properties-require-flex: container properties on a rule
//! that is not a flex container.

use crate::css::{block_declarations, kinds};
use crate::issue::{Fixability, Issue, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};

const META: RuleMeta = RuleMeta {
    rule_id: "layout/flex-properties-require-flex",
    group: RuleGroup::Education,
    severity: Severity::Info,
    fixability: Fixability::None,
    enabled_by_default: true,
    applies_to: "CSS rules using flexbox container properties",
};

const FLEX_CONTAINER_PROPERTIES: &[&str] = &[
    "flex-direction",
    "flex-wrap",
    "flex-flow",
    "justify-content",
    "align-items",
    "align-content",
    "gap",
    "row-gap",
    "column-gap",
];

/// Container properties grid layout honours as well.
const SHARED_WITH_GRID: &[&str] = &[
    "justify-content",
    "align-items",
    "align-content",
    "gap",
    "row-gap",
    "column-gap",
];

#[derive(Debug, Default)]
pub struct FlexPropertiesRequireFlexRule;

impl FlexPropertiesRequireFlexRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for FlexPropertiesRequireFlexRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::RULE_SET, |rule_set| {
            let Some(block) = rule_set.child_of_kind(kinds::BLOCK) else {
                return;
            };
            let decls = block_declarations(block);
            let display: Vec<String> = decls
                .iter()
                .filter(|d| d.property_key() == "display")
                .map(|d| d.value().to_ascii_lowercase())
                .collect();
            if display.iter().any(|v| v.contains("flex")) {
                return;
            }
            let is_grid = display.iter().any(|v| v.contains("grid"));

            for decl in &decls {
                let property = decl.property_key();
                if !FLEX_CONTAINER_PROPERTIES.contains(&property.as_str()) {
                    continue;
                }
                if is_grid && SHARED_WITH_GRID.contains(&property.as_str()) {
                    continue;
                }
                issues.push(
                    ctx.report(
                        &META,
                        format!("'{property}' used without 'display: flex' in same rule"),
                        decl.range(),
                        RuleLogic::new(
                            format!("Found flex property '{property}' without display: flex"),
                            format!(
                                "'{property}' is a flex container property that only works when display is set to flex or inline-flex"
                            ),
                            "No auto-fix - verify display: flex is set on this element",
                        ),
                    )
                    .info(),
                );
            }
        });

        issues
    }
}
