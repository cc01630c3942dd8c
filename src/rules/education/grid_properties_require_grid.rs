//! layout/grid-properties-require-grid: grid-only properties on a rule
//! that is not a grid container.

use crate::css::{block_declarations, kinds};
use crate::issue::{Fixability, Issue, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};

const META: RuleMeta = RuleMeta {
    rule_id: "layout/grid-properties-require-grid",
    group: RuleGroup::Education,
    severity: Severity::Info,
    fixability: Fixability::None,
    enabled_by_default: true,
    applies_to: "CSS rules using grid properties",
};

/// Properties that mean nothing outside grid layout.
const GRID_ONLY_PROPERTIES: &[&str] = &[
    "grid",
    "grid-template",
    "grid-template-columns",
    "grid-template-rows",
    "grid-template-areas",
    "grid-auto-columns",
    "grid-auto-rows",
    "grid-auto-flow",
    "grid-area",
    "grid-row",
    "grid-row-start",
    "grid-row-end",
    "grid-column",
    "grid-column-start",
    "grid-column-end",
];

/// Grid-only properties set on the container; the rest apply to items.
const GRID_CONTAINER_PROPERTIES: &[&str] = &[
    "grid",
    "grid-template",
    "grid-template-columns",
    "grid-template-rows",
    "grid-template-areas",
    "grid-auto-columns",
    "grid-auto-rows",
    "grid-auto-flow",
];

/// Mostly grid container properties that flex containers ignore.
const MOSTLY_GRID: &[&str] = &["justify-items", "place-items"];

#[derive(Debug, Default)]
pub struct GridPropertiesRequireGridRule;

impl GridPropertiesRequireGridRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for GridPropertiesRequireGridRule {
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
            if display.iter().any(|v| v.contains("grid")) {
                return;
            }
            let is_flex = display.iter().any(|v| v.contains("flex"));

            for decl in &decls {
                let property = decl.property_key();
                let why = if GRID_ONLY_PROPERTIES.contains(&property.as_str()) {
                    if GRID_CONTAINER_PROPERTIES.contains(&property.as_str()) {
                        format!("'{property}' is a grid container property that only works when display is set to grid or inline-grid")
                    } else {
                        format!("'{property}' is a grid item property that only works on children of grid containers")
                    }
                } else if !is_flex && MOSTLY_GRID.contains(&property.as_str()) {
                    format!("'{property}' is primarily a grid container property (also works in some block contexts)")
                } else {
                    continue;
                };
                issues.push(
                    ctx.report(
                        &META,
                        format!("'{property}' used without 'display: grid' in same rule"),
                        decl.range(),
                        RuleLogic::new(
                            format!("Found grid property '{property}' without display: grid"),
                            why,
                            "No auto-fix - verify display: grid is set on this element or a parent (for item properties)",
                        ),
                    )
                    .info(),
                );
            }
        });

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::check_css;

    #[test]
    fn template_without_grid_is_noted() {
        let source = ".a {\n  grid-template-columns: 1fr 1fr;\n  grid-column: 1 / 3;\n}";
        let issues = check_css(&GridPropertiesRequireGridRule::new(), source);

        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].message,
            "'grid-template-columns' used without 'display: grid' in same rule"
        );
        assert!(issues[0].logic.why.contains("container property"));
        assert!(issues[1].logic.why.contains("item property"));
        assert!(issues.iter().all(|i| i.fix().is_none()));
    }

    #[test]
    fn grid_and_inline_grid_containers_are_fine() {
        let source = ".a { display: grid; grid-template-rows: auto; }\n.b { display: inline-grid; grid-auto-flow: column; }";
        assert!(check_css(&GridPropertiesRequireGridRule::new(), source).is_empty());
    }

    #[test]
    fn justify_items_needs_grid_unless_flex() {
        let source = ".a { justify-items: center; }\n.b { display: flex; place-items: center; }";
        let issues = check_css(&GridPropertiesRequireGridRule::new(), source);

        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("'justify-items'"));
    }

    #[test]
    fn shared_alignment_properties_are_left_alone() {
        let source = ".a { gap: 4px; align-items: center; justify-content: end; }";
        assert!(check_css(&GridPropertiesRequireGridRule::new(), source).is_empty());
    }
}
