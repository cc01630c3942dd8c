//! tokens/zero-units: drop the unit from zero lengths.

use crate::css::kinds;
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::tokens::{declaration_numbers, NumericValue};

const META: RuleMeta = RuleMeta {
    rule_id: "tokens/zero-units",
    group: RuleGroup::Tokens,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "zero values with units (0px, 0em, 0%, etc.)",
};

/// Length and percentage units whose zero equals unitless `0`.
const SAFE_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "dvh", "dvw", "svh", "svw", "lvh",
    "lvw", "cm", "mm", "in", "pt", "pc", "%",
];

/// Math functions where a unitless zero changes the expression's type.
const TYPED_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp"];

/// Properties where `0` and `0%` differ (flex-basis).
const UNIT_SENSITIVE_PROPERTIES: &[&str] = &["flex", "flex-basis"];

#[derive(Debug, Default)]
pub struct ZeroUnitsRule;

impl ZeroUnitsRule {
    pub fn new() -> Self {
        Self
    }

    fn is_candidate(value: &NumericValue<'_>) -> bool {
        let unit = value.unit.to_ascii_lowercase();
        if !value.is_zero() || !SAFE_UNITS.contains(&unit.as_str()) {
            return false;
        }
        if value
            .property()
            .is_some_and(|p| UNIT_SENSITIVE_PROPERTIES.contains(&p.as_str()))
        {
            return false;
        }

        let mut current = value.node.ancestor_of_kind(kinds::CALL_EXPRESSION);
        while let Some(call) = current {
            let name = call
                .child_of_kind(kinds::FUNCTION_NAME)
                .map(|n| n.text().to_ascii_lowercase())
                .unwrap_or_default();
            if TYPED_FUNCTIONS.contains(&name.as_str()) {
                return false;
            }
            current = call.ancestor_of_kind(kinds::CALL_EXPRESSION);
        }
        true
    }
}

impl Rule for ZeroUnitsRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        declaration_numbers(ctx.stylesheet)
            .into_iter()
            .filter(Self::is_candidate)
            .map(|value| {
                let text = value.node.text();
                let unit = value.unit;
                let location = value.node.range();
                ctx.report(
                    &META,
                    format!("Unnecessary unit '{unit}' on zero value"),
                    location,
                    RuleLogic::new(
                        format!("Found {text} which can be simplified to 0"),
                        "Zero is zero regardless of unit, removing units saves tokens and improves clarity",
                        "Safe for length/percentage units. Not applied to time (0s), angles (0deg), flex (0fr), flex-basis, or math functions",
                    ),
                )
                .safe("0", vec![Patch::replace(location, "0")], &format!("was {text}"))
            })
            .collect()
    }
}
