//! tokens/remove-trailing-zeros: `0.50` to `0.5`, `1.0` to `1`.

use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::tokens::declaration_numbers;

const META: RuleMeta = RuleMeta {
    rule_id: "tokens/remove-trailing-zeros",
    group: RuleGroup::Tokens,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "decimal numbers with trailing zeros (0.50 -> 0.5, 1.0 -> 1)",
};

#[derive(Debug, Default)]
pub struct RemoveTrailingZerosRule;

impl RemoveTrailingZerosRule {
    pub fn new() -> Self {
        Self
    }
}

/// `number` without fractional trailing zeros, if that makes it shorter.
pub(crate) fn trim_fraction(number: &str) -> Option<String> {
    if !number.contains('.') || number.contains(['e', 'E']) {
        return None;
    }
    let trimmed = number.trim_end_matches('0').trim_end_matches('.');
    if trimmed.len() == number.len() {
        return None;
    }
    match trimmed {
        "" | "+" | "-" => Some("0".to_string()),
        _ => Some(trimmed.to_string()),
    }
}

impl Rule for RemoveTrailingZerosRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for value in declaration_numbers(ctx.stylesheet) {
            // a zero with a unit is the zero-units rule's to shorten
            if value.is_zero() && !value.unit.is_empty() {
                continue;
            }
            let Some(number) = trim_fraction(value.number) else {
                continue;
            };
            let original = value.node.text();
            let shortened = format!("{number}{}", value.unit);
            let location = value.node.range();

            issues.push(
                ctx.report(
                    &META,
                    format!("Trailing zeros in {original} can be removed"),
                    location,
                    RuleLogic::new(
                        format!("Found {original} with trailing zeros"),
                        "Trailing zeros add no value and waste tokens",
                        "Always safe - numeric value is unchanged",
                    ),
                )
                .safe(
                    shortened.clone(),
                    vec![Patch::replace(location, shortened)],
                    &format!("was {original}"),
                ),
            );
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check_css, fix_all};

    #[test]
    fn trims_fraction_digits() {
        assert_eq!(trim_fraction("0.50").as_deref(), Some("0.5"));
        assert_eq!(trim_fraction("1.0").as_deref(), Some("1"));
        assert_eq!(trim_fraction("10.500").as_deref(), Some("10.5"));
        assert_eq!(trim_fraction("-.0").as_deref(), Some("0"));
        assert_eq!(trim_fraction("100"), None);
        assert_eq!(trim_fraction("0.5"), None);
        assert_eq!(trim_fraction("1.0e3"), None);
    }

    #[test]
    fn fixes_plain_and_unit_values() {
        let source = ".a {\n  opacity: 0.50;\n  line-height: 1.0;\n  margin: 1.50em;\n}";
        let issues = check_css(&RemoveTrailingZerosRule::new(), source);

        assert_eq!(issues.len(), 3);
        assert_eq!(
            fix_all(source, &issues),
            ".a {\n  opacity: 0.5;\n  line-height: 1;\n  margin: 1.5em;\n}"
        );
    }

    #[test]
    fn integers_are_clean() {
        assert!(check_css(&RemoveTrailingZerosRule::new(), ".a { z-index: 10; }").is_empty());
    }
}
