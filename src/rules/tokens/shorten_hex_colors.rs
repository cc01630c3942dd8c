//! tokens/shorten-hex-colors: `#aabbcc` to `#abc`.

use crate::css::kinds;
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};

const META: RuleMeta = RuleMeta {
    rule_id: "tokens/shorten-hex-colors",
    group: RuleGroup::Tokens,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "6- and 8-digit hex colors whose digit pairs repeat (#ffffff -> #fff)",
};

#[derive(Debug, Default)]
pub struct ShortenHexColorsRule;

impl ShortenHexColorsRule {
    pub fn new() -> Self {
        Self
    }
}

/// Short lowercase form of a 6 or 8 digit hex color, if every pair repeats.
pub(crate) fn shorten_hex(color: &str) -> Option<String> {
    let digits = color.strip_prefix('#')?;
    if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = digits.to_ascii_lowercase().into_bytes();
    let mut short = String::from("#");
    for pair in bytes.chunks(2) {
        if pair[0] != pair[1] {
            return None;
        }
        short.push(char::from(pair[0]));
    }
    Some(short)
}

impl Rule for ShortenHexColorsRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::COLOR_VALUE, |color| {
            let original = color.text();
            let Some(short) = shorten_hex(original) else {
                return;
            };
            let location = color.range();
            issues.push(
                ctx.report(
                    &META,
                    format!("Hex color {original} can be shortened to {short}"),
                    location,
                    RuleLogic::new(
                        format!("Found {original} which can be written as {short}"),
                        "Shorter hex colors save tokens and are equally precise",
                        "Safe when all RGB (and optional A) pairs have identical digits",
                    ),
                )
                .safe(
                    short.clone(),
                    vec![Patch::replace(location, short)],
                    &format!("was {original}"),
                ),
            );
        });

        issues
    }
}
