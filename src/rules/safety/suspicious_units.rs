//! safety/typo-suspicious-units-and-tokens: units and tokens that look
//! like typos (`2xp`, `10pX`, `#fffffg`).

use crate::css::{kinds, CssNode};
use crate::issue::{Fixability, Issue, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::tokens::{declaration_numbers, NumericValue};
use crate::span::Range;
use once_cell::sync::Lazy;
use regex::Regex;

const META: RuleMeta = RuleMeta {
    rule_id: "safety/typo-suspicious-units-and-tokens",
    group: RuleGroup::Safety,
    severity: Severity::Error,
    fixability: Fixability::None,
    enabled_by_default: true,
    applies_to: "all CSS values with units or color tokens",
};

const KNOWN_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "cm", "mm", "in", "pt", "pc", "s",
    "ms", "deg", "rad", "grad", "turn", "fr", "dpi", "dpcm", "dppx", "hz", "khz",
];

static HEX_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[0-9A-Za-z]+").unwrap());
static MULTIPLE_DECIMALS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\.\d+\.\d+").unwrap());
static MISSING_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+(?:px|em|rem|%|vh|vw)\d").unwrap());

#[derive(Debug, Default)]
pub struct SuspiciousUnitsRule;

impl SuspiciousUnitsRule {
    pub fn new() -> Self {
        Self
    }
}

/// Complaint about a number's unit, if it looks mistyped.
fn unit_complaint(value: &NumericValue<'_>) -> Option<String> {
    let unit = value.unit;
    if unit.is_empty() {
        return None;
    }
    let lower = unit.to_ascii_lowercase();
    let message = match lower.as_str() {
        "xp" => "Suspicious unit \"xp\" - did you mean \"px\"?".to_string(),
        "ep" => "Suspicious unit \"ep\" - did you mean \"em\" or \"ex\"?".to_string(),
        "me" => "Suspicious unit \"me\" - did you mean \"em\"?".to_string(),
        "xv" | "xvh" => "Suspicious unit - did you mean \"vw\" or \"vh\"?".to_string(),
        "hv" => "Suspicious unit \"hv\" - did you mean \"vh\"?".to_string(),
        "wv" => "Suspicious unit \"wv\" - did you mean \"vw\"?".to_string(),
        "p" => "Suspicious single character \"p\" after number - did you mean \"px\" or \"%\"?"
            .to_string(),
        // `2x` is a resolution inside image-set() and friends
        "x" if value.node.ancestor_of_kind(kinds::CALL_EXPRESSION).is_none() => {
            "Suspicious single character \"x\" after number - did you mean \"px\"?".to_string()
        }
        _ if unit != lower && KNOWN_UNITS.contains(&lower.as_str()) => {
            format!("Mixed case unit \"{unit}\" - use consistent lowercase \"{lower}\"")
        }
        _ => return None,
    };
    Some(message)
}

/// Why a `#...` token is not a valid hex color, if it is not.
fn hex_complaint(token: &str) -> Option<&'static str> {
    let digits = &token[1..];
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some("Invalid hex color - contains non-hex character")
    } else if !matches!(digits.len(), 3 | 4 | 6 | 8) {
        Some("Invalid hex color length - must be 3, 4, 6, or 8 characters")
    } else {
        None
    }
}

/// `text` with the contents of quoted strings blanked, byte offsets intact.
fn mask_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote = None;
    let mut escaped = false;
    for c in text.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                    out.push(c);
                    continue;
                }
                out.extend(std::iter::repeat(' ').take(c.len_utf8()));
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }
    out
}

impl SuspiciousUnitsRule {
    fn value_text<'t>(decl: CssNode<'t>) -> Option<(usize, &'t str)> {
        let colon = decl.children().into_iter().find(|c| c.kind() == ":")?;
        let start = colon.byte_range().end;
        let text = decl.text();
        let offset = start - decl.byte_range().start;
        Some((start, text.get(offset..)?))
    }

    fn token_issues(ctx: &RuleContext<'_>, decl: CssNode<'_>, issues: &mut Vec<Issue>) {
        let Some((base, text)) = Self::value_text(decl) else {
            return;
        };
        let masked = mask_strings(text);

        let mut report = |start: usize, token: &str, message: &str, what: String, why: &str, when_safe: &str| {
            let begin = ctx.stylesheet.position_at(base + start);
            let end = ctx.stylesheet.position_at(base + start + token.len());
            issues.push(
                ctx.report(
                    &META,
                    format!("{message}: \"{token}\""),
                    Range::new(begin, end),
                    RuleLogic::new(what, why, when_safe),
                )
                .info(),
            );
        };

        for m in HEX_TOKEN.find_iter(&masked) {
            // `url(a#b)` fragments and the like
            let preceded_by_word = masked[..m.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric());
            if preceded_by_word {
                continue;
            }
            if let Some(message) = hex_complaint(m.as_str()) {
                report(
                    m.start(),
                    m.as_str(),
                    message,
                    format!("Invalid hex color format: \"{}\"", m.as_str()),
                    "Invalid hex colors will be ignored by browsers, causing styles not to apply",
                    "Manual correction required - fix the hex color value",
                );
            }
        }

        for (pattern, message) in [
            (&*MULTIPLE_DECIMALS, "Multiple decimal points in number"),
            (&*MISSING_SPACE, "Missing space between values"),
        ] {
            for m in pattern.find_iter(&masked) {
                report(
                    m.start(),
                    m.as_str(),
                    message,
                    format!("Suspicious numeric pattern: \"{}\"", m.as_str()),
                    "This appears to be malformed and will likely cause unexpected behavior",
                    "Manual review required - verify intended value",
                );
            }
        }
    }
}

impl Rule for SuspiciousUnitsRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for value in declaration_numbers(ctx.stylesheet) {
            let Some(message) = unit_complaint(&value) else {
                continue;
            };
            let token = value.node.text();
            issues.push(
                ctx.report(
                    &META,
                    format!("{message}: \"{token}\""),
                    value.node.range(),
                    RuleLogic::new(
                        format!("Found suspicious token: \"{token}\""),
                        "This appears to be a typo that will cause the declaration to be ignored by browsers",
                        "Manual review required - verify intended value",
                    ),
                )
                .info(),
            );
        }

        ctx.stylesheet.visit(kinds::DECLARATION, |decl| {
            Self::token_issues(ctx, decl, &mut issues);
        });

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::check_css;
    use crate::span::Position;

    fn messages(source: &str) -> Vec<String> {
        check_css(&SuspiciousUnitsRule::new(), source)
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn transposed_units_are_flagged() {
        let issues = check_css(&SuspiciousUnitsRule::new(), ".a {\n  width: 10xp;\n}");

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Suspicious unit \"xp\" - did you mean \"px\"?: \"10xp\""
        );
        assert_eq!(issues[0].location, Range::from_coords(2, 10, 2, 14));
        assert_eq!(issues[0].fixability(), Fixability::None);
    }

    #[test]
    fn mixed_case_units_are_flagged() {
        assert_eq!(
            messages(".a { margin: 4pX; }"),
            vec!["Mixed case unit \"pX\" - use consistent lowercase \"px\": \"4pX\""]
        );
    }

    #[test]
    fn resolution_inside_functions_is_fine() {
        let source = ".a { background-image: image-set(\"a.png\" 1x, \"b.png\" 2x); }";
        assert!(messages(source).is_empty());
    }

    #[test]
    fn invalid_hex_tokens_are_flagged() {
        let found = messages(".a {\n  color: #1234567;\n  background: #abcde;\n}");
        assert_eq!(
            found,
            vec![
                "Invalid hex color length - must be 3, 4, 6, or 8 characters: \"#1234567\"",
                "Invalid hex color length - must be 3, 4, 6, or 8 characters: \"#abcde\"",
            ]
        );
    }

    #[test]
    fn hex_positions_point_at_the_token() {
        let issues = check_css(&SuspiciousUnitsRule::new(), ".a {\n  color: #abcde;\n}");
        assert_eq!(issues[0].location.start, Position::new(2, 10));
        assert_eq!(issues[0].location.end, Position::new(2, 16));
    }

    #[test]
    fn quoted_text_is_ignored() {
        let source = ".a { content: \"#zz 1.2.3\"; }";
        assert!(messages(source).is_empty());
    }

    #[test]
    fn valid_values_are_clean() {
        let source = ".a {\n  color: #fff;\n  margin: 0 1.5em;\n  transition: opacity 0.3s;\n}";
        assert!(messages(source).is_empty());
    }

    #[test]
    fn masking_keeps_offsets() {
        assert_eq!(mask_strings("a \"bc\" d"), "a \"  \" d");
        assert_eq!(mask_strings("'é'").len(), "'é'".len());
    }
}
