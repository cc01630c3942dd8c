//! modern/prefer-hex-colors: opaque `rgb()` colors as hex.

use crate::css::{kinds, CssNode};
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::tokens::shorten_hex_colors::shorten_hex;

const META: RuleMeta = RuleMeta {
    rule_id: "modern/prefer-hex-colors",
    group: RuleGroup::Modern,
    severity: Severity::Info,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "CSS color values using rgb() function",
};

#[derive(Debug, Default)]
pub struct PreferHexColorsRule;

impl PreferHexColorsRule {
    pub fn new() -> Self {
        Self
    }
}

/// One channel as 0..=255. Percentages scale and round; plain numbers must
/// already be integers in range.
fn channel(value: CssNode<'_>) -> Option<u8> {
    let text = value.text();
    let unit = value.child_of_kind(kinds::UNIT).map_or("", |u| u.text());
    let number: f64 = text[..text.len() - unit.len()].parse().ok()?;
    let scaled = match unit {
        "%" => (number * 255.0 / 100.0).round(),
        "" if number.fract() == 0.0 => number,
        _ => return None,
    };
    (0.0..=255.0).contains(&scaled).then_some(scaled as u8)
}

fn is_opaque(alpha: CssNode<'_>) -> bool {
    matches!(alpha.text(), "1" | "1.0" | "100%")
}

/// Red, green and blue of an opaque `rgb()`/`rgba()` call.
pub(crate) fn rgb_channels(call: CssNode<'_>) -> Option<[u8; 3]> {
    let name = call.child_of_kind(kinds::FUNCTION_NAME)?.text().to_ascii_lowercase();
    if name != "rgb" && name != "rgba" {
        return None;
    }
    let args = call.child_of_kind(kinds::ARGUMENTS)?.named_children();
    if args
        .iter()
        .any(|a| a.kind() != kinds::INTEGER_VALUE && a.kind() != kinds::FLOAT_VALUE)
    {
        return None;
    }
    match args.as_slice() {
        [r, g, b] => Some([channel(*r)?, channel(*g)?, channel(*b)?]),
        [r, g, b, a] if is_opaque(*a) => Some([channel(*r)?, channel(*g)?, channel(*b)?]),
        _ => None,
    }
}

/// Shortest hex spelling of an opaque color.
pub(crate) fn to_hex([r, g, b]: [u8; 3]) -> String {
    let full = format!("#{r:02x}{g:02x}{b:02x}");
    shorten_hex(&full).unwrap_or(full)
}

impl Rule for PreferHexColorsRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::CALL_EXPRESSION, |call| {
            let Some(rgb) = rgb_channels(call) else {
                return;
            };
            let hex = to_hex(rgb);
            let original = call.generate();
            if original.len() <= hex.len() {
                return;
            }

            let [r, g, b] = rgb;
            let location = call.range();
            issues.push(
                ctx.report(
                    &META,
                    format!("rgb({r}, {g}, {b}) can be written as {hex}"),
                    location,
                    RuleLogic::new(
                        "Found rgb() color that can be converted to hex",
                        "Hex colors are more compact and widely supported",
                        "Always safe when RGB values are integers 0-255 and no alpha channel",
                    ),
                )
                .safe(
                    hex.clone(),
                    vec![Patch::replace(location, hex)],
                    &format!("converted from {original}"),
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
    fn converts_and_shortens() {
        assert_eq!(to_hex([255, 0, 0]), "#f00");
        assert_eq!(to_hex([18, 52, 86]), "#123456");
    }

    #[test]
    fn rewrites_rgb_calls() {
        let source = ".a {\n  color: rgb(255, 0, 0);\n  background: rgba(18, 52, 86, 1);\n}";
        let issues = check_css(&PreferHexColorsRule::new(), source);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "rgb(255, 0, 0) can be written as #f00");
        assert_eq!(
            fix_all(source, &issues),
            ".a {\n  color: #f00;\n  background: #123456;\n}"
        );
    }

    #[test]
    fn comment_uses_canonical_source() {
        let source = ".a {\n  color: rgb(255, 255, 255);\n}";
        let issues = check_css(&PreferHexColorsRule::new(), source);
        assert_eq!(
            fix_all_with(source, &issues, true),
            ".a {\n  color: #fff; /* cssreview: modern/prefer-hex-colors: converted from rgb(255,255,255) */\n}"
        );
    }

    #[test]
    fn percentages_scale_to_bytes() {
        let source = ".a { color: rgb(100%, 0%, 0%); }";
        let issues = check_css(&PreferHexColorsRule::new(), source);
        assert_eq!(fix_all(source, &issues), ".a { color: #f00; }");
    }

    #[test]
    fn translucent_and_out_of_range_colors_are_kept() {
        let source = ".a {\n  color: rgba(0, 0, 0, 0.5);\n  background: rgb(300, 0, 0);\n  border-color: rgb(1.5, 0, 0);\n}";
        assert!(check_css(&PreferHexColorsRule::new(), source).is_empty());
    }

    #[test]
    fn other_functions_are_ignored() {
        let source = ".a { color: hsl(0, 100%, 50%); width: calc(100% - 10px); }";
        assert!(check_css(&PreferHexColorsRule::new(), source).is_empty());
    }
}
