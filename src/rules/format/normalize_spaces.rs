//! format/normalize-spaces: exactly one space after a declaration's colon.

use crate::css::kinds;
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::span::Range;

const META: RuleMeta = RuleMeta {
    rule_id: "format/normalize-spaces",
    group: RuleGroup::Format,
    severity: Severity::Info,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "spacing after the colon of declarations",
};

#[derive(Debug, Default)]
pub struct NormalizeSpacesRule;

impl NormalizeSpacesRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NormalizeSpacesRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::DECLARATION, |decl| {
            if decl.has_error() {
                return;
            }
            let Some(colon) = decl.child_of_kind(":") else {
                return;
            };
            let rest = &ctx.source[colon.byte_range().end..];
            let gap_len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            let gap = &rest[..gap_len];

            // value continues on the next line; leave layout alone
            if rest[gap_len..].starts_with(['\n', '\r']) || rest[gap_len..].is_empty() {
                return;
            }

            let (message, what, note) = match gap {
                "" => (
                    "Missing space after colon in declaration".to_string(),
                    "Found colon without space after it".to_string(),
                    "added space after colon",
                ),
                " " => return,
                _ => (
                    "Multiple spaces after colon".to_string(),
                    format!("Found {} whitespace characters after colon", gap.len()),
                    "collapsed spaces after colon",
                ),
            };

            let location = Range::on_line(colon.start().line, colon.start().column, 1 + gap_len);
            let property = decl.child_of_kind(kinds::PROPERTY_NAME).map_or("", |p| p.text());
            issues.push(
                ctx.report(
                    &META,
                    message,
                    location,
                    RuleLogic::new(
                        what,
                        "Consistent spacing improves readability and LLM parsing",
                        "Always safe - only affects whitespace",
                    ),
                )
                .safe(
                    format!("{property}: {}", rest[gap_len..].trim_end()),
                    vec![Patch::replace(location, ": ")],
                    note,
                ),
            );
        });

        issues
    }
}
