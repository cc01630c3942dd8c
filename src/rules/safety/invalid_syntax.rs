//! safety/invalid-syntax: parse errors surfaced as issues.

use crate::css::ParseError;
use crate::ids::IdGenerator;
use crate::issue::{Fixability, Issue, Remedy, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::span::{Position, Range};

pub(crate) const META: RuleMeta = RuleMeta {
    rule_id: "safety/invalid-syntax",
    group: RuleGroup::Safety,
    severity: Severity::Error,
    fixability: Fixability::None,
    enabled_by_default: true,
    applies_to: "all CSS content with syntax errors",
};

/// Convert parser errors into error-severity issues without a remedy.
pub fn parse_error_issues(errors: &[ParseError], ids: &IdGenerator) -> Vec<Issue> {
    errors
        .iter()
        .map(|error| {
            let Position { line, column } = error.location;
            Issue {
                id: ids.next_issue_id(META.rule_id),
                rule_id: META.rule_id.to_string(),
                group: META.group,
                severity: META.severity,
                message: format!("Syntax error at line {line}: {}", error.message),
                location: Range::on_line(line, column, 1),
                logic: RuleLogic::new(
                    format!(
                        "CSS syntax error at line {line}, column {column}: {}. Common causes include missing semicolons (;), unclosed braces, or malformed property values.",
                        error.message
                    ),
                    "Invalid CSS will not be parsed correctly by browsers and may cause unexpected behavior. Properties before the error may be ignored or misinterpreted.",
                    "Not auto-fixable - manual correction required. Check for missing semicolons between declarations.",
                ),
                remedy: Remedy::None,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct InvalidSyntaxRule;

impl InvalidSyntaxRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for InvalidSyntaxRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    /// Never reached when the analyzer has already converted the errors.
    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        parse_error_issues(ctx.stylesheet.errors(), ctx.ids())
    }

    fn reports_parse_errors(&self) -> bool {
        true
    }
}
