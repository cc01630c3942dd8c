//! format/indent-2-spaces: round odd space indentation up to the next even
//! width.

use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::span::Range;
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ +").unwrap());

const META: RuleMeta = RuleMeta {
    rule_id: "format/indent-2-spaces",
    group: RuleGroup::Format,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "lines with leading whitespace that is not a multiple of 2 spaces",
};

#[derive(Debug, Default)]
pub struct IndentTwoSpacesRule;

impl IndentTwoSpacesRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for IndentTwoSpacesRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (line_no, line) in ctx.lines() {
            let Some(spaces) = LEADING_SPACES.find(line) else {
                continue;
            };
            let width = spaces.len();
            if width % 2 == 0 || line.trim().is_empty() {
                continue;
            }

            let normalized = width + 1;
            let location = Range::on_line(line_no, 1, width);
            let replacement = " ".repeat(normalized);

            issues.push(
                ctx.report(
                    &META,
                    format!("Indentation is {width} spaces, should be {normalized} (multiple of 2)"),
                    location,
                    RuleLogic::new(
                        format!("Found {width}-space indentation"),
                        "Consistent 2-space indentation improves readability and LLM parsing accuracy",
                        "Always safe - only affects whitespace",
                    ),
                )
                .safe(
                    format!("{replacement}{}", line.trim_start()),
                    vec![Patch::replace(location, replacement)],
                    &format!("normalized from {width} to {normalized} spaces"),
                ),
            );
        }

        issues
    }
}
