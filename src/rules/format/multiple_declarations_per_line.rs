//! format/multiple-declarations-per-line: give every declaration its own
//! line.

use crate::css::{block_declarations, kinds, Declaration};
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::format::indentation;
use crate::span::{Position, Range};

const META: RuleMeta = RuleMeta {
    rule_id: "format/multiple-declarations-per-line",
    group: RuleGroup::Format,
    severity: Severity::Warning,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "declaration blocks with multiple declarations on the same line",
};

/// Extra indentation given to declarations pulled off the line that opens
/// their block.
const INDENT_STEP: &str = "  ";

#[derive(Debug, Default)]
pub struct MultipleDeclarationsPerLineRule;

impl MultipleDeclarationsPerLineRule {
    pub fn new() -> Self {
        Self
    }

    /// Runs of consecutive single-line declarations starting on one line.
    fn same_line_runs<'t>(decls: &[Declaration<'t>]) -> Vec<Vec<Declaration<'t>>> {
        let mut runs: Vec<Vec<Declaration<'t>>> = Vec::new();
        for decl in decls {
            if decl.range().is_multiline() {
                runs.push(Vec::new());
                continue;
            }
            let same_line = runs
                .last()
                .and_then(|run| run.last())
                .is_some_and(|prev| prev.start().line == decl.start().line);
            if same_line {
                if let Some(run) = runs.last_mut() {
                    run.push(*decl);
                }
            } else {
                runs.push(vec![*decl]);
            }
        }
        runs.retain(|run| run.len() > 1);
        runs
    }

    fn split(ctx: &RuleContext<'_>, run: &[Declaration<'_>]) -> Option<Issue> {
        let first = run.first()?;
        let last = run.last()?;
        let line_no = first.start().line;
        let line = first.node.start_line_text();

        // comments or stray tokens between declarations would be lost
        for pair in run.windows(2) {
            let gap = ctx.source.get(pair[0].node.byte_range().end..pair[1].node.byte_range().start)?;
            if !gap.trim().is_empty() {
                return None;
            }
        }

        let line_indent = indentation(line);
        let before = line.get(..first.start().column - 1)?;
        let opens_line = !before.trim().is_empty();
        let decl_indent = if opens_line {
            format!("{line_indent}{INDENT_STEP}")
        } else {
            before.to_string()
        };

        let start = if opens_line {
            Position::new(line_no, before.trim_end().len() + 1)
        } else {
            first.start()
        };

        let mut replacement = String::new();
        for (i, decl) in run.iter().enumerate() {
            if i > 0 || opens_line {
                replacement.push('\n');
                replacement.push_str(&decl_indent);
            }
            replacement.push_str(decl.node.text().trim());
            if !decl.has_semicolon {
                replacement.push(';');
            }
        }

        let after = line.get(last.end().column - 1..)?;
        let after_content = after.trim_start();
        let end = if after_content.starts_with('}') {
            replacement.push('\n');
            replacement.push_str(line_indent);
            last.end().shifted(after.len() - after_content.len())
        } else {
            last.end()
        };

        let count = run.len();
        let location = Range::new(start, end);
        Some(
            ctx.report(
                &META,
                format!("{count} declarations on one line, split for clarity"),
                Range::new(first.start(), last.end()),
                RuleLogic::new(
                    format!("Found {count} declarations on line {line_no}"),
                    "One declaration per line improves readability and makes diffs cleaner",
                    "Always safe - only affects whitespace and line breaks",
                ),
            )
            .safe(
                replacement.trim().to_string(),
                vec![Patch::replace(location, replacement)],
                &format!("split {count} declarations onto separate lines"),
            ),
        )
    }
}

impl Rule for MultipleDeclarationsPerLineRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        ctx.stylesheet.visit(kinds::BLOCK, |block| {
            let decls = block_declarations(block);
            for run in Self::same_line_runs(&decls) {
                issues.extend(Self::split(ctx, &run));
            }
        });
        issues
    }
}
