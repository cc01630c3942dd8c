//! Rule contract and the helpers rules use to report issues.

use crate::config::SessionConfig;
use crate::css::Stylesheet;
use crate::ids::{fix_id, prompt_id, IdGenerator};
use crate::issue::{
    CommentConfig, Fix, Fixability, Issue, LlmPrompt, Patch, PromptFormat, Remedy, RuleGroup,
    RuleLogic, Severity,
};
use crate::span::Range;
use serde::Serialize;

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleMeta {
    pub rule_id: &'static str,
    pub group: RuleGroup,
    pub severity: Severity,
    pub fixability: Fixability,
    pub enabled_by_default: bool,
    pub applies_to: &'static str,
}

/// Base trait that all rules must implement.
///
/// Rules are pure functions of the context: they may read the whole source
/// and tree, but never another rule's issues.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue>;

    /// True for rules that only restate parser errors. The orchestrator
    /// skips them when it has already converted those errors itself.
    fn reports_parse_errors(&self) -> bool {
        false
    }

    fn rule_id(&self) -> &'static str {
        self.meta().rule_id
    }
}

/// Everything a rule may look at during one analysis.
pub struct RuleContext<'a> {
    pub stylesheet: &'a Stylesheet<'a>,
    pub source: &'a str,
    pub config: &'a SessionConfig,
    ids: &'a IdGenerator,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        stylesheet: &'a Stylesheet<'a>,
        config: &'a SessionConfig,
        ids: &'a IdGenerator,
    ) -> Self {
        Self {
            stylesheet,
            source: stylesheet.source(),
            config,
            ids,
        }
    }

    /// Start an issue for `meta` at `location`.
    pub fn report(
        &self,
        meta: &RuleMeta,
        message: impl Into<String>,
        location: Range,
        logic: RuleLogic,
    ) -> IssueBuilder<'a> {
        IssueBuilder {
            ids: self.ids,
            rule_id: meta.rule_id,
            group: meta.group,
            severity: meta.severity,
            message: message.into(),
            location,
            logic,
        }
    }

    pub(crate) fn ids(&self) -> &'a IdGenerator {
        self.ids
    }

    /// Source lines, 1-based line number first.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &'a str)> {
        self.source.split('\n').enumerate().map(|(i, l)| (i + 1, l))
    }
}

/// Finishes an issue with one of the three remedies.
///
/// The identifier is drawn when the issue is finished, so issue ids follow
/// the order in which a rule emits them.
#[must_use = "an issue builder does nothing until finished"]
pub struct IssueBuilder<'a> {
    ids: &'a IdGenerator,
    rule_id: &'static str,
    group: RuleGroup,
    severity: Severity,
    message: String,
    location: Range,
    logic: RuleLogic,
}

impl IssueBuilder<'_> {
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Safe issue with a deterministic fix. `note` becomes the injected
    /// comment, prefixed with the rule id.
    pub fn safe(self, preview: impl Into<String>, patches: Vec<Patch>, note: &str) -> Issue {
        let comment = CommentConfig::end_of_line(&format!("{}: {}", self.rule_id, note));
        self.finish(|issue_id| Remedy::Safe {
            fix: Fix {
                id: fix_id(issue_id),
                preview: preview.into(),
                patches,
                comment,
            },
        })
    }

    /// Issue that offers copy-ready instructions instead of a fix.
    pub fn prompt(self, title: impl Into<String>, copy_text: impl Into<String>) -> Issue {
        let title = title.into();
        let copy_text = copy_text.into();
        self.finish(|issue_id| Remedy::Prompt {
            llm_prompt: LlmPrompt {
                id: prompt_id(issue_id),
                title,
                format: PromptFormat::Text,
                copy_text,
            },
        })
    }

    /// Informational issue with no remedy.
    pub fn info(self) -> Issue {
        self.finish(|_| Remedy::None)
    }

    fn finish(self, remedy: impl FnOnce(&str) -> Remedy) -> Issue {
        let id = self.ids.next_issue_id(self.rule_id);
        let remedy = remedy(&id);
        Issue {
            id,
            rule_id: self.rule_id.to_string(),
            group: self.group,
            severity: self.severity,
            message: self.message,
            location: self.location,
            logic: self.logic,
            remedy,
        }
    }
}
