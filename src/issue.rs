//! Issue and fix data model.
//!
//! Issues and fixes are created fresh on every analysis and never mutated
//! afterwards. An issue's [`Remedy`] carries exactly the payload its
//! fixability class allows, so "safe with a prompt" and similar mixtures
//! cannot be represented.

use crate::span::Range;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Prefix carried by every comment the engine injects.
pub const COMMENT_MARKER: &str = "cssreview:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Coarse category used to batch-enable or disable rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleGroup {
    Modern,
    Consolidation,
    Format,
    Tokens,
    Safety,
    Education,
}

impl RuleGroup {
    pub const ALL: [RuleGroup; 6] = [
        RuleGroup::Modern,
        RuleGroup::Consolidation,
        RuleGroup::Format,
        RuleGroup::Tokens,
        RuleGroup::Safety,
        RuleGroup::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleGroup::Modern => "modern",
            RuleGroup::Consolidation => "consolidation",
            RuleGroup::Format => "format",
            RuleGroup::Tokens => "tokens",
            RuleGroup::Safety => "safety",
            RuleGroup::Education => "education",
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixability class advertised by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixability {
    Safe,
    Prompt,
    None,
}

impl fmt::Display for Fixability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fixability::Safe => write!(f, "safe"),
            Fixability::Prompt => write!(f, "prompt"),
            Fixability::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOp {
    #[default]
    ReplaceRange,
}

/// One textual edit: remove `range`, insert `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    #[serde(default)]
    pub op: PatchOp,
    pub range: Range,
    pub text: String,
}

impl Patch {
    pub fn replace(range: Range, text: impl Into<String>) -> Self {
        Self {
            op: PatchOp::ReplaceRange,
            range,
            text: text.into(),
        }
    }

    pub fn delete(range: Range) -> Self {
        Self::replace(range, String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
    #[default]
    EndOfLine,
}

/// Annotation attached to a fix, injected when the caller asks for comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentConfig {
    pub enabled_by_ui: bool,
    pub style: CommentStyle,
    pub text: String,
}

impl CommentConfig {
    /// End-of-line comment whose text is prefixed with the tool marker.
    pub fn end_of_line(text: &str) -> Self {
        Self {
            enabled_by_ui: false,
            style: CommentStyle::EndOfLine,
            text: format!("{COMMENT_MARKER} {text}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub id: String,
    pub preview: String,
    pub patches: Vec<Patch>,
    pub comment: CommentConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptFormat {
    #[default]
    Text,
}

/// Copy-ready instructions for a change that is not safe to automate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmPrompt {
    pub id: String,
    pub title: String,
    pub format: PromptFormat,
    pub copy_text: String,
}

/// What was detected, why it matters, and when changing it is safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleLogic {
    pub what: String,
    pub why: String,
    pub when_safe: String,
}

impl RuleLogic {
    pub fn new(what: impl Into<String>, why: impl Into<String>, when_safe: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: why.into(),
            when_safe: when_safe.into(),
        }
    }
}

/// The payload an issue offers, tagged by its fixability class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fixability", rename_all = "lowercase")]
pub enum Remedy {
    Safe { fix: Fix },
    Prompt { llm_prompt: LlmPrompt },
    None,
}

impl Remedy {
    pub fn fixability(&self) -> Fixability {
        match self {
            Remedy::Safe { .. } => Fixability::Safe,
            Remedy::Prompt { .. } => Fixability::Prompt,
            Remedy::None => Fixability::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub rule_id: String,
    pub group: RuleGroup,
    pub severity: Severity,
    pub message: String,
    pub location: Range,
    pub logic: RuleLogic,
    #[serde(flatten)]
    pub remedy: Remedy,
}

impl Issue {
    pub fn fixability(&self) -> Fixability {
        self.remedy.fixability()
    }

    pub fn fix(&self) -> Option<&Fix> {
        match &self.remedy {
            Remedy::Safe { fix } => Some(fix),
            _ => None,
        }
    }

    pub fn llm_prompt(&self) -> Option<&LlmPrompt> {
        match &self.remedy {
            Remedy::Prompt { llm_prompt } => Some(llm_prompt),
            _ => None,
        }
    }

    /// Check the invariants the type system cannot express.
    pub fn validate(&self) -> Result<(), IssueError> {
        if let Remedy::Safe { fix } = &self.remedy {
            if fix.patches.is_empty() {
                return Err(IssueError::EmptyFix {
                    issue_id: self.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("issue '{issue_id}' is marked safe but its fix has no patches")]
    EmptyFix { issue_id: String },
}
