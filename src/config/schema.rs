use crate::issue::{RuleGroup, Severity};
use crate::rules::{RuleMeta, RuleRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-session rule configuration.
///
/// Every override is optional; an absent value falls back to the rule's own
/// default. A rule runs only when both its rule-level and its group-level
/// `enabled` resolve to true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleOverride>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<RuleGroup, GroupOverride>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(rule override ?? rule default) && (group override ?? true)`.
    pub fn is_rule_enabled(&self, meta: &RuleMeta) -> bool {
        let rule_enabled = self
            .rules
            .get(meta.rule_id)
            .and_then(|o| o.enabled)
            .unwrap_or(meta.enabled_by_default);
        let group_enabled = self
            .groups
            .get(&meta.group)
            .and_then(|o| o.enabled)
            .unwrap_or(true);
        rule_enabled && group_enabled
    }

    /// Severity forced by configuration, rule level first, then group level.
    pub fn severity_override(&self, meta: &RuleMeta) -> Option<Severity> {
        self.rules
            .get(meta.rule_id)
            .and_then(|o| o.severity)
            .or_else(|| self.groups.get(&meta.group).and_then(|o| o.severity))
    }

    pub fn set_rule_enabled(&mut self, rule_id: impl Into<String>, enabled: bool) -> &mut Self {
        self.rules.entry(rule_id.into()).or_default().enabled = Some(enabled);
        self
    }

    pub fn set_rule_severity(&mut self, rule_id: impl Into<String>, severity: Severity) -> &mut Self {
        self.rules.entry(rule_id.into()).or_default().severity = Some(severity);
        self
    }

    pub fn set_group_enabled(&mut self, group: RuleGroup, enabled: bool) -> &mut Self {
        self.groups.entry(group).or_default().enabled = Some(enabled);
        self
    }

    pub fn set_group_severity(&mut self, group: RuleGroup, severity: Severity) -> &mut Self {
        self.groups.entry(group).or_default().severity = Some(severity);
        self
    }

    /// Reject overrides that name rules the registry does not know.
    pub fn validate(&self, registry: &RuleRegistry) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for (rule_id, rule_override) in &self.rules {
            if registry.get(rule_id).is_none() {
                issues.push(ValidationIssue::UnknownRule {
                    rule_id: rule_id.clone(),
                });
            }
            if rule_override.enabled.is_none() && rule_override.severity.is_none() {
                issues.push(ValidationIssue::EmptyOverride {
                    target: rule_id.clone(),
                });
            }
        }

        for (group, group_override) in &self.groups {
            if group_override.enabled.is_none() && group_override.severity.is_none() {
                issues.push(ValidationIssue::EmptyOverride {
                    target: group.to_string(),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    UnknownRule { rule_id: String },
    EmptyOverride { target: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownRule { rule_id } => {
                write!(f, "override for unknown rule '{rule_id}'")
            }
            ValidationIssue::EmptyOverride { target } => {
                write!(f, "override for '{target}' sets neither 'enabled' nor 'severity'")
            }
        }
    }
}
