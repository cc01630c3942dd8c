//! Rule registry and the built-in rule set.

pub mod base;
pub mod consolidation;
pub mod education;
pub mod format;
pub mod modern;
pub mod safety;
pub mod tokens;

pub use base::{IssueBuilder, Rule, RuleContext, RuleMeta};

use crate::issue::RuleGroup;
use std::collections::HashMap;

/// Every built-in rule, in dispatch order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(format::NoTabsRule::new()),
        Box::new(format::IndentTwoSpacesRule::new()),
        Box::new(format::MultipleDeclarationsPerLineRule::new()),
        Box::new(format::NormalizeSpacesRule::new()),
        Box::new(format::SinglePropSingleLineRule::new()),
        Box::new(format::OneSelectorPerLineRule::new()),
        Box::new(format::SortPropertiesRule::new()),
        Box::new(tokens::ZeroUnitsRule::new()),
        Box::new(tokens::ShortenHexColorsRule::new()),
        Box::new(tokens::RemoveTrailingZerosRule::new()),
        Box::new(consolidation::ShorthandMarginPaddingRule::new()),
        Box::new(consolidation::DeduplicateLastWinsRule::new()),
        Box::new(modern::PreferHexColorsRule::new()),
        Box::new(safety::InvalidSyntaxRule::new()),
        Box::new(safety::UnrecognizedPropertyRule::new()),
        Box::new(safety::MisspelledPropertyRule::new()),
        Box::new(safety::SuspiciousUnitsRule::new()),
        Box::new(education::ImportantUsedRule::new()),
        Box::new(education::FlexPropertiesRequireFlexRule::new()),
        Box::new(education::GridPropertiesRequireGridRule::new()),
    ]
}

/// Ordered collection of rules, addressable by id.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    index: HashMap<&'static str, usize>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Add a rule. A rule whose id is already registered replaces the old
    /// one in its original dispatch position.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let id = rule.rule_id();
        match self.index.get(id) {
            Some(&slot) => {
                log::warn!("rule '{id}' registered twice; the later registration wins");
                self.rules[slot] = rule;
            }
            None => {
                self.index.insert(id, self.rules.len());
                self.rules.push(rule);
            }
        }
    }

    pub fn get(&self, rule_id: &str) -> Option<&dyn Rule> {
        self.index.get(rule_id).map(|&slot| self.rules[slot].as_ref())
    }

    pub fn by_group(&self, group: RuleGroup) -> Vec<&dyn Rule> {
        self.iter().filter(|rule| rule.meta().group == group).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.iter().map(|rule| rule.rule_id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
