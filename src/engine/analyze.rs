//! Running the rule set over a stylesheet.

use crate::config::SessionConfig;
use crate::css::ParseError;
use crate::engine::stats::{calculate_stats, Stats};
use crate::ids::IdGenerator;
use crate::issue::Issue;
use crate::pool::with_parser;
use crate::rules::safety::parse_error_issues;
use crate::rules::{RuleContext, RuleRegistry};
use crate::span::Position;
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub issues: Vec<Issue>,
    pub stats: Stats,
    pub parse_ok: bool,
    pub parse_errors: Vec<ParseError>,
}

/// Owns the rule registry and the id sequence for one session.
pub struct Analyzer {
    registry: RuleRegistry,
    ids: IdGenerator,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Analyzer with every built-in rule.
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_builtin_rules())
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            ids: IdGenerator::new(),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Restart issue numbering at 1.
    pub fn reset_ids(&self) {
        self.ids.reset();
    }

    /// Parse `source` and run every enabled rule over it.
    ///
    /// Parse errors come first as `safety/invalid-syntax` issues, followed
    /// by rule issues in registry order. A rule that panics is logged and
    /// skipped.
    pub fn analyze(&self, source: &str, config: &SessionConfig) -> AnalysisResult {
        let stats = calculate_stats(source);

        let sheet = match with_parser(|parser| parser.parse_stylesheet(source)).and_then(|r| r) {
            Ok(sheet) => sheet,
            Err(err) => {
                log::error!("cannot parse stylesheet: {err}");
                let errors = vec![ParseError {
                    message: err.to_string(),
                    location: Position::new(1, 1),
                }];
                return AnalysisResult {
                    issues: parse_error_issues(&errors, &self.ids),
                    stats,
                    parse_ok: false,
                    parse_errors: errors,
                };
            }
        };

        let parse_errors = sheet.errors().to_vec();
        let mut issues = parse_error_issues(&parse_errors, &self.ids);
        let ctx = RuleContext::new(&sheet, config, &self.ids);

        for rule in self.registry.iter() {
            let meta = rule.meta();
            if !config.is_rule_enabled(meta) {
                log::trace!("rule '{}' disabled", meta.rule_id);
                continue;
            }
            if sheet.has_errors() && rule.reports_parse_errors() {
                continue;
            }

            let found = match panic::catch_unwind(AssertUnwindSafe(|| rule.run(&ctx))) {
                Ok(found) => found,
                Err(_) => {
                    log::warn!("rule '{}' panicked; skipping its issues", meta.rule_id);
                    continue;
                }
            };
            log::trace!("rule '{}' reported {} issues", meta.rule_id, found.len());

            let severity = config.severity_override(meta);
            issues.extend(found.into_iter().map(|mut issue| {
                if let Some(severity) = severity {
                    issue.severity = severity;
                }
                issue
            }));
        }

        log::debug!(
            "analyzed {} lines: {} issues, {} parse errors",
            stats.lines,
            issues.len(),
            parse_errors.len()
        );

        AnalysisResult {
            issues,
            stats,
            parse_ok: parse_errors.is_empty(),
            parse_errors,
        }
    }
}
