//! style/important-used: point out `!important`.

use crate::css::kinds;
use crate::issue::{Fixability, Issue, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};

const META: RuleMeta = RuleMeta {
    rule_id: "style/important-used",
    group: RuleGroup::Education,
    severity: Severity::Info,
    fixability: Fixability::None,
    enabled_by_default: true,
    applies_to: "all CSS declarations using !important",
};

#[derive(Debug, Default)]
pub struct ImportantUsedRule;

impl ImportantUsedRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ImportantUsedRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        ctx.stylesheet.visit(kinds::IMPORTANT, |important| {
            issues.push(
                ctx.report(
                    &META,
                    "Found !important declaration",
                    important.range(),
                    RuleLogic::new(
                        "Declaration uses !important to override cascade",
                        "Overusing !important makes CSS harder to maintain and debug. It breaks the natural cascade and can lead to specificity wars.",
                        "No auto-fix available - review if !important is truly necessary",
                    ),
                )
                .info(),
            );
        });
        issues
    }
}
