//! CSS Promptify: rule-driven CSS analysis with safe fix application
//!
//! A review engine built on a tree-sitter CSS parse and a registry of small,
//! independent rules. Each rule reports issues that carry either a
//! deterministic fix, a copy-ready prompt, or nothing at all.
//!
//! # Architecture
//!
//! Every fix compiles down to a list of [`Patch`]es: line/column range
//! replacements against the original text. Intelligence lives in the rules
//! (which decide what to patch), not in the applicator, which only checks
//! overlaps, splices text bottom-up and optionally annotates changed lines.
//!
//! # Guarantees
//!
//! - Selected fixes whose patches overlap are rejected as a pair
//! - Applying zero fixes returns the input unchanged
//! - Rules run in isolation; a panicking rule is logged and skipped
//! - Injected comments carry a stable marker and can be stripped again
//!
//! # Example
//!
//! ```no_run
//! use css_promptify::{apply_fixes, Analyzer, SessionConfig};
//!
//! let css = ".a {\n\tcolor: red;\n}\n";
//! let analyzer = Analyzer::new();
//! let result = analyzer.analyze(css, &SessionConfig::default());
//!
//! let fix_ids: Vec<&str> = result
//!     .issues
//!     .iter()
//!     .filter_map(|issue| issue.fix())
//!     .map(|fix| fix.id.as_str())
//!     .collect();
//!
//! let applied = apply_fixes(css, &result.issues, &fix_ids, true);
//! println!("{}", applied.css);
//! ```

pub mod config;
pub mod css;
pub mod engine;
pub mod ids;
pub mod issue;
pub mod pool;
pub mod rules;
pub mod span;

// Re-exports
pub use config::{discover_config, load_from_path, load_from_str, ConfigError, SessionConfig};
pub use css::{CssError, CssParser, ParseError};
pub use engine::{
    apply_fixes, calculate_stats, detect_conflicts, inject_comments, strip_comments,
    AnalysisResult, Analyzer, AppliedFix, ApplyResult, FixConflict, Stats, StatsComparison,
};
pub use issue::{Fix, Fixability, Issue, Patch, Remedy, RuleGroup, Severity};
pub use rules::{Rule, RuleMeta, RuleRegistry};
pub use span::{Position, Range};
