//! Analysis orchestration and fix application.
//!
//! [`Analyzer::analyze`] produces issues for a stylesheet; a caller then
//! picks fix ids and hands them to [`apply_fixes`] together with the
//! unchanged original source. Patches are applied bottom-up against the
//! original coordinates, so every fix sees the positions it was computed
//! from.

pub mod analyze;
pub mod apply;
pub mod comments;
pub mod conflict;
pub mod stats;

pub use analyze::{AnalysisResult, Analyzer};
pub use apply::{apply_fixes, AppliedFix, ApplyResult, CommentReceipt};
pub use comments::{annotate_line, inject_comments, strip_comments};
pub use conflict::{detect_conflicts, FixConflict};
pub use stats::{calculate_stats, Stats, StatsComparison};
