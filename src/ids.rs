//! Issue identifier generation.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Monotonic source of issue, fix and prompt identifiers.
///
/// Each [`crate::engine::Analyzer`] owns its own generator, so independent
/// sessions never interleave sequences. Sharing one analyzer across threads
/// is allowed but the resulting id order is then unspecified.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicUsize,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"{rule_id}-{n}"` with `n` starting at 1.
    pub fn next_issue_id(&self, rule_id: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{rule_id}-{n}")
    }

    /// Restart numbering so repeated runs produce identical ids.
    pub fn reset(&self) {
        self.counter.store(0, Ordering::Relaxed);
    }
}

pub fn fix_id(issue_id: &str) -> String {
    format!("fix-{issue_id}")
}

pub fn prompt_id(issue_id: &str) -> String {
    format!("prompt-{issue_id}")
}
