//! Pairwise overlap detection between selected fixes.

use crate::issue::Fix;
use crate::span::Range;
use serde::Serialize;

/// Two fixes whose patches touch overlapping source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixConflict {
    pub fix_a: String,
    pub fix_b: String,
    /// Range of the patch of `fix_a` that overlaps.
    pub overlapping_range: Range,
    pub message: String,
}

/// Every pair of fixes with at least one overlapping patch pair, reported
/// once per pair in selection order.
pub fn detect_conflicts(fixes: &[&Fix]) -> Vec<FixConflict> {
    let mut conflicts = Vec::new();

    for (i, a) in fixes.iter().enumerate() {
        for b in &fixes[i + 1..] {
            let overlap = a.patches.iter().find(|pa| {
                b.patches
                    .iter()
                    .any(|pb| pa.range.overlaps(&pb.range))
            });
            if let Some(patch) = overlap {
                conflicts.push(FixConflict {
                    fix_a: a.id.clone(),
                    fix_b: b.id.clone(),
                    overlapping_range: patch.range,
                    message: format!("Fixes {} and {} have overlapping patches", a.id, b.id),
                });
            }
        }
    }

    conflicts
}
