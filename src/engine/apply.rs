//! Applying selected fixes to the original source.

use crate::engine::comments::inject_comments;
use crate::engine::conflict::{detect_conflicts, FixConflict};
use crate::issue::{CommentStyle, Fix, Issue, Patch, COMMENT_MARKER};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Comment bookkeeping for one applied fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentReceipt {
    pub was_inserted: bool,
    pub marker_prefix: &'static str,
    pub style: CommentStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFix {
    pub fix_id: String,
    pub rule_id: String,
    pub patches: Vec<Patch>,
    pub comment: CommentReceipt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyResult {
    pub css: String,
    pub applied_fixes: Vec<AppliedFix>,
    /// Non-empty only when the selection was rejected.
    pub conflicts: Vec<FixConflict>,
}

/// Line span touched by one splice: first and last replaced line and the
/// number of lines now standing in their place.
struct Splice {
    start: usize,
    end: usize,
    new_lines: usize,
}

/// Apply the fixes named in `selected` to `original`.
///
/// The selection is all-or-nothing: if any two selected fixes overlap,
/// the original text comes back untouched along with the conflicts.
/// Patches whose coordinates do not fit the text are skipped one by one.
pub fn apply_fixes<S: AsRef<str>>(
    original: &str,
    issues: &[Issue],
    selected: &[S],
    include_comments: bool,
) -> ApplyResult {
    let wanted: HashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
    let chosen: Vec<(&Issue, &Fix)> = issues
        .iter()
        .filter_map(|issue| issue.fix().map(|fix| (issue, fix)))
        .filter(|(_, fix)| wanted.contains(fix.id.as_str()))
        .collect();

    let fixes: Vec<&Fix> = chosen.iter().map(|(_, fix)| *fix).collect();
    let conflicts = detect_conflicts(&fixes);
    if !conflicts.is_empty() {
        log::info!(
            "rejected selection of {} fixes: {} conflicts",
            fixes.len(),
            conflicts.len()
        );
        return ApplyResult {
            css: original.to_string(),
            applied_fixes: Vec::new(),
            conflicts,
        };
    }

    // (fix index, patch index within the fix, patch)
    let mut patches: Vec<(usize, usize, &Patch)> = fixes
        .iter()
        .enumerate()
        .flat_map(|(f, fix)| fix.patches.iter().enumerate().map(move |(p, patch)| (f, p, patch)))
        .collect();
    // bottom-up; at a shared start the wider patch goes first so an
    // insertion there still lands in front of the replaced text
    patches.sort_by(|a, b| {
        b.2.range
            .start
            .cmp(&a.2.range.start)
            .then_with(|| b.2.range.end.cmp(&a.2.range.end))
    });

    let mut lines: Vec<String> = original.split('\n').map(str::to_string).collect();
    let mut pending: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    let mut applied = vec![false; fixes.len()];
    let mut commented = vec![false; fixes.len()];

    for (f, p, patch) in patches {
        let Some(splice) = splice(&mut lines, patch) else {
            log::debug!(
                "skipping patch {} of {}: range {} does not fit the text",
                p,
                fixes[f].id,
                patch.range
            );
            continue;
        };
        applied[f] = true;
        shift_pending(&mut pending, &splice);

        // a fix's comment follows its first patch
        let comment = &fixes[f].comment.text;
        if include_comments && p == 0 && !comment.is_empty() {
            let line = splice.start + splice.new_lines - 1;
            pending.entry(line).or_default().insert(0, comment.clone());
            commented[f] = true;
        }
    }

    let mut css = lines.join("\n");
    if !pending.is_empty() {
        let by_line: BTreeMap<usize, Vec<String>> =
            pending.into_iter().map(|(i, texts)| (i + 1, texts)).collect();
        css = inject_comments(&css, &by_line);
    }

    let applied_fixes = chosen
        .iter()
        .enumerate()
        .filter(|(f, _)| applied[*f])
        .map(|(f, (issue, fix))| AppliedFix {
            fix_id: fix.id.clone(),
            rule_id: issue.rule_id.clone(),
            patches: fix.patches.clone(),
            comment: CommentReceipt {
                was_inserted: commented[f],
                marker_prefix: COMMENT_MARKER,
                style: fix.comment.style,
            },
        })
        .collect();

    ApplyResult {
        css,
        applied_fixes,
        conflicts: Vec::new(),
    }
}

/// Replace the lines a patch spans with `prefix + text + suffix`, split on
/// newlines. `None` when the range does not fit the current lines.
fn splice(lines: &mut Vec<String>, patch: &Patch) -> Option<Splice> {
    let range = patch.range;
    if range.start > range.end {
        return None;
    }
    let start = range.start.line.checked_sub(1)?;
    let end = range.end.line.checked_sub(1)?;
    if end >= lines.len() {
        return None;
    }

    let prefix = lines[start].get(..range.start.column.checked_sub(1)?)?;
    let suffix = lines[end].get(range.end.column.checked_sub(1)?..)?;
    let joined = format!("{prefix}{}{suffix}", patch.text);

    let replacement: Vec<String> = joined.split('\n').map(str::to_string).collect();
    let new_lines = replacement.len();
    lines.splice(start..=end, replacement);

    Some(Splice {
        start,
        end,
        new_lines,
    })
}

/// Move comments recorded on lines at or below a splice's last line by the
/// splice's line-count change.
fn shift_pending(pending: &mut BTreeMap<usize, Vec<String>>, splice: &Splice) {
    let delta = splice.new_lines as isize - (splice.end - splice.start + 1) as isize;
    if delta == 0 {
        return;
    }
    let moved = pending.split_off(&splice.end);
    for (line, texts) in moved {
        let target = (line as isize + delta).max(splice.start as isize) as usize;
        pending.entry(target).or_default().extend(texts);
    }
}
