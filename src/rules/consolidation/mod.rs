//! Consolidation rules: fold redundant declarations together.

pub mod deduplicate_last_wins;
pub mod shorthand_margin_padding;

pub use deduplicate_last_wins::DeduplicateLastWinsRule;
pub use shorthand_margin_padding::ShorthandMarginPaddingRule;

use crate::css::Declaration;
use crate::issue::Patch;
use crate::span::Range;

/// Patch that removes `decl`. A declaration with its lines to itself takes
/// those lines with it; otherwise the spaces that follow it on its last line
/// go too.
pub(crate) fn removal_patch(decl: &Declaration<'_>, line_count: usize) -> Patch {
    let (start, end) = (decl.start(), decl.end());
    if decl.occupies_own_lines() && end.line < line_count {
        return Patch::delete(Range::from_coords(start.line, 1, end.line + 1, 1));
    }

    let after = decl.node.end_line_rest();
    let trailing = after.len() - after.trim_start_matches([' ', '\t']).len();
    Patch::delete(Range::new(start, end.shifted(trailing)))
}
