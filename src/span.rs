//! Source positions and ranges.
//!
//! Every position handed around the engine is 1-based. Columns count bytes
//! within a line, so for ASCII stylesheets they coincide with character
//! columns. Conversion from the parser's 0-based coordinates happens once, in
//! [`crate::css`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based `(line, column)` pair identifying a boundary in source text.
///
/// Positions order by line, then by column, so no line length can make a
/// column spill into the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Same line, `n` columns further right.
    #[must_use]
    pub fn shifted(self, n: usize) -> Self {
        Self::new(self.line, self.column + n)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// Range covering `len` columns on a single line.
    pub const fn on_line(line: usize, column: usize, len: usize) -> Self {
        Self::from_coords(line, column, line, column + len)
    }

    /// The whole of `line` including its terminating newline.
    pub const fn whole_line(line: usize) -> Self {
        Self::from_coords(line, 1, line + 1, 1)
    }

    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        ranges_overlap(self, other)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// `[aStart, aEnd)` and `[bStart, bEnd)` overlap iff `aStart < bEnd && bStart < aEnd`.
///
/// Touching ranges (one ends where the other starts) do not overlap.
pub fn ranges_overlap(a: &Range, b: &Range) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn ordering_follows_line_then_column() {
        assert!(Position::new(1, 9999) < Position::new(2, 1));
        assert!(Position::new(1, 10_001) < Position::new(2, 1));
        assert!(Position::new(1, 250_000) < Position::new(2, 1));
        assert!(Position::new(3, 2) > Position::new(3, 1));
        assert_eq!(Position::new(4, 4).cmp(&Position::new(4, 4)), Ordering::Equal);
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = Range::whole_line(2);
        let b = Range::whole_line(3);
        assert!(!ranges_overlap(&a, &b));
        assert!(!ranges_overlap(&b, &a));
    }

    #[test]
    fn nested_range_overlaps() {
        let outer = Range::from_coords(1, 1, 5, 2);
        let inner = Range::on_line(3, 3, 4);
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn empty_range_inside_other_overlaps() {
        // an insertion point strictly inside a replaced span still collides
        let replaced = Range::on_line(2, 1, 10);
        let insertion = Range::on_line(2, 5, 0);
        assert!(ranges_overlap(&replaced, &insertion));
    }

    #[test]
    fn long_line_does_not_reach_next_line() {
        let tail = Range::on_line(1, 10_001, 2);
        let next = Range::on_line(2, 1, 2);
        assert!(!ranges_overlap(&tail, &next));
        assert!(!ranges_overlap(&next, &tail));
    }

    fn arb_range() -> impl Strategy<Value = Range> {
        (1usize..50, 1usize..120, 0usize..3, 0usize..120).prop_map(|(line, col, dl, dc)| {
            let end_col = if dl == 0 { col + dc } else { dc + 1 };
            Range::from_coords(line, col, line + dl, end_col)
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_range(), b in arb_range()) {
            prop_assert_eq!(ranges_overlap(&a, &b), ranges_overlap(&b, &a));
        }

        #[test]
        fn non_empty_range_overlaps_itself(a in arb_range()) {
            prop_assume!(a.start < a.end);
            prop_assert!(ranges_overlap(&a, &a));
        }
    }
}
