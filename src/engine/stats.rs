//! Size metrics for a stylesheet.

use serde::Serialize;

/// Characters per estimated model token.
const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub characters: usize,
    pub lines: usize,
    pub tokens: usize,
}

/// Count characters (Unicode scalar values), `'\n'`-separated lines, and
/// approximate tokens.
pub fn calculate_stats(text: &str) -> Stats {
    let characters = text.chars().count();
    Stats {
        characters,
        lines: text.split('\n').count(),
        tokens: characters.div_ceil(CHARS_PER_TOKEN),
    }
}

/// Before and after metrics for a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsComparison {
    pub before: Stats,
    pub after: Stats,
}

impl StatsComparison {
    pub fn new(before: &str, after: &str) -> Self {
        Self {
            before: calculate_stats(before),
            after: calculate_stats(after),
        }
    }

    /// Tokens saved; negative when the result grew.
    pub fn token_delta(&self) -> i64 {
        self.before.tokens as i64 - self.after.tokens as i64
    }

    pub fn character_delta(&self) -> i64 {
        self.before.characters as i64 - self.after.characters as i64
    }
}
