//! Fixed match rules shared by every session.

use std::ops::RangeInclusive;

/// Players per session.
pub const ROSTER_CAPACITY: usize = 10;
/// Lowest accepted self-reported score.
pub const SCORE_MIN: f64 = 3.0;
/// Highest accepted self-reported score.
pub const SCORE_MAX: f64 = 30.0;
/// Ranks a winner may report.
pub const WIN_RANKS: RangeInclusive<i64> = 1..=5;
/// Ranks a loser may report.
pub const LOSS_RANKS: RangeInclusive<i64> = 6..=10;
/// Longest accepted report comment, in characters.
pub const COMMENT_MAX_CHARS: usize = 1000;

/// Rules a session validates against.
///
/// `Default` yields the community's fixed constants; tests may shrink the
/// capacity, which must stay even so the roster splits into equal teams.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRules {
    pub capacity: usize,
    pub score_min: f64,
    pub score_max: f64,
    pub win_ranks: RangeInclusive<i64>,
    pub loss_ranks: RangeInclusive<i64>,
    pub comment_max_chars: usize,
}

impl MatchRules {
    pub fn team_size(&self) -> usize {
        self.capacity / 2
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            capacity: ROSTER_CAPACITY,
            score_min: SCORE_MIN,
            score_max: SCORE_MAX,
            win_ranks: WIN_RANKS,
            loss_ranks: LOSS_RANKS,
            comment_max_chars: COMMENT_MAX_CHARS,
        }
    }
}
