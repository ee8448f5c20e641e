//! Preliminary-round sizing: how many teams overflow the largest power-of-two bracket.

use serde::{Deserialize, Serialize};

/// Shape of the play-in round for a given team count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PreliminaryRound {
    /// Largest power of two not above the team count (0 for no teams).
    pub main_bracket_size: usize,
    /// `ceil(extra / 2)` where `extra` is the overflow past `main_bracket_size`.
    /// Reporting figure only: the bracket builder schedules one play-in per excess team
    /// (see [`PreliminaryRound::excess_teams`]), so this is not the bracket's play-in count.
    pub preliminary_matches: usize,
    /// 1 when the overflow is odd, so one play-in winner meets a team that skipped the play-in.
    pub byes: usize,
}

impl PreliminaryRound {
    /// Teams beyond `main_bracket_size`; the play-in round has to eliminate this many.
    pub fn excess_teams(&self, team_count: usize) -> usize {
        team_count.saturating_sub(self.main_bracket_size)
    }
}

/// Size the preliminary round for `team_count` teams. Total over all inputs.
pub fn preliminary_round(team_count: usize) -> PreliminaryRound {
    if team_count == 0 {
        return PreliminaryRound::default();
    }
    // Highest set bit is the largest power of two <= team_count.
    let main_bracket_size = 1usize << (usize::BITS - 1 - team_count.leading_zeros());
    if team_count == main_bracket_size {
        return PreliminaryRound {
            main_bracket_size,
            preliminary_matches: 0,
            byes: 0,
        };
    }
    let extra = team_count - main_bracket_size;
    PreliminaryRound {
        main_bracket_size,
        preliminary_matches: extra.div_ceil(2),
        byes: extra % 2,
    }
}
