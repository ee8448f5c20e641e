//! Display names for rounds.

use crate::models::{Bracket, PRELIMINARY_ROUND};
use serde::Serialize;

/// Name of `round` in a bracket with `main_rounds` main rounds (preliminary round excluded).
pub fn round_name(round: i32, main_rounds: usize) -> String {
    if round == PRELIMINARY_ROUND {
        return "Preliminary".to_string();
    }
    let Ok(index) = usize::try_from(round) else {
        return format!("Round {}", round + 1);
    };
    match main_rounds.checked_sub(index + 1) {
        Some(0) => "Final".to_string(),
        Some(1) => "Semifinal".to_string(),
        Some(2) => "Quarterfinal".to_string(),
        Some(3) => "Round of 16".to_string(),
        _ => format!("Round {}", index + 1),
    }
}

/// One round of a bracket as shown in an overview.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: i32,
    pub name: String,
    pub matches: usize,
    pub completed: usize,
}

impl Bracket {
    /// Names for every round, in bracket order.
    pub fn round_names(&self) -> Vec<String> {
        self.round_summaries().into_iter().map(|r| r.name).collect()
    }

    pub fn round_summaries(&self) -> Vec<RoundSummary> {
        let main_rounds = self.main_round_count();
        self.rounds
            .iter()
            .filter_map(|matches| {
                let round = matches.first()?.round;
                Some(RoundSummary {
                    round,
                    name: round_name(round, main_rounds),
                    matches: matches.len(),
                    completed: matches.iter().filter(|m| m.completed).count(),
                })
            })
            .collect()
    }
}
