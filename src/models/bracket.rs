//! Bracket (rounds of matches) and the errors the bracket core can report.

use crate::models::game::{Match, PRELIMINARY_ROUND};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Errors from building a bracket or applying a result to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// A bracket needs at least two teams.
    NotEnoughTeams { count: usize },
    /// The same team id appears twice in the team list.
    DuplicateTeam(TeamId),
    /// No match with this id exists in the bracket.
    MatchNotFound(String),
    /// The match is still waiting for one or both of its teams.
    MatchNotReady(String),
    /// Both teams scored the same; knockout matches need a winner.
    TiedScore { score: u32 },
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::NotEnoughTeams { count } => {
                write!(f, "Need at least 2 teams to build a bracket (got {})", count)
            }
            BracketError::DuplicateTeam(id) => write!(f, "Team {} appears more than once", id),
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            BracketError::MatchNotReady(id) => {
                write!(f, "Match {} is still waiting for its teams", id)
            }
            BracketError::TiedScore { score } => {
                write!(f, "Tied score {}-{}: a knockout match needs a winner", score, score)
            }
        }
    }
}

impl std::error::Error for BracketError {}

/// Full elimination tree: rounds earliest-first, each a sequence of matches ordered by position.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Vec<Match>>,
    pub total_teams: usize,
}

impl Bracket {
    /// First round is the play-in round.
    pub fn has_preliminary_round(&self) -> bool {
        self.rounds
            .first()
            .and_then(|r| r.first())
            .is_some_and(|m| m.round == PRELIMINARY_ROUND)
    }

    /// Number of rounds excluding the preliminary round.
    pub fn main_round_count(&self) -> usize {
        self.rounds.len() - usize::from(self.has_preliminary_round())
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last().and_then(|r| r.first())
    }

    /// Winner of the final, once it is completed.
    pub fn champion(&self) -> Option<&Team> {
        self.final_match()
            .filter(|m| m.completed)
            .and_then(|m| m.winner.as_ref())
    }

    /// `(round_index, position)` of a match, scanning rounds in order.
    pub fn locate(&self, match_id: &str) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(ri, round)| {
            round
                .iter()
                .position(|m| m.id == match_id)
                .map(|pos| (ri, pos))
        })
    }

    pub fn get_match(&self, match_id: &str) -> Option<&Match> {
        self.locate(match_id).map(|(ri, pos)| &self.rounds[ri][pos])
    }

    pub fn get_match_mut(&mut self, match_id: &str) -> Option<&mut Match> {
        let (ri, pos) = self.locate(match_id)?;
        Some(&mut self.rounds[ri][pos])
    }

    /// All matches, earliest round first.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flatten()
    }

    /// Any match has a recorded result.
    pub fn has_results(&self) -> bool {
        self.matches().any(|m| m.completed)
    }
}
