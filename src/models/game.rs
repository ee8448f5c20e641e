//! Match, MatchStatus, and the Side a team occupies within a match.

use crate::models::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match: `prelim-{position}` or `match-{round}-{position}`.
pub type MatchId = String;

/// Round number of the preliminary (play-in) round.
pub const PRELIMINARY_ROUND: i32 = -1;

/// Which slot of a match a team occupies.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    /// Slot in the next round fed by the match at `position`: even positions feed `One`, odd feed `Two`.
    pub fn fed_by(position: usize) -> Self {
        if position % 2 == 0 {
            Side::One
        } else {
            Side::Two
        }
    }
}

/// Lifecycle of a single match as seen by organizers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Created,
    Scheduled,
    InProgress,
    Finished,
}

/// A single match in the bracket, addressed by `(round, position)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// -1 for the preliminary round, 0.. for main rounds.
    pub round: i32,
    /// 0-based slot within the round.
    pub position: usize,
    /// None while awaiting the winner of a previous match.
    pub team_1: Option<Team>,
    pub team_2: Option<Team>,
    pub score_1: Option<u32>,
    pub score_2: Option<u32>,
    pub winner: Option<Team>,
    pub completed: bool,
    pub status: MatchStatus,
    pub scheduled_time: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(round: i32, position: usize, team_1: Option<Team>, team_2: Option<Team>) -> Self {
        let id = if round == PRELIMINARY_ROUND {
            format!("prelim-{position}")
        } else {
            format!("match-{round}-{position}")
        };
        Self {
            id,
            round,
            position,
            team_1,
            team_2,
            score_1: None,
            score_2: None,
            winner: None,
            completed: false,
            status: MatchStatus::Created,
            scheduled_time: None,
        }
    }

    pub fn team(&self, side: Side) -> Option<&Team> {
        match side {
            Side::One => self.team_1.as_ref(),
            Side::Two => self.team_2.as_ref(),
        }
    }

    pub fn set_team(&mut self, side: Side, team: Option<Team>) {
        match side {
            Side::One => self.team_1 = team,
            Side::Two => self.team_2 = team,
        }
    }

    /// Both slots are filled, so a result can be entered.
    pub fn is_ready(&self) -> bool {
        self.team_1.is_some() && self.team_2.is_some()
    }

    /// Record a decided result. Caller guarantees the match is ready and the scores differ.
    pub(crate) fn record(&mut self, score_1: u32, score_2: u32) {
        let side = if score_1 > score_2 { Side::One } else { Side::Two };
        self.score_1 = Some(score_1);
        self.score_2 = Some(score_2);
        self.winner = self.team(side).cloned();
        self.completed = true;
        self.status = MatchStatus::Finished;
    }

    /// Drop the result (scores, winner, completion), keeping teams and schedule.
    pub(crate) fn clear_result(&mut self) {
        self.score_1 = None;
        self.score_2 = None;
        self.winner = None;
        self.completed = false;
        self.stop_play();
    }

    /// Back to scheduled, or created if the match has no time.
    pub(crate) fn stop_play(&mut self) {
        self.status = if self.scheduled_time.is_some() {
            MatchStatus::Scheduled
        } else {
            MatchStatus::Created
        };
    }
}
