//! Tournament: registered teams, their bracket, and lifecycle bookkeeping.

use crate::logic::{apply_result, build_bracket};
use crate::models::bracket::{Bracket, BracketError};
use crate::models::game::{Match, MatchStatus};
use crate::models::team::Team;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on registered teams unless configured otherwise.
pub const DEFAULT_MAX_TEAMS: usize = 128;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Building the bracket or applying a result failed.
    Bracket(BracketError),
    /// Tournament or team name is blank.
    EmptyName,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName(String),
    /// More teams than the configured maximum.
    TooManyTeams { max: usize, count: usize },
    /// The tournament changed since the client last read it.
    VersionConflict { expected: u64, actual: u64 },
    /// The match is not in a status that allows this action.
    InvalidMatchState { match_id: String, status: MatchStatus },
    /// The team list could not be read.
    Import(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::Bracket(e) => write!(f, "{}", e),
            TournamentError::EmptyName => write!(f, "Name must not be empty"),
            TournamentError::DuplicateTeamName(name) => {
                write!(f, "A team named '{}' already exists", name)
            }
            TournamentError::TooManyTeams { max, count } => {
                write!(f, "At most {} teams allowed (got {})", max, count)
            }
            TournamentError::VersionConflict { expected, actual } => write!(
                f,
                "Tournament was modified (expected version {}, current {})",
                expected, actual
            ),
            TournamentError::InvalidMatchState { match_id, status } => {
                write!(f, "Match {} cannot do that while {:?}", match_id, status)
            }
            TournamentError::Import(msg) => write!(f, "Could not read team list: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TournamentError::Bracket(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BracketError> for TournamentError {
    fn from(e: BracketError) -> Self {
        TournamentError::Bracket(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Bracket built, no result entered yet.
    #[default]
    Draft,
    InProgress,
    /// The final has a winner.
    Completed,
}

/// List view of a tournament (no bracket).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub total_teams: usize,
    pub champion: Option<Team>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full tournament state: teams, bracket, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub total_teams: usize,
    /// Teams in seeding order; the bracket is rebuilt from this list on reset.
    pub teams: Vec<Team>,
    pub bracket: Bracket,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every change; clients send it back to detect concurrent edits.
    pub version: u64,
}

/// Validate team names and turn them into teams: trimmed, non-empty, unique (case-insensitive),
/// at most `max_teams`.
pub fn register_teams<I, S>(names: I, max_teams: usize) -> Result<Vec<Team>, TournamentError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut teams: Vec<Team> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        teams.push(Team::new(name));
    }
    if teams.len() > max_teams {
        return Err(TournamentError::TooManyTeams {
            max: max_teams,
            count: teams.len(),
        });
    }
    Ok(teams)
}

/// Randomize seeding order in place.
pub fn shuffle_seeding(teams: &mut [Team]) {
    teams.shuffle(&mut rand::thread_rng());
}

impl Tournament {
    /// Create a tournament and build its bracket from `teams` (in seeding order).
    pub fn new(name: impl Into<String>, teams: Vec<Team>) -> Result<Self, TournamentError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let bracket = build_bracket(&teams)?;
        log::debug!(
            "Built bracket for '{}': {} teams, {} rounds",
            name,
            teams.len(),
            bracket.rounds.len()
        );
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            status: TournamentStatus::Draft,
            total_teams: teams.len(),
            teams,
            bracket,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
            total_teams: self.total_teams,
            champion: self.champion().cloned(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn champion(&self) -> Option<&Team> {
        self.bracket.champion()
    }

    /// Record a score for a match and advance the winner. With `expected_version`, the call
    /// fails instead of overwriting a change the caller has not seen.
    pub fn record_result(
        &mut self,
        match_id: &str,
        score_1: u32,
        score_2: u32,
        expected_version: Option<u64>,
    ) -> Result<&Match, TournamentError> {
        self.check_version(expected_version)?;
        self.bracket = apply_result(&self.bracket, match_id, score_1, score_2)?;
        log::debug!(
            "Tournament {}: match {} ended {}-{}",
            self.id,
            match_id,
            score_1,
            score_2
        );
        self.touch();
        self.match_ref(match_id)
    }

    /// Set (or move) the kick-off time of a match that has not finished.
    pub fn schedule_match(
        &mut self,
        match_id: &str,
        time: DateTime<Utc>,
    ) -> Result<&Match, TournamentError> {
        let m = self.match_mut(match_id)?;
        if m.status == MatchStatus::Finished {
            return Err(invalid_state(m));
        }
        m.scheduled_time = Some(time);
        if m.status == MatchStatus::Created {
            m.status = MatchStatus::Scheduled;
        }
        self.touch();
        self.match_ref(match_id)
    }

    /// Mark a match as being played. Both teams must be known.
    pub fn start_match(&mut self, match_id: &str) -> Result<&Match, TournamentError> {
        let m = self.match_mut(match_id)?;
        if !m.is_ready() {
            return Err(BracketError::MatchNotReady(m.id.clone()).into());
        }
        if !matches!(m.status, MatchStatus::Created | MatchStatus::Scheduled) {
            return Err(invalid_state(m));
        }
        m.status = MatchStatus::InProgress;
        self.touch();
        self.match_ref(match_id)
    }

    /// Take a match out of play again (back to scheduled, or created if it has no time).
    pub fn pause_match(&mut self, match_id: &str) -> Result<&Match, TournamentError> {
        let m = self.match_mut(match_id)?;
        if m.status != MatchStatus::InProgress {
            return Err(invalid_state(m));
        }
        m.stop_play();
        self.touch();
        self.match_ref(match_id)
    }

    /// Throw away every result and rebuild the bracket from the registered teams.
    pub fn reset(&mut self) -> Result<(), TournamentError> {
        self.bracket = build_bracket(&self.teams)?;
        log::info!("Tournament {} reset", self.id);
        self.touch();
        Ok(())
    }

    fn check_version(&self, expected: Option<u64>) -> Result<(), TournamentError> {
        match expected {
            Some(expected) if expected != self.version => Err(TournamentError::VersionConflict {
                expected,
                actual: self.version,
            }),
            _ => Ok(()),
        }
    }

    fn match_ref(&self, match_id: &str) -> Result<&Match, TournamentError> {
        self.bracket
            .get_match(match_id)
            .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()).into())
    }

    fn match_mut(&mut self, match_id: &str) -> Result<&mut Match, TournamentError> {
        self.bracket
            .get_match_mut(match_id)
            .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()).into())
    }

    /// Bump version and timestamp, and derive status from the bracket.
    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
        let status = if self.bracket.champion().is_some() {
            TournamentStatus::Completed
        } else if self.bracket.has_results() {
            TournamentStatus::InProgress
        } else {
            TournamentStatus::Draft
        };
        if status == TournamentStatus::Completed && self.status != status {
            if let Some(champion) = self.bracket.champion() {
                log::info!("Tournament {} won by {}", self.id, champion.name);
            }
        }
        self.status = status;
    }
}

fn invalid_state(m: &Match) -> TournamentError {
    TournamentError::InvalidMatchState {
        match_id: m.id.clone(),
        status: m.status,
    }
}
