//! Data structures for the knockout tournament: teams, matches, brackets, tournaments.

mod bracket;
mod game;
mod team;
mod tournament;

pub use bracket::{Bracket, BracketError};
pub use game::{Match, MatchId, MatchStatus, Side, PRELIMINARY_ROUND};
pub use team::{Team, TeamId};
pub use tournament::{
    register_teams, shuffle_seeding, Tournament, TournamentError, TournamentId, TournamentStatus,
    TournamentSummary, DEFAULT_MAX_TEAMS,
};
