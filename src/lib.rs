//! Knockout tournament organizer: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    apply_result, build_bracket, parse_team_names, preliminary_round, round_name,
    PreliminaryRound, RoundSummary,
};
pub use models::{
    register_teams, shuffle_seeding, Bracket, BracketError, Match, MatchId, MatchStatus, Side,
    Team, TeamId, Tournament, TournamentError, TournamentId, TournamentStatus, TournamentSummary,
    DEFAULT_MAX_TEAMS, PRELIMINARY_ROUND,
};
