//! Bracket logic: sizing, construction, result propagation, round names, team import.

mod builder;
mod import;
mod naming;
mod propagation;
mod sizing;

pub use builder::build_bracket;
pub use import::parse_team_names;
pub use naming::{round_name, RoundSummary};
pub use propagation::apply_result;
pub use sizing::{preliminary_round, PreliminaryRound};
