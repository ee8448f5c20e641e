//! Team data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// A registered team. Matches hold clones of it.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Create a new team with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
