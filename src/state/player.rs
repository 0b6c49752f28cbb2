//! Per-player match state.
//!
//! A player's hidden faction, their vote on the current mission, and whether
//! they were picked for the current team.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Hidden alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// The cooperative majority
    Resistance,
    /// The adversarial minority
    Spy,
}

impl Faction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resistance => "resistance",
            Self::Spy => "spy",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resistance => write!(f, "Resistance"),
            Self::Spy => write!(f, "Spy"),
        }
    }
}

/// A team member's vote on the current mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    #[default]
    Pending,
    Pass,
    Fail,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }

    pub fn is_cast(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl FromStr for Vote {
    type Err = GameError;

    /// Parse a cast vote. `pending` is not something a player can choose.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" | "p" | "success" => Ok(Self::Pass),
            "fail" | "f" => Ok(Self::Fail),
            _ => Err(GameError::InvalidVote(s.to_string())),
        }
    }
}

/// A player's state within a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Assigned when the match starts
    pub faction: Option<Faction>,

    /// Vote on the current mission
    pub vote: Vote,

    /// Picked for the current team
    pub on_team: bool,
}

impl PlayerState {
    /// Fresh roster entry: no faction, no vote, not on a team.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_spy(&self) -> bool {
        self.faction == Some(Faction::Spy)
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_cast()
    }

    /// Team member who hasn't voted yet.
    pub fn is_awaiting_vote(&self) -> bool {
        self.on_team && !self.has_voted()
    }

    /// Clear the per-mission flags.
    pub fn reset_mission(&mut self) {
        self.vote = Vote::Pending;
        self.on_team = false;
    }
}
