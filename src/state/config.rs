//! Rules configuration.
//!
//! Hosts can load this from JSON; every field has a default matching the
//! standard ruleset.

use serde::{Deserialize, Serialize};

use super::balance::{MAX_PLAYERS, MISSION_COUNT};
use super::error::GameError;
use super::victory::WINS_NEEDED;

/// Tunable limits for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Roster cap enforced by `join`
    pub max_players: usize,

    /// Mission wins that end the match
    pub wins_needed: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            wins_needed: WINS_NEEDED,
        }
    }
}

impl RulesConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(2..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(GameError::InvalidConfig(format!(
                "max_players must be between 2 and {}, got {}",
                MAX_PLAYERS, self.max_players
            )));
        }

        // A faction must be able to win before the missions run out.
        let reachable = (MISSION_COUNT / 2 + 1) as u8;
        if self.wins_needed == 0 || self.wins_needed > reachable {
            return Err(GameError::InvalidConfig(format!(
                "wins_needed must be between 1 and {}, got {}",
                reachable, self.wins_needed
            )));
        }

        Ok(())
    }
}
