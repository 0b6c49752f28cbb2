//! Match score and win detection.

use serde::{Deserialize, Serialize};

use super::mission::MissionResult;
use super::player::Faction;

/// Mission wins needed to take the match.
pub const WINS_NEEDED: u8 = 3;

/// Mission wins per faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub resistance_wins: u8,
    pub spy_wins: u8,
}

impl Score {
    /// Credit a resolved mission to the faction that won it.
    pub fn record(&mut self, result: MissionResult) {
        match result {
            MissionResult::Success => self.resistance_wins += 1,
            MissionResult::Fail => self.spy_wins += 1,
            MissionResult::Pending => {}
        }
    }

    pub fn missions_played(&self) -> u8 {
        self.resistance_wins + self.spy_wins
    }
}

/// Faction that has reached `wins_needed`, if any.
pub fn winner(score: &Score, wins_needed: u8) -> Option<Faction> {
    if score.resistance_wins >= wins_needed {
        Some(Faction::Resistance)
    } else if score.spy_wins >= wins_needed {
        Some(Faction::Spy)
    } else {
        None
    }
}

pub fn is_decided(score: &Score, wins_needed: u8) -> bool {
    winner(score, wins_needed).is_some()
}
