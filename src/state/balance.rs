//! Balance tables.
//!
//! Static lookups from player count to the faction split and the mission
//! sequence. Counts without an entry are rejected, never treated as empty.

use super::error::GameError;
use super::mission::MissionSpec;

/// Player counts that have a balance entry.
pub const SUPPORTED_PLAYER_COUNTS: [usize; 7] = [2, 5, 6, 7, 8, 9, 10];

/// Largest roster the tables cover.
pub const MAX_PLAYERS: usize = 10;

/// Number of missions in every match.
pub const MISSION_COUNT: usize = 5;

/// A mission table entry: team size alone, or team size with fail threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Team(usize),
    TeamWithThreshold(usize, usize),
}

use Slot::{Team as T, TeamWithThreshold as Tf};

const MISSIONS_2: [Slot; MISSION_COUNT] = [T(1), T(2), T(1), T(2), T(2)];
const MISSIONS_5: [Slot; MISSION_COUNT] = [T(2), T(3), T(2), T(3), T(3)];
const MISSIONS_6: [Slot; MISSION_COUNT] = [T(2), T(3), T(4), T(3), T(4)];
const MISSIONS_7: [Slot; MISSION_COUNT] = [T(2), T(3), T(3), Tf(4, 2), T(4)];
const MISSIONS_8_PLUS: [Slot; MISSION_COUNT] = [T(3), T(4), T(4), Tf(5, 2), T(5)];

impl Slot {
    fn expand(self) -> MissionSpec {
        match self {
            Self::Team(size) => MissionSpec::new(size, 1),
            Self::TeamWithThreshold(size, threshold) => MissionSpec::new(size, threshold),
        }
    }
}

/// Faction split for a roster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactionSplit {
    pub resistance: usize,
    pub spies: usize,
}

impl FactionSplit {
    pub fn total(&self) -> usize {
        self.resistance + self.spies
    }
}

/// Check whether a player count has a balance entry.
pub fn is_supported(player_count: usize) -> bool {
    SUPPORTED_PLAYER_COUNTS.contains(&player_count)
}

/// Look up `(resistance, spies)` for a player count.
pub fn faction_split(player_count: usize) -> Result<FactionSplit, GameError> {
    let (resistance, spies) = match player_count {
        2 => (1, 1),
        5 => (3, 2),
        6 => (4, 2),
        7 => (4, 3),
        8 => (5, 3),
        9 => (6, 3),
        10 => (6, 4),
        count => return Err(GameError::UnsupportedPlayerCount { count }),
    };
    Ok(FactionSplit { resistance, spies })
}

/// Build the mission sequence for a player count.
pub fn mission_specs(player_count: usize) -> Result<Vec<MissionSpec>, GameError> {
    let slots: &[Slot] = match player_count {
        2 => &MISSIONS_2,
        5 => &MISSIONS_5,
        6 => &MISSIONS_6,
        7 => &MISSIONS_7,
        8..=10 => &MISSIONS_8_PLUS,
        count => return Err(GameError::UnsupportedPlayerCount { count }),
    };
    Ok(slots.iter().map(|slot| slot.expand()).collect())
}
