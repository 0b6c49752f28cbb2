//! Missions: spec, tally and resolution.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::player::{PlayerState, Vote};

/// Outcome of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionResult {
    #[default]
    Pending,
    Success,
    Fail,
}

impl MissionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for MissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One round's requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSpec {
    pub team_size: usize,
    /// Fail votes needed to sink the mission
    pub fail_threshold: usize,
    pub result: MissionResult,
}

impl MissionSpec {
    pub fn new(team_size: usize, fail_threshold: usize) -> Self {
        Self {
            team_size,
            fail_threshold,
            result: MissionResult::Pending,
        }
    }

    /// Decide the outcome from a number of fail votes.
    pub fn outcome(&self, fail_count: usize) -> MissionResult {
        if fail_count >= self.fail_threshold {
            MissionResult::Fail
        } else {
            MissionResult::Success
        }
    }
}

/// A completed mission, as recorded in the match history.
///
/// Only the fail count is kept; who voted what stays secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub spec: MissionSpec,
    pub leader: String,
    pub team: BTreeSet<String>,
    pub fail_count: usize,
}

impl MissionRecord {
    pub fn result(&self) -> MissionResult {
        self.spec.result
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "team_size": self.spec.team_size,
            "fail_threshold": self.spec.fail_threshold,
            "result": self.spec.result.as_str(),
            "leader": self.leader,
            "team": self.team,
            "fail_count": self.fail_count
        })
    }
}

/// Vote counts among team members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub passes: usize,
    pub fails: usize,
    pub pending: usize,
}

impl Tally {
    /// Count the votes of team members only.
    pub fn count(players: &IndexMap<String, PlayerState>) -> Self {
        players
            .values()
            .filter(|p| p.on_team)
            .fold(Self::default(), |mut tally, p| {
                match p.vote {
                    Vote::Pending => tally.pending += 1,
                    Vote::Pass => tally.passes += 1,
                    Vote::Fail => tally.fails += 1,
                }
                tally
            })
    }

    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }
}
