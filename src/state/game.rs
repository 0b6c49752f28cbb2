//! Match state and the phase state machine.
//!
//! [`GameState`] is a value: every transition borrows the prior state and
//! returns a fresh one, so a rejected command leaves the caller's copy
//! exactly as it was.
//!
//! # State Diagram
//!
//! ```text
//!  join / leave
//!  ┌────────┐
//!  │        ▼
//! ┌──────────┐  start   ┌──────────┐ pick_team ┌──────────┐
//! │ Inactive │─────────▶│ PickTeam │──────────▶│  Voting  │◀─┐ vote (partial)
//! └──────────┘          └──────────┘           └────┬─────┘──┘
//!                             ▲   vote (resolved)   │
//!                             └─────────────────────┤
//!                                                   │ vote (match decided)
//!                                                   ▼
//!                                             ┌──────────┐
//!                                             │ GameOver │
//!                                             └──────────┘
//! ```

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::balance;
use super::config::RulesConfig;
use super::error::GameError;
use super::faction::{assign_factions, pick_leader};
use super::mission::{MissionRecord, MissionResult, MissionSpec, Tally};
use super::player::{Faction, PlayerState, Vote};
use super::rng::RandomSource;
use super::roster;
use super::victory::{self, Score};

/// Match phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Roster open, match not started
    #[default]
    Inactive,
    /// Leader must propose a team
    PickTeam,
    /// Team members are voting on the mission
    Voting,
    /// A faction has won
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::PickTeam => "pick_team",
            Self::Voting => "voting",
            Self::GameOver => "game_over",
        }
    }

    /// Check if a match is underway.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::PickTeam | Self::Voting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "waiting for players"),
            Self::PickTeam => write!(f, "picking a team"),
            Self::Voting => write!(f, "voting"),
            Self::GameOver => write!(f, "over"),
        }
    }
}

/// Full state of one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    phase: Phase,

    /// Roster in join order
    players: IndexMap<String, PlayerState>,

    /// Remaining missions; the first is the current one
    missions: Vec<MissionSpec>,

    leader: Option<String>,

    /// Proposed team while voting
    current_team: BTreeSet<String>,

    score: Score,

    /// Resolved missions, oldest first
    history: Vec<MissionRecord>,
}

impl GameState {
    /// The initial state: no players, no missions, no score.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &IndexMap<String, PlayerState> {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&PlayerState> {
        self.players.get(name)
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    /// Player names in join order.
    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn missions(&self) -> &[MissionSpec] {
        &self.missions
    }

    pub fn current_mission(&self) -> Option<&MissionSpec> {
        self.missions.first()
    }

    /// 1-indexed number of the mission being played.
    pub fn mission_number(&self) -> usize {
        self.history.len() + 1
    }

    pub fn leader(&self) -> Option<&str> {
        self.leader.as_deref()
    }

    pub fn is_leader(&self, name: &str) -> bool {
        self.leader() == Some(name)
    }

    pub fn current_team(&self) -> &BTreeSet<String> {
        &self.current_team
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &[MissionRecord] {
        &self.history
    }

    /// Winning faction once the match is over.
    pub fn winner(&self) -> Option<Faction> {
        if !self.phase.is_terminal() {
            return None;
        }
        self.history.last().map(|record| match record.result() {
            MissionResult::Fail => Faction::Spy,
            _ => Faction::Resistance,
        })
    }

    /// A player's own faction, for a private reveal.
    pub fn faction_of(&self, name: &str) -> Option<Faction> {
        self.players.get(name).and_then(|p| p.faction)
    }

    /// Spies learn who the other spies are; resistance members learn nothing.
    pub fn spies_visible_to(&self, name: &str) -> Vec<&str> {
        if self.faction_of(name) != Some(Faction::Spy) {
            return Vec::new();
        }
        self.players
            .iter()
            .filter(|(other, p)| other.as_str() != name && p.is_spy())
            .map(|(other, _)| other.as_str())
            .collect()
    }

    /// Team members who still have to vote.
    pub fn awaiting_votes(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|(_, p)| p.is_awaiting_vote())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Public snapshot for clients.
    ///
    /// Factions are hidden until the match is over, and individual votes are
    /// only shown as cast or not.
    pub fn to_json(&self) -> serde_json::Value {
        let reveal = self.phase.is_terminal();
        let players: Vec<serde_json::Value> = self
            .players
            .iter()
            .map(|(name, p)| {
                let mut obj = serde_json::json!({
                    "name": name,
                    "on_team": p.on_team,
                    "has_voted": p.has_voted()
                });
                if reveal {
                    obj["faction"] = serde_json::json!(p.faction.map(|f| f.as_str()));
                }
                obj
            })
            .collect();

        let missions: Vec<serde_json::Value> = self
            .missions
            .iter()
            .map(|m| {
                serde_json::json!({
                    "team_size": m.team_size,
                    "fail_threshold": m.fail_threshold
                })
            })
            .collect();

        let history: Vec<serde_json::Value> = self.history.iter().map(|r| r.to_json()).collect();

        serde_json::json!({
            "phase": self.phase.as_str(),
            "players": players,
            "leader": self.leader,
            "current_team": self.current_team,
            "mission_number": self.mission_number(),
            "missions": missions,
            "history": history,
            "score": {
                "resistance": self.score.resistance_wins,
                "spies": self.score.spy_wins
            },
            "winner": self.winner().map(|f| f.as_str())
        })
    }
}

/// Reject a command unless the match is in `expected`.
pub fn require_phase(state: &GameState, expected: Phase) -> Result<(), GameError> {
    if state.phase != expected {
        return Err(GameError::WrongPhase {
            expected,
            actual: state.phase,
        });
    }
    Ok(())
}

/// The rule engine, configured with a [`RulesConfig`].
#[derive(Debug, Clone, Default)]
pub struct Rules {
    config: RulesConfig,
}

impl Rules {
    pub fn new(config: RulesConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Add a player to the roster.
    pub fn join(&self, state: &GameState, name: &str) -> Result<GameState, GameError> {
        require_phase(state, Phase::Inactive)?;

        let mut next = state.clone();
        roster::add_player(&mut next.players, name, self.config.max_players)?;

        debug!(player = name.trim(), players = next.players.len(), "Player joined");
        Ok(next)
    }

    /// Remove a player before the match starts.
    pub fn leave(&self, state: &GameState, name: &str) -> Result<GameState, GameError> {
        require_phase(state, Phase::Inactive)?;

        let mut next = state.clone();
        roster::remove_player(&mut next.players, name)?;

        debug!(player = name.trim(), players = next.players.len(), "Player left");
        Ok(next)
    }

    /// Deal factions, lay out the missions and pick the first leader.
    pub fn start(
        &self,
        state: &GameState,
        rng: &mut impl RandomSource,
    ) -> Result<GameState, GameError> {
        require_phase(state, Phase::Inactive)?;

        let count = state.players.len();
        if count < 2 {
            return Err(GameError::NotEnoughPlayers { count });
        }
        let split = balance::faction_split(count)?;
        let missions = balance::mission_specs(count)?;

        let names: Vec<&str> = state.player_names().collect();
        let factions = assign_factions(&names, split, rng);
        let leader = names[pick_leader(count, rng)].to_string();

        let mut next = state.clone();
        for (name, player) in next.players.iter_mut() {
            player.faction = factions.get(name.as_str()).copied();
            player.reset_mission();
        }
        next.missions = missions;
        next.history.clear();
        next.current_team.clear();
        next.score = Score::default();
        next.phase = Phase::PickTeam;

        info!(
            players = count,
            spies = split.spies,
            leader = %leader,
            "Match started"
        );
        next.leader = Some(leader);
        Ok(next)
    }

    /// The leader proposes the team for the current mission.
    pub fn pick_team<S: AsRef<str>>(
        &self,
        state: &GameState,
        player: &str,
        team: &[S],
    ) -> Result<GameState, GameError> {
        require_phase(state, Phase::PickTeam)?;

        if !state.is_leader(player.trim()) {
            return Err(GameError::NotLeader);
        }

        let team: BTreeSet<String> = team
            .iter()
            .map(|name| name.as_ref().trim().to_string())
            .collect();
        let expected = state.current_mission().map_or(0, |m| m.team_size);
        if team.len() != expected {
            return Err(GameError::WrongTeamSize {
                expected,
                actual: team.len(),
            });
        }
        if let Some(unknown) = team.iter().find(|name| !state.has_player(name)) {
            return Err(GameError::InvalidPlayer(unknown.clone()));
        }

        let mut next = state.clone();
        for (name, p) in next.players.iter_mut() {
            p.vote = Vote::Pending;
            p.on_team = team.contains(name);
        }
        debug!(
            leader = player.trim(),
            mission = next.mission_number(),
            team = ?team,
            "Team proposed"
        );
        next.current_team = team;
        next.phase = Phase::Voting;
        Ok(next)
    }

    /// Record a team member's vote, resolving the mission once all are in.
    pub fn vote(
        &self,
        state: &GameState,
        player: &str,
        choice: Vote,
    ) -> Result<GameState, GameError> {
        require_phase(state, Phase::Voting)?;

        if !choice.is_cast() {
            return Err(GameError::InvalidVote(choice.as_str().to_string()));
        }

        let name = player.trim();
        let voter = state
            .players
            .get(name)
            .filter(|p| p.on_team)
            .ok_or_else(|| GameError::NotInMission(name.to_string()))?;
        if voter.has_voted() {
            return Err(GameError::AlreadyVoted(name.to_string()));
        }

        let mut next = state.clone();
        if let Some(p) = next.players.get_mut(name) {
            p.vote = choice;
        }

        let tally = Tally::count(&next.players);
        if !tally.is_complete() {
            debug!(player = name, remaining = tally.pending, "Vote recorded");
            return Ok(next);
        }

        Ok(self.resolve_mission(next, tally))
    }

    /// Score the current mission and move on to the next leader, or end the match.
    fn resolve_mission(&self, mut next: GameState, tally: Tally) -> GameState {
        let leader = next.leader.clone().unwrap_or_default();
        let team = std::mem::take(&mut next.current_team);

        if !next.missions.is_empty() {
            let mut spec = next.missions.remove(0);
            spec.result = spec.outcome(tally.fails);
            next.score.record(spec.result);

            info!(
                mission = next.history.len() + 1,
                result = %spec.result,
                fails = tally.fails,
                resistance = next.score.resistance_wins,
                spies = next.score.spy_wins,
                "Mission resolved"
            );

            next.history.push(MissionRecord {
                spec,
                leader: leader.clone(),
                team,
                fail_count: tally.fails,
            });
        }

        for p in next.players.values_mut() {
            p.reset_mission();
        }

        if victory::is_decided(&next.score, self.config.wins_needed) || next.missions.is_empty() {
            next.phase = Phase::GameOver;
            info!(winner = ?next.winner(), "Match over");
            return next;
        }

        next.leader = roster::next_in_order(&next.players, &leader).map(str::to_string);
        next.phase = Phase::PickTeam;
        next
    }
}

/// Add a player under the standard rules.
pub fn join(state: &GameState, name: &str) -> Result<GameState, GameError> {
    Rules::default().join(state, name)
}

/// Remove a player before the match starts.
pub fn leave(state: &GameState, name: &str) -> Result<GameState, GameError> {
    Rules::default().leave(state, name)
}

/// Start the match under the standard rules.
pub fn start(state: &GameState, rng: &mut impl RandomSource) -> Result<GameState, GameError> {
    Rules::default().start(state, rng)
}

/// Propose a team under the standard rules.
pub fn pick_team<S: AsRef<str>>(
    state: &GameState,
    player: &str,
    team: &[S],
) -> Result<GameState, GameError> {
    Rules::default().pick_team(state, player, team)
}

/// Cast a vote under the standard rules.
pub fn vote(state: &GameState, player: &str, choice: Vote) -> Result<GameState, GameError> {
    Rules::default().vote(state, player, choice)
}
