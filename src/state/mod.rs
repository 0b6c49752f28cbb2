//! Match state and rules.
//!
//! This module provides the rule engine and its supporting types:
//!
//! - `balance` - Faction split and mission table per player count
//! - `rng` - Injectable random source
//! - `faction` - Random faction assignment and leader draw
//! - `player` - Per-player faction, vote and team flag
//! - `roster` - Joining and leaving before the match starts
//! - `mission` - Mission specs, vote tally and history records
//! - `victory` - Score and win detection
//! - `game` - `GameState` and the phase state machine
//! - `command` - Parsed player commands for a chat adapter
//! - `session` - Host-side tables, one match per session
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          TableManager                            │
//! │   session_id → Table { GameState, created_at, updated_at }       │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │ Command::apply
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Rules (phase state machine)                  │
//! │                                                                  │
//! │   require_phase ──▶ validate ──▶ clone + mutate ──▶ GameState    │
//! │                                                                  │
//! │   join/leave ─▶ roster     start ─▶ balance + faction + rng      │
//! │   pick_team ─▶ mission     vote  ─▶ mission::Tally + victory     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use resistance_state::state::{game, GameRng, GameState, Phase, Vote};
//!
//! let mut state = GameState::new();
//! for name in ["alice", "bob", "carol", "dave", "erin"] {
//!     state = game::join(&state, name)?;
//! }
//! let state = game::start(&state, &mut GameRng::new(7))?;
//! assert_eq!(state.phase(), Phase::PickTeam);
//!
//! let leader = state.leader().unwrap_or_default().to_string();
//! let team: Vec<&str> = state.player_names().take(2).collect();
//! let state = game::pick_team(&state, &leader, &team)?;
//! let state = team
//!     .iter()
//!     .try_fold(state, |s, name| game::vote(&s, name, Vote::Pass))?;
//! assert_eq!(state.score().resistance_wins, 1);
//! # Ok::<(), resistance_state::state::GameError>(())
//! ```

pub mod balance;
pub mod command;
pub mod config;
pub mod error;
pub mod faction;
pub mod game;
pub mod mission;
pub mod player;
pub mod rng;
pub mod roster;
pub mod session;
pub mod victory;

// Re-export commonly used types
pub use balance::{FactionSplit, MAX_PLAYERS, MISSION_COUNT, SUPPORTED_PLAYER_COUNTS};
pub use command::Command;
pub use config::RulesConfig;
pub use error::{ErrorKind, GameError};
pub use game::{join, leave, pick_team, require_phase, start, vote, GameState, Phase, Rules};
pub use mission::{MissionRecord, MissionResult, MissionSpec, Tally};
pub use player::{Faction, PlayerState, Vote};
pub use rng::{GameRng, RandomSource, ScriptedSource};
pub use session::{Table, TableManager};
pub use victory::{Score, WINS_NEEDED};
