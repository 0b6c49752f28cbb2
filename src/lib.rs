//! Resistance State Library
//!
//! Rule engine and match state for a Resistance-style social deduction game.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Phase State Machine** - Every command is checked against the current
//!   phase, then validated, then applied to a copy of the state.
//!
//! - **Hidden Factions** - Players are split into Resistance and Spies per the
//!   balance table, using an injectable random source.
//!
//! - **Missions** - Team proposal by the rotating leader, secret pass/fail
//!   votes, fail thresholds and the race to three mission wins.
//!
//! - **Session Tables** - Optional host-side manager keeping one match per
//!   chat session.
//!
//! # Design Principles
//!
//! 1. **States are values** - Operations take `&GameState` and return a new
//!    one, so a rejected command never leaves partial changes.
//!
//! 2. **Errors are values** - Every rejection is a typed [`GameError`].
//!
//! 3. **No I/O** - No networking, persistence or chat formatting. Randomness
//!    comes in through [`RandomSource`].
//!
//! 4. **Serialization-ready** - State serializes with serde; `to_json` gives a
//!    public snapshot with factions hidden.
//!
//! # Example
//!
//! ```rust
//! use resistance_state::{Command, GameState, Phase, Rules, ScriptedSource};
//!
//! let rules = Rules::default();
//! let mut rng = ScriptedSource::default();
//! let mut state = GameState::new();
//!
//! for name in ["alice", "bob", "carol", "dave", "erin"] {
//!     state = Command::parse(name, "join")?.apply(&rules, &state, &mut rng)?;
//! }
//! state = Command::parse("alice", "start")?.apply(&rules, &state, &mut rng)?;
//! assert_eq!(state.phase(), Phase::PickTeam);
//!
//! // Only the leader may propose a team.
//! let leader = state.leader().unwrap_or_default().to_string();
//! let err = Command::parse("nobody", "pick alice bob")?
//!     .apply(&rules, &state, &mut rng)
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "Only the leader can pick the team");
//! assert!(state.has_player(&leader));
//! # Ok::<(), resistance_state::GameError>(())
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
