//! Host-side table manager.
//!
//! One [`Table`] per chat session (channel, room, ...). Applying a command
//! needs `&mut self`, so writes to a session are serialized; a table's state
//! is only replaced when the command succeeds.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::command::Command;
use super::error::GameError;
use super::game::{GameState, Rules};
use super::rng::RandomSource;

/// A match bound to a session.
#[derive(Debug, Clone)]
pub struct Table {
    pub state: GameState,

    /// When the first command was accepted
    pub created_at: DateTime<Utc>,

    /// When a command was last accepted
    pub updated_at: DateTime<Utc>,
}

impl Table {
    fn new(state: GameState, now: DateTime<Utc>) -> Self {
        Self {
            state,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.updated_at
    }
}

/// Tables indexed by session ID.
#[derive(Debug, Default)]
pub struct TableManager {
    rules: Rules,
    tables: HashMap<String, Table>,
}

impl TableManager {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            tables: HashMap::new(),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Get a table.
    pub fn get(&self, session: &str) -> Option<&Table> {
        self.tables.get(session)
    }

    /// Current state for a session; sessions without a table are `Inactive`.
    pub fn state(&self, session: &str) -> GameState {
        self.tables
            .get(session)
            .map(|t| t.state.clone())
            .unwrap_or_default()
    }

    /// Apply a command to a session's match.
    ///
    /// The table is created on the first accepted command.
    pub fn apply(
        &mut self,
        session: &str,
        command: &Command,
        rng: &mut impl RandomSource,
    ) -> Result<&GameState, GameError> {
        self.apply_at(session, command, rng, Utc::now())
    }

    fn apply_at(
        &mut self,
        session: &str,
        command: &Command,
        rng: &mut impl RandomSource,
        now: DateTime<Utc>,
    ) -> Result<&GameState, GameError> {
        let next = match self.tables.get(session) {
            Some(table) => command.apply(&self.rules, &table.state, rng)?,
            None => command.apply(&self.rules, &GameState::new(), rng)?,
        };

        let table = self
            .tables
            .entry(session.to_string())
            .and_modify(|t| t.updated_at = now)
            .or_insert_with(|| Table::new(GameState::new(), now));
        table.state = next;

        debug!(session, command = command.name(), phase = %table.state.phase(), "Command applied");
        Ok(&table.state)
    }

    /// Drop a session's match so a new one can be set up.
    pub fn reset(&mut self, session: &str) -> Option<Table> {
        self.tables.remove(session)
    }

    /// Remove finished matches.
    pub fn cleanup_finished(&mut self) -> Vec<String> {
        let finished: Vec<String> = self
            .tables
            .iter()
            .filter(|(_, t)| t.state.phase().is_terminal())
            .map(|(id, _)| id.clone())
            .collect();

        for id in &finished {
            self.tables.remove(id);
        }

        finished
    }

    /// Remove tables with no accepted command for longer than `max_idle`.
    pub fn expire_idle(&mut self, max_idle: Duration) -> Vec<String> {
        self.expire_idle_at(Utc::now(), max_idle)
    }

    fn expire_idle_at(&mut self, now: DateTime<Utc>, max_idle: Duration) -> Vec<String> {
        let expired: Vec<String> = self
            .tables
            .iter()
            .filter(|(_, t)| t.idle_for(now) > max_idle)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            self.tables.remove(id);
        }

        expired
    }

    /// Count matches in progress.
    pub fn active_count(&self) -> usize {
        self.tables
            .values()
            .filter(|t| t.state.phase().is_active())
            .count()
    }

    /// Total table count.
    pub fn count(&self) -> usize {
        self.tables.len()
    }
}
