//! Engine errors.
//!
//! Every rejected command produces a [`GameError`]; the state it was applied
//! to is borrowed immutably and therefore never changes.

use super::game::Phase;

/// Errors returned by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The command is not valid in the current phase.
    #[error("Can't do that while the game is {actual} (needs {expected})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("{0} has already joined")]
    AlreadyJoined(String),

    #[error("The game is full ({max} players)")]
    MaxPlayers { max: usize },

    #[error("Not enough players to start ({count} joined)")]
    NotEnoughPlayers { count: usize },

    #[error("Can't play with {count} players (supported: 2, 5-10)")]
    UnsupportedPlayerCount { count: usize },

    #[error("Only the leader can pick the team")]
    NotLeader,

    #[error("Team must have {expected} players, got {actual}")]
    WrongTeamSize { expected: usize, actual: usize },

    /// A name that is not in the roster (or is blank).
    #[error("{0} is not in this game")]
    InvalidPlayer(String),

    #[error("Vote must be pass or fail, got {0:?}")]
    InvalidVote(String),

    #[error("{0} has already voted on this mission")]
    AlreadyVoted(String),

    #[error("{0} is not on this mission")]
    NotInMission(String),

    /// Inbound text did not match any command.
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Invalid rules config: {0}")]
    InvalidConfig(String),
}

/// Fieldless error kind, for hosts that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    WrongPhase,
    AlreadyJoined,
    MaxPlayers,
    NotEnoughPlayers,
    UnsupportedPlayerCount,
    NotLeader,
    WrongTeamSize,
    InvalidPlayer,
    InvalidVote,
    AlreadyVoted,
    NotInMission,
    UnknownCommand,
    InvalidConfig,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongPhase { .. } => ErrorKind::WrongPhase,
            Self::AlreadyJoined(_) => ErrorKind::AlreadyJoined,
            Self::MaxPlayers { .. } => ErrorKind::MaxPlayers,
            Self::NotEnoughPlayers { .. } => ErrorKind::NotEnoughPlayers,
            Self::UnsupportedPlayerCount { .. } => ErrorKind::UnsupportedPlayerCount,
            Self::NotLeader => ErrorKind::NotLeader,
            Self::WrongTeamSize { .. } => ErrorKind::WrongTeamSize,
            Self::InvalidPlayer(_) => ErrorKind::InvalidPlayer,
            Self::InvalidVote(_) => ErrorKind::InvalidVote,
            Self::AlreadyVoted(_) => ErrorKind::AlreadyVoted,
            Self::NotInMission(_) => ErrorKind::NotInMission,
            Self::UnknownCommand(_) => ErrorKind::UnknownCommand,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
