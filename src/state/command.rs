//! Commands as a transport adapter sees them.
//!
//! The chat layer owns pattern matching and replies; it hands this module
//! the speaking player and the text after the command prefix, and renders
//! whatever state or error comes back.

use tracing::debug;

use super::error::GameError;
use super::game::{GameState, Rules};
use super::player::Vote;
use super::rng::RandomSource;

/// One player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { player: String },
    Leave { player: String },
    Start,
    PickTeam { player: String, team: Vec<String> },
    Vote { player: String, choice: Vote },
}

impl Command {
    /// Parse chat text such as `join`, `pick alice, bob` or `vote fail`.
    pub fn parse(player: &str, text: &str) -> Result<Self, GameError> {
        let mut words = text.split_whitespace();
        let verb = words
            .next()
            .map(|w| w.to_ascii_lowercase())
            .unwrap_or_default();
        let player = player.trim().to_string();

        match verb.as_str() {
            "join" => Ok(Self::Join { player }),
            "leave" => Ok(Self::Leave { player }),
            "start" => Ok(Self::Start),
            "pick" | "team" => {
                let team = words
                    .flat_map(|w| w.split(','))
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                Ok(Self::PickTeam { player, team })
            }
            "vote" => {
                let choice = words.collect::<Vec<_>>().join(" ").parse()?;
                Ok(Self::Vote { player, choice })
            }
            _ => Err(GameError::UnknownCommand(text.trim().to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::Start => "start",
            Self::PickTeam { .. } => "pick",
            Self::Vote { .. } => "vote",
        }
    }

    /// Run this command against `state`.
    pub fn apply(
        &self,
        rules: &Rules,
        state: &GameState,
        rng: &mut impl RandomSource,
    ) -> Result<GameState, GameError> {
        let result = match self {
            Self::Join { player } => rules.join(state, player),
            Self::Leave { player } => rules.leave(state, player),
            Self::Start => rules.start(state, rng),
            Self::PickTeam { player, team } => rules.pick_team(state, player, team),
            Self::Vote { player, choice } => rules.vote(state, player, *choice),
        };

        if let Err(err) = &result {
            debug!(command = self.name(), phase = %state.phase(), error = %err, "Command rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::game::Phase;
    use crate::state::rng::ScriptedSource;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!(
            Command::parse(" alice ", "join").unwrap(),
            Command::Join {
                player: "alice".to_string()
            }
        );
        assert_eq!(Command::parse("alice", "START").unwrap(), Command::Start);
        assert_eq!(
            Command::parse("alice", "pick bob, carol").unwrap(),
            Command::PickTeam {
                player: "alice".to_string(),
                team: vec!["bob".to_string(), "carol".to_string()]
            }
        );
        assert_eq!(
            Command::parse("alice", "team bob,carol").unwrap(),
            Command::PickTeam {
                player: "alice".to_string(),
                team: vec!["bob".to_string(), "carol".to_string()]
            }
        );
        assert_eq!(
            Command::parse("bob", "vote Fail").unwrap(),
            Command::Vote {
                player: "bob".to_string(),
                choice: Vote::Fail
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("bob", "vote maybe"),
            Err(GameError::InvalidVote("maybe".to_string()))
        );
        assert_eq!(
            Command::parse("bob", "vote"),
            Err(GameError::InvalidVote(String::new()))
        );
        assert_eq!(
            Command::parse("bob", "dance now"),
            Err(GameError::UnknownCommand("dance now".to_string()))
        );
        assert_eq!(
            Command::parse("bob", ""),
            Err(GameError::UnknownCommand(String::new()))
        );
    }

    #[test]
    fn test_apply_sequence() {
        let rules = Rules::default();
        let mut rng = ScriptedSource::default();
        let mut state = GameState::new();

        for (player, text) in [
            ("alice", "join"),
            ("bob", "join"),
            ("carol", "join"),
            ("dave", "join"),
            ("erin", "join"),
            ("alice", "start"),
            ("alice", "pick alice dave"),
            ("alice", "vote pass"),
            ("dave", "vote pass"),
        ] {
            let command = Command::parse(player, text).unwrap();
            state = command.apply(&rules, &state, &mut rng).unwrap();
        }

        assert_eq!(state.phase(), Phase::PickTeam);
        assert_eq!(state.score().resistance_wins, 1);
        assert_eq!(state.leader(), Some("bob"));
    }

    #[test]
    fn test_apply_rejected() {
        let rules = Rules::default();
        let state = GameState::new();
        let command = Command::parse("alice", "vote pass").unwrap();
        let err = command
            .apply(&rules, &state, &mut ScriptedSource::default())
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::WrongPhase);
    }
}
