//! Roster management.
//!
//! Players join (and may leave) only before the match starts. Join order is
//! kept and later decides the leader rotation.

use indexmap::IndexMap;

use super::error::GameError;
use super::player::PlayerState;

/// Normalize a player name, rejecting blanks.
pub fn normalize_name(name: &str) -> Result<&str, GameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::InvalidPlayer(name.to_string()));
    }
    Ok(name)
}

/// Append a new player to the roster.
pub fn add_player(
    players: &mut IndexMap<String, PlayerState>,
    name: &str,
    max_players: usize,
) -> Result<(), GameError> {
    let name = normalize_name(name)?;

    if players.contains_key(name) {
        return Err(GameError::AlreadyJoined(name.to_string()));
    }

    if players.len() >= max_players {
        return Err(GameError::MaxPlayers { max: max_players });
    }

    players.insert(name.to_string(), PlayerState::new());
    Ok(())
}

/// Remove a player, keeping everyone else in join order.
pub fn remove_player(
    players: &mut IndexMap<String, PlayerState>,
    name: &str,
) -> Result<PlayerState, GameError> {
    let name = name.trim();
    players
        .shift_remove(name)
        .ok_or_else(|| GameError::InvalidPlayer(name.to_string()))
}

/// The player after `name` in join order, wrapping around.
pub fn next_in_order<'a>(
    players: &'a IndexMap<String, PlayerState>,
    name: &str,
) -> Option<&'a str> {
    let index = players.get_index_of(name)?;
    let (next, _) = players.get_index((index + 1) % players.len())?;
    Some(next.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> IndexMap<String, PlayerState> {
        names
            .iter()
            .map(|n| (n.to_string(), PlayerState::new()))
            .collect()
    }

    #[test]
    fn test_add_preserves_order() {
        let mut players = IndexMap::new();
        add_player(&mut players, "carol", 10).unwrap();
        add_player(&mut players, " alice ", 10).unwrap();
        add_player(&mut players, "bob", 10).unwrap();

        let names: Vec<&str> = players.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn test_add_errors() {
        let mut players = roster(&["alice", "bob"]);

        assert_eq!(
            add_player(&mut players, "alice", 10),
            Err(GameError::AlreadyJoined("alice".to_string()))
        );
        assert_eq!(
            add_player(&mut players, "  ", 10),
            Err(GameError::InvalidPlayer(String::new()))
        );
        assert_eq!(
            add_player(&mut players, "carol", 2),
            Err(GameError::MaxPlayers { max: 2 })
        );
        assert_eq!(players.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut players = roster(&["alice", "bob", "carol"]);
        remove_player(&mut players, "bob").unwrap();
        let names: Vec<&str> = players.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol"]);

        assert_eq!(
            remove_player(&mut players, "bob"),
            Err(GameError::InvalidPlayer("bob".to_string()))
        );
    }

    #[test]
    fn test_next_in_order_wraps() {
        let players = roster(&["alice", "bob", "carol"]);
        assert_eq!(next_in_order(&players, "alice"), Some("bob"));
        assert_eq!(next_in_order(&players, "carol"), Some("alice"));
        assert_eq!(next_in_order(&players, "zed"), None);
    }
}
