//! Faction assignment.
//!
//! Shuffles the roster uniformly and hands the first `spies` names the spy
//! role, so every partition with the right counts is equally likely.

use std::collections::HashMap;

use super::balance::FactionSplit;
use super::player::Faction;
use super::rng::{shuffle, RandomSource};

/// Partition `names` into factions according to `split`.
///
/// `split.total()` must equal `names.len()`; the balance table guarantees it.
pub fn assign_factions<'a>(
    names: &[&'a str],
    split: FactionSplit,
    rng: &mut impl RandomSource,
) -> HashMap<&'a str, Faction> {
    debug_assert_eq!(split.total(), names.len());

    let mut order: Vec<&'a str> = names.to_vec();
    shuffle(rng, &mut order);

    order
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let faction = if i < split.spies {
                Faction::Spy
            } else {
                Faction::Resistance
            };
            (name, faction)
        })
        .collect()
}

/// Pick a player index uniformly.
pub fn pick_leader(player_count: usize, rng: &mut impl RandomSource) -> usize {
    rng.next_choice(player_count)
}
