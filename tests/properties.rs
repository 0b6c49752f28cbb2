//! Property-based tests for the rule engine.
//!
//! Random rosters, seeds and vote sequences are played through the public
//! operations while checking the state invariants after every step.

use proptest::prelude::*;
use resistance_state::{
    balance, join, pick_team, start, vote, ErrorKind, Faction, GameRng, GameState, Phase, Vote,
    MISSION_COUNT, SUPPORTED_PLAYER_COUNTS,
};

// =============================================================================
// Helpers
// =============================================================================

fn roster(count: usize) -> GameState {
    (0..count).fold(GameState::new(), |state, i| {
        join(&state, &format!("player{}", i)).unwrap()
    })
}

fn arb_supported_count() -> impl Strategy<Value = usize> {
    prop::sample::select(SUPPORTED_PLAYER_COUNTS.to_vec())
}

fn arb_vote() -> impl Strategy<Value = Vote> {
    prop_oneof![Just(Vote::Pass), Just(Vote::Fail)]
}

/// Invariants that hold in every reachable state.
fn check_invariants(state: &GameState) {
    let score = state.score();
    assert!(score.resistance_wins <= 3 && score.spy_wins <= 3);
    assert_eq!(
        score.missions_played() as usize,
        state.history().len(),
        "every resolved mission scores exactly once"
    );

    match state.phase() {
        Phase::Inactive => {
            assert!(state.missions().is_empty());
            assert!(state.leader().is_none());
        }
        Phase::PickTeam | Phase::Voting | Phase::GameOver => {
            assert_eq!(state.missions().len() + state.history().len(), MISSION_COUNT);

            let split = balance::faction_split(state.player_count()).unwrap();
            let spies = state.players().values().filter(|p| p.is_spy()).count();
            assert_eq!(spies, split.spies);
            assert!(state.players().values().all(|p| p.faction.is_some()));

            let leader = state.leader().unwrap();
            assert!(state.has_player(leader));
        }
    }

    if state.phase() == Phase::Voting {
        let expected = state.current_mission().unwrap().team_size;
        assert_eq!(state.current_team().len(), expected);
        let on_team = state.players().values().filter(|p| p.on_team).count();
        assert_eq!(on_team, expected);
    } else {
        assert!(state.current_team().is_empty());
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn join_adds_exactly_one(count in 0usize..10) {
        let state = roster(count);
        let next = join(&state, "newcomer").unwrap();
        prop_assert_eq!(next.player_count(), count + 1);
        prop_assert_eq!(next.phase(), Phase::Inactive);

        let err = join(&next, "newcomer").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::AlreadyJoined);
    }

    #[test]
    fn unsupported_counts_never_start(count in 0usize..=10, seed in any::<u64>()) {
        prop_assume!(!SUPPORTED_PLAYER_COUNTS.contains(&count));
        let state = roster(count);
        let err = start(&state, &mut GameRng::new(seed)).unwrap_err();
        if state.player_count() < 2 {
            prop_assert_eq!(err.kind(), ErrorKind::NotEnoughPlayers);
        } else {
            prop_assert_eq!(err.kind(), ErrorKind::UnsupportedPlayerCount);
        }
    }

    #[test]
    fn start_matches_balance_table(count in arb_supported_count(), seed in any::<u64>()) {
        let state = start(&roster(count), &mut GameRng::new(seed)).unwrap();
        check_invariants(&state);

        let split = balance::faction_split(count).unwrap();
        let resistance = state
            .players()
            .values()
            .filter(|p| p.faction == Some(Faction::Resistance))
            .count();
        prop_assert_eq!(resistance, split.resistance);
        let specs = balance::mission_specs(count).unwrap();
        prop_assert_eq!(state.missions(), specs.as_slice());
    }

    #[test]
    fn same_seed_same_deal(count in arb_supported_count(), seed in any::<u64>()) {
        let a = start(&roster(count), &mut GameRng::new(seed)).unwrap();
        let b = start(&roster(count), &mut GameRng::new(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Play whole matches with random teams and votes.
    #[test]
    fn random_matches_keep_invariants(
        count in arb_supported_count(),
        seed in any::<u64>(),
        votes in prop::collection::vec(arb_vote(), 60),
        offsets in prop::collection::vec(0usize..10, 10),
    ) {
        let mut state = start(&roster(count), &mut GameRng::new(seed)).unwrap();
        let names: Vec<String> = state.player_names().map(str::to_string).collect();
        let mut votes = votes.into_iter().cycle();
        let mut offsets = offsets.into_iter().cycle();
        let mut rounds = 0;

        while state.phase() != Phase::GameOver {
            rounds += 1;
            prop_assert!(rounds <= MISSION_COUNT, "match must end within five missions");

            let leader = state.leader().unwrap().to_string();
            let mission = *state.current_mission().unwrap();
            let rotated_from = state.player_names().position(|n| n == leader).unwrap();

            // A rejected command leaves the state untouched.
            let non_leader = &names[(rotated_from + 1) % names.len()];
            let before = state.clone();
            let err = pick_team(&state, non_leader, &names[..mission.team_size]).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::NotLeader);
            prop_assert_eq!(&state, &before);

            let offset = offsets.next().unwrap_or(0);
            let team: Vec<&str> = (0..mission.team_size)
                .map(|i| names[(offset + i) % names.len()].as_str())
                .collect();
            state = pick_team(&state, &leader, &team).unwrap();
            check_invariants(&state);

            let mut fails = 0;
            for member in &team {
                let choice = votes.next().unwrap_or(Vote::Pass);
                if choice == Vote::Fail {
                    fails += 1;
                }
                state = vote(&state, member, choice).unwrap();
                check_invariants(&state);

                if state.phase() == Phase::Voting {
                    let err = vote(&state, member, choice).unwrap_err();
                    prop_assert_eq!(err.kind(), ErrorKind::AlreadyVoted);
                }
            }

            let record = state.history().last().unwrap();
            prop_assert_eq!(record.fail_count, fails);
            prop_assert_eq!(record.spec.outcome(fails), record.result());
            prop_assert_eq!(record.leader.as_str(), leader.as_str());

            if state.phase() == Phase::PickTeam {
                let expected = &names[(rotated_from + 1) % names.len()];
                prop_assert_eq!(state.leader(), Some(expected.as_str()));
            } else {
                prop_assert_eq!(state.leader(), Some(leader.as_str()));
            }
        }

        let score = state.score();
        prop_assert!(score.resistance_wins == 3 || score.spy_wins == 3);
        let winner = state.winner().unwrap();
        match winner {
            Faction::Resistance => {
                prop_assert_eq!(score.resistance_wins, 3);
            }
            Faction::Spy => {
                prop_assert_eq!(score.spy_wins, 3);
            }
        }
    }
}
