//! Replays are deterministic and random play keeps the world consistent.

use proptest::prelude::*;
use umbra_core::{Direction, GameEvent, Position};
use umbra_engine::{Intent, RunOutcome, World, WorldConfig};
use umbra_test_utils::fixtures::{world_from_ascii, Fixture};

const CAVE: &[&str] = &[
    "############",
    "#@...#.....#",
    "#.##.#..g..#",
    "#....*.....#",
    "#.g.####...#",
    "#......g...#",
    "############",
];

fn intent_from(code: u8) -> Intent {
    match code % 11 {
        0 => Intent::Wait,
        1 => Intent::PickUp,
        2 => Intent::TakeStairs,
        n => Intent::Move(Direction::ALL[usize::from(n - 3)]),
    }
}

/// Feed `script` to a fresh cave world, stopping early if the player dies.
fn play(script: &[u8], seed: u64) -> Fixture {
    let config = WorldConfig {
        seed,
        ..WorldConfig::default()
    };
    let mut f = world_from_ascii(CAVE, config);
    for code in script {
        f.world.queue_input(intent_from(*code));
        match f.world.run_until_input() {
            Ok(RunOutcome::PlayerDead) => break,
            Ok(_) => {}
            Err(e) => panic!("scheduler failed: {e}"),
        }
    }
    f
}

fn snapshot(world: &World) -> Vec<(u32, Position, i32, i32)> {
    world
        .actors()
        .map(|a| (a.id().0, a.pos(), a.health().current(), a.energy().current()))
        .collect()
}

fn check_consistency(world: &World) -> Result<(), TestCaseError> {
    let max_energy = world.config().scheduler.max_energy;
    let level = world.current_level().id();
    for actor in world.actors() {
        prop_assert_eq!(world.tile_at(actor.pos()).unwrap().occupant, Some(actor.id()));
        prop_assert!((0..=max_energy).contains(&actor.energy().current()));
        prop_assert!(actor.health().current() > 0);
        prop_assert_eq!(
            world.scheduler().contains(actor.id()),
            actor.level_id() == level
        );
    }
    let occupied = world
        .current_level()
        .grid()
        .extent()
        .positions()
        .filter(|p| world.tile_at(*p).is_ok_and(|t| t.occupant.is_some()))
        .count();
    prop_assert_eq!(occupied, world.actors().count());
    prop_assert!(world.scheduler().action_cursor() <= world.scheduler().len());
    Ok(())
}

#[test]
fn identical_seeds_replay_identically() {
    let script: Vec<u8> = (0..60).map(|i| (i * 7 + 3) as u8).collect();
    let a = play(&script, 42);
    let b = play(&script, 42);

    assert_eq!(a.events.events(), b.events.events());
    assert_eq!(snapshot(&a.world), snapshot(&b.world));
    assert_eq!(a.world.turn(), b.world.turn());
    assert!(a
        .events
        .events()
        .iter()
        .any(|e| matches!(e, GameEvent::ActorMoved { .. })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_keeps_world_consistent(script in proptest::collection::vec(any::<u8>(), 0..80)) {
        let f = play(&script, 7);
        if f.world.player().is_some() {
            check_consistency(&f.world)?;
        }
    }

    #[test]
    fn replays_match_for_any_seed(
        seed in any::<u64>(),
        script in proptest::collection::vec(any::<u8>(), 0..40)
    ) {
        let a = play(&script, seed);
        let b = play(&script, seed);
        prop_assert_eq!(a.events.events(), b.events.events());
        prop_assert_eq!(snapshot(&a.world), snapshot(&b.world));
    }
}
