//! Scheduler behaviour observed through whole worlds.

use umbra_core::{Direction, Position, TurnNumber};
use umbra_engine::{Action, Intent, RunOutcome, SchedulerConfig, SlotOutcome, WorldConfig};
use umbra_test_utils::fixtures::world_from_ascii;

const CORRIDOR: &[&str] = &[
    "######", //
    "#@g..#",
    "######",
];

#[test]
fn single_pass_grants_then_spends() {
    let mut f = world_from_ascii(CORRIDOR, WorldConfig::default());
    let goblin = f.monsters[0];
    assert_eq!(f.world.scheduler().actors(), &[f.player, goblin]);

    f.world.queue_input(Intent::Wait);
    assert_eq!(
        f.world.tick(),
        Ok(SlotOutcome::Acted {
            actor: f.player,
            action: Action::Waited
        })
    );

    assert_eq!(f.world.actor(f.player).unwrap().energy().current(), 0);
    assert_eq!(f.world.actor(goblin).unwrap().energy().current(), 100);
    assert_eq!(f.world.scheduler().action_cursor(), 1);
    assert_eq!(f.world.scheduler().current(), Some(goblin));
}

#[test]
fn non_consuming_action_keeps_energy_and_cursor() {
    let mut f = world_from_ascii(CORRIDOR, WorldConfig::default());
    assert_eq!(
        f.world.run_until_input(),
        Ok(RunOutcome::AwaitingInput(f.player))
    );
    let before = f.world.actor(f.player).unwrap().energy().current();

    f.world.queue_input(Intent::Move(Direction::North));
    let outcome = f.world.tick().unwrap();

    assert_eq!(
        outcome,
        SlotOutcome::Acted {
            actor: f.player,
            action: Action::Blocked {
                target: Position::new(1, 0)
            }
        }
    );
    assert_eq!(f.world.actor(f.player).unwrap().energy().current(), before);
    assert_eq!(f.world.scheduler().action_cursor(), 0);
    assert_eq!(f.world.tick(), Ok(SlotOutcome::AwaitingInput(f.player)));
}

#[test]
fn slow_monster_skips_until_charged() {
    let config = WorldConfig {
        scheduler: SchedulerConfig {
            energy_increment: 50,
            action_threshold: 100,
            max_energy: 100,
        },
        ..WorldConfig::default()
    };
    let mut f = world_from_ascii(CORRIDOR, config);
    let goblin = f.monsters[0];
    f.world.actor_mut(f.player).unwrap().set_energy(50);

    // Player: 50 + 50 = 100, acts. Goblin: 0 + 50, skipped.
    f.world.queue_input(Intent::Wait);
    assert!(matches!(f.world.tick(), Ok(SlotOutcome::Acted { .. })));
    assert_eq!(f.world.tick(), Ok(SlotOutcome::Skipped(goblin)));
    assert_eq!(f.world.turn(), TurnNumber(2));
    assert_eq!(f.world.actor(goblin).unwrap().energy().current(), 50);
    assert_eq!(f.world.scheduler().idle_slots(), 1);
}

#[test]
fn killed_actor_leaves_schedule_without_skipping_anyone() {
    let mut f = world_from_ascii(CORRIDOR, WorldConfig::default());
    let goblin = f.monsters[0];
    f.world.actor_mut(goblin).unwrap().set_health(1);

    f.world.queue_input(Intent::Move(Direction::East));
    let outcome = f.world.tick().unwrap();

    assert!(matches!(
        outcome,
        SlotOutcome::Acted {
            action: Action::Attacked { killed: true, .. },
            ..
        }
    ));
    assert_eq!(f.world.scheduler().actors(), &[f.player]);
    assert_eq!(f.world.turn(), TurnNumber(2));
    assert_eq!(
        f.world.run_until_input(),
        Ok(RunOutcome::AwaitingInput(f.player))
    );
}
