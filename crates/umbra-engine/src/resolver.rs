//! Movement and melee resolution.
//!
//! The resolver classifies requests against world state and applies
//! damage. It never removes actors or raises events; the world reacts to
//! its outcomes.

use indexmap::IndexMap;
use umbra_core::{ActorId, Position};
use umbra_space::{Grid, SpaceError};

use crate::actor::Actor;
use crate::config::CombatConfig;

/// Classification of a one-cell move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Out of bounds, a wall, or a friendly actor in the way.
    Invalid,
    /// The cell is walkable and empty.
    Success,
    /// A hostile actor stands there.
    WouldAttackOccupant(ActorId),
}

/// Classify `mover` stepping onto `target`.
pub fn try_move(
    mover: &Actor,
    target: Position,
    grid: &Grid,
    actors: &IndexMap<ActorId, Actor>,
) -> MoveOutcome {
    let Ok(tile) = grid.tile_at(target) else {
        return MoveOutcome::Invalid;
    };
    if !tile.kind.is_walkable() {
        return MoveOutcome::Invalid;
    }
    let Some(occupant) = tile.occupant else {
        return MoveOutcome::Success;
    };
    match actors.get(&occupant) {
        Some(other) if other.id() != mover.id() && mover.is_hostile_to(other) => {
            MoveOutcome::WouldAttackOccupant(occupant)
        }
        Some(_) => MoveOutcome::Invalid,
        None => {
            log::warn!("tile {target} names unregistered occupant {occupant}");
            MoveOutcome::Invalid
        }
    }
}

/// Move `actor` to `target` on `grid`, updating both.
///
/// The target must already be classified [`MoveOutcome::Success`].
pub fn commit_move(actor: &mut Actor, target: Position, grid: &mut Grid) -> Result<(), SpaceError> {
    grid.move_occupant(actor.pos(), target)?;
    actor.set_location(actor.level_id(), target);
    Ok(())
}

/// Result of one melee blow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Health removed.
    pub damage: i32,
    /// Defender health before the blow.
    pub old_health: i32,
    /// Defender health after the blow.
    pub new_health: i32,
    /// Whether this blow brought the defender to zero.
    pub killed: bool,
}

/// Strike `defender` with `attacker`'s melee attack.
///
/// Damage is `base_damage + damage_per_level * attacker.level()` with no
/// randomness. Health floors at zero.
pub fn resolve_attack(
    attacker: &Actor,
    defender: &mut Actor,
    combat: &CombatConfig,
) -> AttackOutcome {
    let damage = combat.damage_for(attacker.level());
    let old_health = defender.health().current();
    let new_health = defender.health_mut().drain(damage);
    AttackOutcome {
        damage,
        old_health,
        new_health,
        killed: old_health > 0 && new_health == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorKind, ActorTemplate};
    use proptest::prelude::*;
    use umbra_core::{LevelId, Team};
    use umbra_space::TileKind;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn spawn(
        actors: &mut IndexMap<ActorId, Actor>,
        grid: &mut Grid,
        id: u32,
        team: Team,
        pos: Position,
    ) -> ActorId {
        let id = ActorId(id);
        let kind = if team == Team::Player {
            ActorKind::Player
        } else {
            ActorKind::idle_monster()
        };
        let actor = Actor::new(id, kind, team, LevelId(0), pos, &ActorTemplate::new("a", 10), 200);
        grid.place_occupant(pos, id).unwrap();
        actors.insert(id, actor);
        id
    }

    fn arena() -> (Grid, IndexMap<ActorId, Actor>) {
        let mut grid = Grid::new(5, 5, TileKind::Floor).unwrap();
        grid.set_kind(p(0, 0), TileKind::Wall).unwrap();
        (grid, IndexMap::new())
    }

    #[test]
    fn move_classification() {
        let (mut grid, mut actors) = arena();
        let hero = spawn(&mut actors, &mut grid, 0, Team::Player, p(1, 1));
        let orc = spawn(&mut actors, &mut grid, 1, Team::Monster, p(2, 1));
        let rat = spawn(&mut actors, &mut grid, 2, Team::Monster, p(2, 2));
        let me = &actors[&hero];

        assert_eq!(try_move(me, p(0, 0), &grid, &actors), MoveOutcome::Invalid);
        assert_eq!(try_move(me, p(-1, 1), &grid, &actors), MoveOutcome::Invalid);
        assert_eq!(try_move(me, p(1, 2), &grid, &actors), MoveOutcome::Success);
        assert_eq!(
            try_move(me, p(2, 1), &grid, &actors),
            MoveOutcome::WouldAttackOccupant(orc)
        );
        assert_eq!(
            try_move(&actors[&orc], p(2, 2), &grid, &actors),
            MoveOutcome::Invalid,
            "same team blocks"
        );
        assert_eq!(
            try_move(&actors[&rat], p(1, 1), &grid, &actors),
            MoveOutcome::WouldAttackOccupant(hero)
        );
    }

    #[test]
    fn stale_occupant_is_invalid() {
        let (mut grid, mut actors) = arena();
        let hero = spawn(&mut actors, &mut grid, 0, Team::Player, p(1, 1));
        grid.place_occupant(p(3, 3), ActorId(99)).unwrap();
        assert_eq!(try_move(&actors[&hero], p(3, 3), &grid, &actors), MoveOutcome::Invalid);
    }

    #[test]
    fn commit_updates_grid_and_actor() {
        let (mut grid, mut actors) = arena();
        let hero = spawn(&mut actors, &mut grid, 0, Team::Player, p(1, 1));
        let actor = actors.get_mut(&hero).unwrap();
        commit_move(actor, p(2, 2), &mut grid).unwrap();
        assert_eq!(actor.pos(), p(2, 2));
        assert_eq!(grid.occupant_at(p(2, 2)), Some(hero));
        assert_eq!(grid.occupant_at(p(1, 1)), None);
    }

    #[test]
    fn attack_kills_exactly_once() {
        let (mut grid, mut actors) = arena();
        let a = spawn(&mut actors, &mut grid, 0, Team::Player, p(1, 1));
        let d = spawn(&mut actors, &mut grid, 1, Team::Monster, p(2, 1));
        let combat = CombatConfig {
            base_damage: 4,
            damage_per_level: 0,
            player_bump_attacks: true,
        };
        let attacker = actors[&a].clone();
        let defender = actors.get_mut(&d).unwrap();

        let first = resolve_attack(&attacker, defender, &combat);
        assert_eq!((first.old_health, first.new_health, first.killed), (10, 6, false));
        resolve_attack(&attacker, defender, &combat);
        let third = resolve_attack(&attacker, defender, &combat);
        assert_eq!((third.new_health, third.killed), (0, true));
        let fourth = resolve_attack(&attacker, defender, &combat);
        assert_eq!((fourth.new_health, fourth.killed), (0, false));
    }

    proptest! {
        #[test]
        fn attack_is_deterministic(
            level in 0u32..20,
            base in 0i32..10,
            per in 0i32..5,
            hp in 1i32..100
        ) {
            let combat = CombatConfig {
                base_damage: base,
                damage_per_level: per,
                player_bump_attacks: true,
            };
            let template = ActorTemplate::new("x", hp).with_level(level);
            let (hero, monster) = (ActorKind::Player, ActorKind::idle_monster());
            let attacker =
                Actor::new(ActorId(0), hero, Team::Player, LevelId(0), p(0, 0), &template, 100);
            let mut d1 =
                Actor::new(ActorId(1), monster, Team::Monster, LevelId(0), p(1, 0), &template, 100);
            let mut d2 = d1.clone();

            let o1 = resolve_attack(&attacker, &mut d1, &combat);
            let o2 = resolve_attack(&attacker, &mut d2, &combat);
            prop_assert_eq!(o1, o2);
            prop_assert_eq!(o1.damage, base + per * level as i32);
            prop_assert_eq!(o1.new_health, (hp - o1.damage).max(0));
            prop_assert_eq!(o1.killed, o1.new_health == 0);
        }
    }
}
