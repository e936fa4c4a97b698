//! Ready-made worlds for engine tests.
//!
//! [`world_from_ascii`] turns string art into a single-level world:
//!
//! - `@` spawns the player ([`hero`]).
//! - `g` spawns a monster ([`goblin`]), in row-major order.
//! - `*` drops an item.

use umbra_core::{ActorId, ItemId, LevelId};
use umbra_engine::{ActorTemplate, Level, World, WorldConfig};

use crate::{AsciiMap, RecordingSink};

/// The default player template: 20 health, level 0.
pub fn hero() -> ActorTemplate {
    ActorTemplate::new("hero", 20)
}

/// The default monster template: 6 health, level 0.
pub fn goblin() -> ActorTemplate {
    ActorTemplate::new("goblin", 6)
}

/// A world built by [`world_from_ascii`] and the handles into it.
pub struct Fixture {
    pub world: World,
    pub player: ActorId,
    pub monsters: Vec<ActorId>,
    pub items: Vec<ItemId>,
    /// Subscribed before anything was spawned.
    pub events: RecordingSink,
}

/// Build a world on level 0 from `rows`. Panics on malformed maps.
pub fn world_from_ascii(rows: &[&str], config: WorldConfig) -> Fixture {
    let map = AsciiMap::parse(rows);
    let player_at = map.marker('@').expect("map has no '@'");
    let monster_at = map.markers('g');
    let item_at = map.markers('*');

    let level = Level::new(LevelId(0), map.grid, &config.scent, Vec::new()).expect("valid level");
    let mut world = World::new(config, level).expect("valid config");
    let events = RecordingSink::new();
    world.subscribe(Box::new(events.clone()));

    let player = world
        .spawn_player(LevelId(0), player_at, &hero())
        .expect("player spawn");
    let monsters = monster_at
        .into_iter()
        .map(|pos| {
            world
                .spawn_monster(LevelId(0), pos, &goblin())
                .expect("monster spawn")
        })
        .collect();
    let items = item_at
        .into_iter()
        .map(|pos| world.place_item(LevelId(0), pos).expect("item drop"))
        .collect();

    Fixture {
        world,
        player,
        monsters,
        items,
        events,
    }
}
