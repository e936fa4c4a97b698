//! Benchmark maps and worlds for the Umbra roguelike core.
//!
//! - [`pillar_grid`]: a walled room scattered with sight-blocking pillars
//! - [`crowded_world`]: a pillar room with a player and many monsters
//! - [`line_pairs`]: deterministic endpoint pairs for line plotting

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use umbra_core::{LevelId, Position};
use umbra_engine::{ActorTemplate, Level, World, WorldConfig};
use umbra_space::{Grid, TileKind};

/// A `width` x `height` room with a wall border and roughly `density` of
/// the interior turned into pillars. The centre cell is always floor.
pub fn pillar_grid(width: u32, height: u32, density: f64, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::new(width, height, TileKind::Wall).unwrap();
    for pos in grid.extent().positions().collect::<Vec<_>>() {
        let border = pos.x == 0
            || pos.y == 0
            || pos.x == width as i32 - 1
            || pos.y == height as i32 - 1;
        let kind = if border || rng.random_bool(density) {
            TileKind::Wall
        } else {
            TileKind::Floor
        };
        grid.set_kind(pos, kind).unwrap();
    }
    grid.set_kind(centre(width, height), TileKind::Floor).unwrap();
    grid
}

/// Centre cell of a `width` x `height` grid.
pub fn centre(width: u32, height: u32) -> Position {
    Position::new(width as i32 / 2, height as i32 / 2)
}

/// A pillar room with the player at the centre and up to `monsters`
/// goblins on random free floor cells.
pub fn crowded_world(width: u32, height: u32, monsters: usize, seed: u64) -> World {
    let config = WorldConfig {
        seed,
        ..WorldConfig::default()
    };
    let grid = pillar_grid(width, height, 0.1, seed);
    let level = Level::new(LevelId(0), grid, &config.scent, Vec::new()).unwrap();
    let mut world = World::new(config, level).unwrap();
    world
        .spawn_player(LevelId(0), centre(width, height), &ActorTemplate::new("hero", 1_000))
        .unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
    let goblin = ActorTemplate::new("goblin", 6);
    let mut placed = 0;
    let mut attempts = 0;
    while placed < monsters && attempts < monsters * 20 {
        attempts += 1;
        let pos = Position::new(
            rng.random_range(1..width as i32 - 1),
            rng.random_range(1..height as i32 - 1),
        );
        if world.spawn_monster(LevelId(0), pos, &goblin).is_ok() {
            placed += 1;
        }
    }
    world
}

/// `n` deterministic endpoint pairs inside a `width` x `height` grid.
pub fn line_pairs(width: u32, height: u32, n: usize, seed: u64) -> Vec<(Position, Position)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut point = || {
        Position::new(
            rng.random_range(0..width as i32),
            rng.random_range(0..height as i32),
        )
    };
    (0..n).map(|_| (point(), point())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillar_grid_keeps_border_and_centre() {
        let grid = pillar_grid(20, 10, 0.5, 3);
        assert!(!grid.is_walkable(Position::new(0, 5)));
        assert!(!grid.is_walkable(Position::new(19, 9)));
        assert!(grid.is_walkable(centre(20, 10)));
    }

    #[test]
    fn crowded_world_is_deterministic() {
        let a = crowded_world(30, 20, 12, 9);
        let b = crowded_world(30, 20, 12, 9);
        let positions = |w: &World| w.actors().map(|a| a.pos()).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
        assert!(a.actors().count() > 1);
        assert!(a.player().is_some());
    }

    #[test]
    fn line_pairs_stay_in_bounds() {
        for (a, b) in line_pairs(16, 8, 100, 1) {
            assert!((0..16).contains(&a.x) && (0..8).contains(&b.y));
        }
    }
}
