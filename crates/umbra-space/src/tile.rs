//! Terrain kinds and per-cell tile records.

use umbra_core::{ActorId, ItemId};

/// Terrain of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Solid rock. Blocks movement and sight.
    #[default]
    Wall,
    /// Open ground.
    Floor,
    /// Stair leading to the level above.
    UpStair,
    /// Stair leading to the level below.
    DownStair,
}

impl TileKind {
    /// Whether an actor may stand here.
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    /// Whether this cell stops a line of sight (after being seen itself).
    pub fn blocks_sight(self) -> bool {
        matches!(self, TileKind::Wall)
    }

    /// Whether this is either stair kind.
    pub fn is_stair(self) -> bool {
        matches!(self, TileKind::UpStair | TileKind::DownStair)
    }
}

/// One cell of a level grid.
///
/// The occupant is a weak reference: the grid records who stands here
/// but the actor itself is owned by the world's registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    /// Terrain.
    pub kind: TileKind,
    /// Actor standing on the tile, if any. At most one.
    pub occupant: Option<ActorId>,
    /// Item lying on the tile, if any.
    pub item: Option<ItemId>,
}

impl Tile {
    /// An empty tile of the given kind.
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            occupant: None,
            item: None,
        }
    }

    /// Walkable and nobody standing on it.
    pub fn is_free(&self) -> bool {
        self.kind.is_walkable() && self.occupant.is_none()
    }
}
