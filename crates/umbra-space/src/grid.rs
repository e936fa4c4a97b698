//! The tile store: terrain, occupancy and items per cell.

use umbra_core::{report_invariant, ActorId, InvariantViolation, ItemId, Position};

use crate::error::SpaceError;
use crate::extent::Extent;
use crate::tile::{Tile, TileKind};

/// A fixed-size grid of [`Tile`]s.
///
/// Built once by an external generator and never resized. Gameplay
/// mutates occupancy and items only; terrain edits exist for generators
/// and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    extent: Extent,
    tiles: Vec<Tile>,
}

impl Grid {
    /// A `width * height` grid filled with `fill`.
    pub fn new(width: u32, height: u32, fill: TileKind) -> Result<Self, SpaceError> {
        let extent = Extent::new(width, height)?;
        Ok(Self {
            extent,
            tiles: vec![Tile::new(fill); extent.cell_count()],
        })
    }

    /// Shape of the grid.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.extent.width()
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.extent.height()
    }

    /// Whether `pos` is inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        self.extent.contains(pos)
    }

    /// The tile at `pos`.
    pub fn tile_at(&self, pos: Position) -> Result<&Tile, SpaceError> {
        let i = self.extent.index(pos)?;
        Ok(&self.tiles[i])
    }

    fn tile_mut(&mut self, pos: Position) -> Result<&mut Tile, SpaceError> {
        let i = self.extent.index(pos)?;
        Ok(&mut self.tiles[i])
    }

    /// Terrain at `pos`.
    pub fn kind_at(&self, pos: Position) -> Result<TileKind, SpaceError> {
        self.tile_at(pos).map(|t| t.kind)
    }

    /// Replace the terrain at `pos`. Occupant and item are kept.
    pub fn set_kind(&mut self, pos: Position, kind: TileKind) -> Result<(), SpaceError> {
        self.tile_mut(pos)?.kind = kind;
        Ok(())
    }

    /// Set the terrain of every in-bounds cell in the rectangle spanned by
    /// `a` and `b` (inclusive, any corner order).
    pub fn fill_rect(&mut self, a: Position, b: Position, kind: TileKind) {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        for y in y0..=y1 {
            for x in x0..=x1 {
                if let Ok(tile) = self.tile_mut(Position::new(x, y)) {
                    tile.kind = kind;
                }
            }
        }
    }

    /// Whether an actor could stand at `pos`, ignoring occupancy.
    /// Out-of-bounds positions are not walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.kind_at(pos).is_ok_and(TileKind::is_walkable)
    }

    /// Whether `pos` stops a line of sight. Out-of-bounds positions do.
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.kind_at(pos).map_or(true, TileKind::blocks_sight)
    }

    /// Actor standing at `pos`, if any. `None` out of bounds.
    pub fn occupant_at(&self, pos: Position) -> Option<ActorId> {
        self.tile_at(pos).ok().and_then(|t| t.occupant)
    }

    /// Record `actor` as standing at `pos`.
    ///
    /// Fails with [`SpaceError::Occupied`] if a different actor is
    /// already there. Re-placing the same actor is a no-op.
    pub fn place_occupant(&mut self, pos: Position, actor: ActorId) -> Result<(), SpaceError> {
        let tile = self.tile_mut(pos)?;
        match tile.occupant {
            Some(by) if by != actor => Err(SpaceError::Occupied { pos, by }),
            _ => {
                tile.occupant = Some(actor);
                Ok(())
            }
        }
    }

    /// Clear the occupant at `pos`, returning who stood there.
    pub fn clear_occupant(&mut self, pos: Position) -> Result<Option<ActorId>, SpaceError> {
        Ok(self.tile_mut(pos)?.occupant.take())
    }

    /// Move whoever stands at `from` onto `to`.
    ///
    /// Callers validate the destination first; finding it occupied here
    /// is a double-occupancy invariant violation. In that case the
    /// occupant stays at `from` and `Err(SpaceError::Occupied)` is
    /// returned (release builds only; debug builds panic).
    pub fn move_occupant(&mut self, from: Position, to: Position) -> Result<ActorId, SpaceError> {
        let from_i = self.extent.index(from)?;
        let to_i = self.extent.index(to)?;
        let Some(actor) = self.tiles[from_i].occupant else {
            return Err(SpaceError::Vacant { pos: from });
        };
        if let Some(occupant) = self.tiles[to_i].occupant {
            if occupant != actor {
                report_invariant(InvariantViolation::DoubleOccupancy {
                    pos: to,
                    occupant,
                    intruder: actor,
                });
                return Err(SpaceError::Occupied { pos: to, by: occupant });
            }
        }
        self.tiles[from_i].occupant = None;
        self.tiles[to_i].occupant = Some(actor);
        Ok(actor)
    }

    /// Item lying at `pos`, if any. `None` out of bounds.
    pub fn item_at(&self, pos: Position) -> Option<ItemId> {
        self.tile_at(pos).ok().and_then(|t| t.item)
    }

    /// Put `item` at `pos`, returning any item it displaced.
    pub fn place_item(
        &mut self,
        pos: Position,
        item: ItemId,
    ) -> Result<Option<ItemId>, SpaceError> {
        Ok(self.tile_mut(pos)?.item.replace(item))
    }

    /// Remove and return the item at `pos`.
    pub fn take_item(&mut self, pos: Position) -> Result<Option<ItemId>, SpaceError> {
        Ok(self.tile_mut(pos)?.item.take())
    }

    /// All positions holding `kind`, in row-major order.
    pub fn positions_of(&self, kind: TileKind) -> impl Iterator<Item = Position> + '_ {
        let extent = self.extent;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.kind == kind)
            .map(move |(i, _)| extent.position(i))
    }
}
