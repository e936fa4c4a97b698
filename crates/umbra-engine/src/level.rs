//! A dungeon floor: terrain plus the player's perception layers.

use std::error::Error;
use std::fmt;

use umbra_core::{LevelId, Position, TurnNumber};
use umbra_sense::{update_vision, ScentField, VisibilityMap};
use umbra_space::{Grid, SpaceError, TileKind};

use crate::config::{ScentConfig, VisionConfig};

/// Which way a stair leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StairDirection {
    /// To the level above.
    Up,
    /// To the level below.
    Down,
}

impl StairDirection {
    /// Tile kind a stair of this direction stands on.
    pub fn tile_kind(self) -> TileKind {
        match self {
            StairDirection::Up => TileKind::UpStair,
            StairDirection::Down => TileKind::DownStair,
        }
    }
}

/// A connection from a cell on one level to a cell on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stair {
    /// Cell on this level.
    pub pos: Position,
    /// Up or down.
    pub direction: StairDirection,
    /// Level the stair leads to.
    pub destination: LevelId,
    /// Arrival cell on the destination level.
    pub arrival: Position,
}

/// Errors building levels or registering them with a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// A stair position lies outside the grid.
    Space(SpaceError),
    /// A stair sits on a tile of the wrong kind.
    StairMismatch {
        /// Stair position.
        pos: Position,
        /// Kind the stair needs.
        expected: TileKind,
        /// Kind actually there.
        found: TileKind,
    },
    /// Two stairs share a cell.
    DuplicateStair {
        /// The shared cell.
        pos: Position,
    },
    /// A level with this id is already registered.
    DuplicateLevel(LevelId),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::StairMismatch {
                pos,
                expected,
                found,
            } => write!(f, "stair at {pos} needs {expected:?}, found {found:?}"),
            Self::DuplicateStair { pos } => write!(f, "two stairs at {pos}"),
            Self::DuplicateLevel(id) => write!(f, "level {id} already registered"),
        }
    }
}

impl Error for LevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for LevelError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

/// One floor of the dungeon.
///
/// The visibility map and scent field always share the grid's extent.
#[derive(Clone, Debug)]
pub struct Level {
    id: LevelId,
    grid: Grid,
    visibility: VisibilityMap,
    scent: ScentField,
    stairs: Vec<Stair>,
}

impl Level {
    /// Wrap a finished grid, checking every stair stands on a matching
    /// stair tile and no two stairs share a cell.
    pub fn new(
        id: LevelId,
        grid: Grid,
        scent: &ScentConfig,
        stairs: Vec<Stair>,
    ) -> Result<Self, LevelError> {
        for (i, stair) in stairs.iter().enumerate() {
            let found = grid.kind_at(stair.pos)?;
            let expected = stair.direction.tile_kind();
            if found != expected {
                return Err(LevelError::StairMismatch {
                    pos: stair.pos,
                    expected,
                    found,
                });
            }
            if stairs[..i].iter().any(|s| s.pos == stair.pos) {
                return Err(LevelError::DuplicateStair { pos: stair.pos });
            }
        }
        let extent = grid.extent();
        Ok(Self {
            id,
            visibility: VisibilityMap::new(extent),
            scent: ScentField::new(extent, scent.turn_scale, scent.lifetime),
            grid,
            stairs,
        })
    }

    /// Level id.
    pub fn id(&self) -> LevelId {
        self.id
    }

    /// Terrain, occupancy and items.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The player's view of this level.
    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    /// The player's scent trail on this level.
    pub fn scent(&self) -> &ScentField {
        &self.scent
    }

    /// All stairs on this level.
    pub fn stairs(&self) -> &[Stair] {
        &self.stairs
    }

    /// The stair at `pos`, if any.
    pub fn stair_at(&self, pos: Position) -> Option<&Stair> {
        self.stairs.iter().find(|s| s.pos == pos)
    }

    /// Recompute the player's view from `observer` and lay this turn's
    /// scent on everything in view.
    pub fn observe(
        &mut self,
        turn: TurnNumber,
        observer: Position,
        vision: &VisionConfig,
    ) -> Result<(), SpaceError> {
        update_vision(
            &mut self.visibility,
            &self.grid,
            observer,
            vision.radius,
            vision.overscan,
        )?;
        self.scent.deposit_visible(turn, observer, &self.visibility);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_sense::Visibility;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn down_stair(pos: Position) -> Stair {
        Stair {
            pos,
            direction: StairDirection::Down,
            destination: LevelId(1),
            arrival: p(1, 1),
        }
    }

    #[test]
    fn stairs_must_stand_on_stair_tiles() {
        let mut grid = Grid::new(5, 5, TileKind::Floor).unwrap();
        grid.set_kind(p(2, 2), TileKind::DownStair).unwrap();
        let cfg = ScentConfig::default();

        let level = Level::new(LevelId(0), grid.clone(), &cfg, vec![down_stair(p(2, 2))]).unwrap();
        assert_eq!(level.stair_at(p(2, 2)).map(|s| s.destination), Some(LevelId(1)));
        assert!(level.stair_at(p(1, 1)).is_none());

        let err =
            Level::new(LevelId(0), grid.clone(), &cfg, vec![down_stair(p(1, 2))]).unwrap_err();
        assert!(matches!(err, LevelError::StairMismatch { found: TileKind::Floor, .. }));

        let err =
            Level::new(LevelId(0), grid.clone(), &cfg, vec![down_stair(p(9, 9))]).unwrap_err();
        assert!(matches!(err, LevelError::Space(SpaceError::OutOfBounds { .. })));

        let err = Level::new(
            LevelId(0),
            grid,
            &cfg,
            vec![down_stair(p(2, 2)), down_stair(p(2, 2))],
        )
        .unwrap_err();
        assert_eq!(err, LevelError::DuplicateStair { pos: p(2, 2) });
    }

    #[test]
    fn observe_refreshes_view_and_scent() {
        let grid = Grid::new(9, 9, TileKind::Floor).unwrap();
        let mut level = Level::new(LevelId(0), grid, &ScentConfig::default(), Vec::new()).unwrap();
        let vision = VisionConfig {
            radius: 2,
            overscan: 1,
        };

        level.observe(TurnNumber(4), p(4, 4), &vision).unwrap();

        assert_eq!(level.visibility().visibility_at(p(6, 6)), Ok(Visibility::Visible));
        assert_eq!(level.visibility().visibility_at(p(7, 4)), Ok(Visibility::Unseen));
        assert_eq!(level.scent().scent_at(p(4, 4)), Ok(400.0));
        assert_eq!(level.scent().scent_at(p(7, 4)), Ok(0.0));
    }
}
