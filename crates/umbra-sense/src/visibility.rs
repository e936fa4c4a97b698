//! Generation-stamped field of view.
//!
//! Each refresh advances the map's current [`Generation`] and stamps every
//! cell reached by a ray from the observer. Nothing is ever cleared: a
//! cell whose stamp lags behind the current generation was seen before
//! and is now only remembered.

use umbra_core::{Generation, Position};
use umbra_space::line::plot_line_into;
use umbra_space::{Extent, Grid, SpaceError};

/// What the player knows about a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Never seen.
    Unseen,
    /// In view right now.
    Visible,
    /// Seen before, not in view now.
    Seen,
}

/// Per-cell last-seen generations for one level.
///
/// A stamp is either [`Generation::NEVER`], the current generation
/// (visible now) or an earlier one (remembered).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityMap {
    extent: Extent,
    stamps: Vec<Generation>,
    current: Generation,
}

impl VisibilityMap {
    /// A map in which nothing has been seen.
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            stamps: vec![Generation::NEVER; extent.cell_count()],
            current: Generation::NEVER,
        }
    }

    /// Shape of the map.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Generation stamped by the most recent refresh.
    pub fn current_generation(&self) -> Generation {
        self.current
    }

    /// Classify the cell at `pos`.
    pub fn visibility_at(&self, pos: Position) -> Result<Visibility, SpaceError> {
        let stamp = self.stamps[self.extent.index(pos)?];
        Ok(if stamp == Generation::NEVER {
            Visibility::Unseen
        } else if stamp == self.current {
            Visibility::Visible
        } else {
            Visibility::Seen
        })
    }

    /// Whether `pos` is in view now. `false` out of bounds.
    pub fn is_visible(&self, pos: Position) -> bool {
        matches!(self.visibility_at(pos), Ok(Visibility::Visible))
    }

    /// Generation in which `pos` was last in view, if ever.
    pub fn last_seen(&self, pos: Position) -> Option<Generation> {
        let stamp = self.stamps[self.extent.index(pos).ok()?];
        (stamp != Generation::NEVER).then_some(stamp)
    }

    /// Every cell in view now, in row-major order.
    pub fn visible_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let current = self.current;
        let extent = self.extent;
        self.stamps
            .iter()
            .enumerate()
            .filter(move |(_, s)| current != Generation::NEVER && **s == current)
            .map(move |(i, _)| extent.position(i))
    }
}

/// Refresh `map` for an observer standing at `observer`.
///
/// Rays are cast from the observer to every cell of the square
/// `observer ± (radius + overscan)` (clamped to the grid) that is not
/// already stamped this generation. Each ray stamps the cells it crosses
/// that lie within `radius` (Chebyshev) of the observer, up to and
/// including the first cell that blocks sight. Overscan targets stamp
/// nothing themselves but give cells near the rim a second chance along
/// a different raster.
///
/// An observer outside the grid leaves the map untouched.
pub fn update_vision(
    map: &mut VisibilityMap,
    grid: &Grid,
    observer: Position,
    radius: u32,
    overscan: u32,
) -> Result<(), SpaceError> {
    debug_assert_eq!(map.extent, grid.extent(), "visibility map shape differs from grid");
    map.extent.index(observer)?;

    map.current = map.current.next();
    let generation = map.current;
    let radius = i32::try_from(radius).unwrap_or(i32::MAX);
    let reach = radius.saturating_add(i32::try_from(overscan).unwrap_or(i32::MAX));

    let mut ray = Vec::new();
    let mut stamped = 0usize;
    let extent = map.extent;
    for target in extent.square_around(observer, reach) {
        let Ok(target_i) = extent.index(target) else {
            continue;
        };
        if map.stamps[target_i] == generation {
            continue;
        }
        plot_line_into(observer, target, &mut ray);
        for &cell in &ray {
            // Lines stay inside the bounding box of their endpoints, so
            // every cell here is in bounds.
            let Ok(i) = extent.index(cell) else {
                break;
            };
            if cell.chebyshev(observer) <= radius && map.stamps[i] != generation {
                map.stamps[i] = generation;
                stamped += 1;
            }
            if grid.blocks_sight(cell) {
                break;
            }
        }
    }
    log::trace!("vision from {observer}: generation {generation}, {stamped} cells in view");
    Ok(())
}
