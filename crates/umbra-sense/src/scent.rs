//! Monotone scent trail left by the player.
//!
//! Every world turn the player's visible cells receive
//! `turn * turn_scale - distance`, so each turn owns a band of values
//! above all earlier turns and, within a band, cells nearer the player
//! score higher. Values are never decremented; age is recovered by
//! comparing a value against the current turn's band. A pursuer that
//! climbs the gradient therefore follows the trail towards where the
//! player was seen most recently, even without line of sight.

use smallvec::SmallVec;
use umbra_core::{Direction, Position, TurnNumber};
use umbra_space::{Extent, SpaceError};

use crate::visibility::VisibilityMap;

/// A neighbouring cell and how strongly it smells of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScentCandidate {
    /// The cell.
    pub pos: Position,
    /// Scent strength; zero if never marked or expired.
    pub strength: f64,
}

/// Per-cell scent values for one level.
#[derive(Clone, Debug, PartialEq)]
pub struct ScentField {
    extent: Extent,
    values: Vec<f64>,
    turn_scale: f64,
    lifetime: Option<u32>,
}

impl ScentField {
    /// An unmarked field.
    ///
    /// `turn_scale` must exceed any deposit distance so bands of
    /// successive turns cannot overlap. `lifetime` (in turns) bounds how
    /// long a trail stays detectable; `None` keeps trails forever.
    pub fn new(extent: Extent, turn_scale: f64, lifetime: Option<u32>) -> Self {
        Self {
            extent,
            values: vec![0.0; extent.cell_count()],
            turn_scale,
            lifetime,
        }
    }

    /// Shape of the field.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Width of one turn's value band.
    pub fn turn_scale(&self) -> f64 {
        self.turn_scale
    }

    /// Raw stored value at `pos`.
    pub fn scent_at(&self, pos: Position) -> Result<f64, SpaceError> {
        Ok(self.values[self.extent.index(pos)?])
    }

    /// Mark `pos` for `turn` at `distance` from the player.
    ///
    /// The stored value only ever grows. Fresh marks are floored just
    /// above zero so a marked cell always outranks an unmarked one.
    pub fn deposit(
        &mut self,
        turn: TurnNumber,
        pos: Position,
        distance: f64,
    ) -> Result<(), SpaceError> {
        let i = self.extent.index(pos)?;
        let fresh = (turn.0 as f64 * self.turn_scale - distance.max(0.0)).max(f64::MIN_POSITIVE);
        if fresh > self.values[i] {
            self.values[i] = fresh;
        }
        Ok(())
    }

    /// Mark every cell currently visible in `vision`, keyed by its
    /// Euclidean distance from `observer`. Returns the number of cells
    /// marked.
    pub fn deposit_visible(
        &mut self,
        turn: TurnNumber,
        observer: Position,
        vision: &VisibilityMap,
    ) -> usize {
        debug_assert_eq!(self.extent, vision.extent(), "scent field shape differs from vision");
        let mut marked = 0;
        for cell in vision.visible_cells() {
            if self.deposit(turn, cell, observer.euclidean(cell)).is_ok() {
                marked += 1;
            }
        }
        log::trace!("turn {turn}: scent laid on {marked} cells around {observer}");
        marked
    }

    /// Turns elapsed since `pos` was marked, as of `turn`. The fractional
    /// part encodes the distance at which it was marked. `None` if the
    /// cell was never marked or is out of bounds.
    pub fn age(&self, turn: TurnNumber, pos: Position) -> Option<f64> {
        let value = self.scent_at(pos).ok()?;
        (value > 0.0).then(|| (turn.0 as f64 * self.turn_scale - value) / self.turn_scale)
    }

    /// Usable scent at `pos` as of `turn`: the stored value, or zero if
    /// unmarked, out of bounds, or older than the lifetime.
    pub fn strength(&self, turn: TurnNumber, pos: Position) -> f64 {
        let Ok(value) = self.scent_at(pos) else {
            return 0.0;
        };
        match (self.lifetime, self.age(turn, pos)) {
            (Some(lifetime), Some(age)) if age > f64::from(lifetime) => 0.0,
            _ => value,
        }
    }

    /// The in-bounds 8-neighbours of `pos`, strongest first.
    ///
    /// Ties keep [`Direction::ALL`] order. Choosing among equally strong
    /// candidates is left to the caller.
    pub fn track(&self, turn: TurnNumber, pos: Position) -> SmallVec<[ScentCandidate; 8]> {
        let mut out: SmallVec<[ScentCandidate; 8]> = Direction::ALL
            .into_iter()
            .map(|d| pos.step(d))
            .filter(|p| self.extent.contains(*p))
            .map(|p| ScentCandidate {
                pos: p,
                strength: self.strength(turn, p),
            })
            .collect();
        out.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        out
    }

    /// Every in-bounds cell within `reach` (Chebyshev) of `pos`, except
    /// `pos` itself, strongest first. Ties keep row-major order.
    pub fn track_within(&self, turn: TurnNumber, pos: Position, reach: u32) -> Vec<ScentCandidate> {
        let reach = i32::try_from(reach).unwrap_or(i32::MAX);
        let mut out: Vec<ScentCandidate> = self
            .extent
            .square_around(pos, reach)
            .filter(|p| *p != pos)
            .map(|p| ScentCandidate {
                pos: p,
                strength: self.strength(turn, p),
            })
            .collect();
        out.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::update_vision;
    use proptest::prelude::*;
    use umbra_space::{Grid, TileKind};

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn field(w: u32, h: u32) -> ScentField {
        ScentField::new(Extent::new(w, h).unwrap(), 100.0, Some(20))
    }

    #[test]
    fn deposit_encodes_turn_band_and_distance() {
        let mut f = field(5, 5);
        f.deposit(TurnNumber(3), p(1, 1), 2.5).unwrap();
        assert_eq!(f.scent_at(p(1, 1)), Ok(297.5));
        assert!(f.deposit(TurnNumber(3), p(5, 1), 0.0).is_err());
    }

    #[test]
    fn values_never_decrease() {
        let mut f = field(3, 3);
        f.deposit(TurnNumber(5), p(0, 0), 1.0).unwrap();
        f.deposit(TurnNumber(2), p(0, 0), 0.0).unwrap();
        assert_eq!(f.scent_at(p(0, 0)), Ok(499.0));
    }

    #[test]
    fn far_deposit_still_outranks_unmarked() {
        let mut f = field(3, 3);
        f.deposit(TurnNumber(1), p(0, 0), 1_000.0).unwrap();
        assert!(f.scent_at(p(0, 0)).unwrap() > 0.0);
        let ranked = f.track(TurnNumber(1), p(1, 1));
        assert_eq!(ranked[0].pos, p(0, 0));
    }

    #[test]
    fn unmarked_neighbours_keep_direction_order() {
        let f = field(3, 3);
        let ranked = f.track(TurnNumber(1), p(1, 1));
        let order: Vec<_> = ranked.iter().map(|c| c.pos).collect();
        let expected: Vec<_> = Direction::ALL.iter().map(|d| p(1, 1).step(*d)).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn track_skips_out_of_bounds() {
        let f = field(3, 3);
        assert_eq!(f.track(TurnNumber(1), p(0, 0)).len(), 3);
    }

    #[test]
    fn newer_trail_wins() {
        let mut f = field(5, 1);
        f.deposit(TurnNumber(1), p(0, 0), 0.0).unwrap();
        f.deposit(TurnNumber(2), p(2, 0), 3.0).unwrap();
        let ranked = f.track(TurnNumber(3), p(1, 0));
        assert_eq!(ranked[0].pos, p(2, 0));
        assert_eq!(ranked[1].pos, p(0, 0));
    }

    #[test]
    fn expired_trail_reads_as_zero() {
        let mut f = field(3, 3);
        f.deposit(TurnNumber(1), p(0, 0), 0.0).unwrap();
        assert!(f.strength(TurnNumber(21), p(0, 0)) > 0.0);
        assert_eq!(f.strength(TurnNumber(22), p(0, 0)), 0.0);
        assert_eq!(f.age(TurnNumber(22), p(0, 0)), Some(21.0));
        assert_eq!(f.age(TurnNumber(22), p(1, 1)), None);
    }

    #[test]
    fn track_within_covers_larger_neighbourhood() {
        let mut f = field(7, 7);
        f.deposit(TurnNumber(4), p(5, 5), 0.0).unwrap();
        let ranked = f.track_within(TurnNumber(4), p(3, 3), 2);
        assert_eq!(ranked.len(), 24);
        assert_eq!(ranked[0].pos, p(5, 5));
    }

    #[test]
    fn deposit_visible_marks_view_only() {
        let mut grid = Grid::new(12, 5, TileKind::Floor).unwrap();
        grid.set_kind(p(6, 2), TileKind::Wall).unwrap();
        let mut vision = VisibilityMap::new(grid.extent());
        update_vision(&mut vision, &grid, p(2, 2), 8, 1).unwrap();
        let mut f = ScentField::new(grid.extent(), 100.0, None);

        let marked = f.deposit_visible(TurnNumber(1), p(2, 2), &vision);

        assert_eq!(marked, vision.visible_cells().count());
        assert_eq!(f.scent_at(p(2, 2)), Ok(100.0));
        assert!(f.scent_at(p(3, 2)).unwrap() > f.scent_at(p(5, 2)).unwrap());
        assert_eq!(f.scent_at(p(8, 2)), Ok(0.0));
    }

    proptest! {
        #[test]
        fn track_is_non_increasing(
            deposits in proptest::collection::vec((0i32..6, 0i32..6, 1u64..30, 0.0f64..9.0), 0..20),
            x in 0i32..6,
            y in 0i32..6,
            now in 30u64..60,
        ) {
            let mut f = field(6, 6);
            for (dx, dy, turn, dist) in deposits {
                f.deposit(TurnNumber(turn), p(dx, dy), dist).unwrap();
            }
            let ranked = f.track(TurnNumber(now), p(x, y));
            prop_assert_eq!(ranked.len(), f.extent().neighbours(p(x, y)).len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].strength >= pair[1].strength);
            }
            let first_zero = ranked.iter().position(|c| c.strength == 0.0);
            if let Some(z) = first_zero {
                prop_assert!(ranked[z..].iter().all(|c| c.strength == 0.0));
            }
        }
    }
}
