//! Octant-normalised integer line plotting.
//!
//! A direction `(dx, dy)` is classified into one of eight [`Octant`]s,
//! transformed into octant zero (`a >= b >= 0`), rasterised there with an
//! incremental-error (Bresenham) loop, and each raster point is mapped
//! back with the exact inverse transform.
//!
//! Octants 0–3 cover the half-plane `dy > 0 || (dy == 0 && dx >= 0)`;
//! octant `k + 4` is the 180° rotation of octant `k`. Lines pointing into
//! octants 4–7 are rasterised from the far endpoint and reversed, so a
//! line and its reverse always visit the same cells. Vision relies on
//! this for mutual visibility between two observers.

use umbra_core::Position;

/// One of the eight angular partitions around a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Octant {
    /// `dx >= dy >= 0` (includes the zero vector).
    O0 = 0,
    /// `dy > dx >= 0`.
    O1 = 1,
    /// `dx < 0`, `dy >= -dx`.
    O2 = 2,
    /// `-dx > dy > 0`.
    O3 = 3,
    /// Rotation of [`Octant::O0`] by 180°.
    O4 = 4,
    /// Rotation of [`Octant::O1`] by 180°.
    O5 = 5,
    /// Rotation of [`Octant::O2`] by 180°.
    O6 = 6,
    /// Rotation of [`Octant::O3`] by 180°.
    O7 = 7,
}

impl Octant {
    /// Classify a direction vector.
    pub fn classify(dx: i32, dy: i32) -> Octant {
        if dy > 0 || (dy == 0 && dx >= 0) {
            if dx >= dy {
                Octant::O0
            } else if dx >= 0 {
                Octant::O1
            } else if dy >= -dx {
                Octant::O2
            } else {
                Octant::O3
            }
        } else {
            Octant::classify(-dx, -dy).rotated()
        }
    }

    /// The octant rotated by 180°.
    pub fn rotated(self) -> Octant {
        match self {
            Octant::O0 => Octant::O4,
            Octant::O1 => Octant::O5,
            Octant::O2 => Octant::O6,
            Octant::O3 => Octant::O7,
            Octant::O4 => Octant::O0,
            Octant::O5 => Octant::O1,
            Octant::O6 => Octant::O2,
            Octant::O7 => Octant::O3,
        }
    }

    /// Whether this is one of the rotated octants 4–7.
    pub fn is_rotated(self) -> bool {
        (self as u8) >= 4
    }

    /// Map a vector lying in this octant into octant zero.
    pub fn to_zero(self, dx: i32, dy: i32) -> (i32, i32) {
        match self {
            Octant::O0 => (dx, dy),
            Octant::O1 => (dy, dx),
            Octant::O2 => (dy, -dx),
            Octant::O3 => (-dx, dy),
            _ => self.rotated().to_zero(-dx, -dy),
        }
    }

    /// Map an octant-zero vector back into this octant.
    /// Exact inverse of [`Octant::to_zero`].
    pub fn from_zero(self, a: i32, b: i32) -> (i32, i32) {
        match self {
            Octant::O0 => (a, b),
            Octant::O1 => (b, a),
            Octant::O2 => (-b, a),
            Octant::O3 => (-a, b),
            _ => {
                let (dx, dy) = self.rotated().from_zero(a, b);
                (-dx, -dy)
            }
        }
    }
}

/// Cells on the line from `from` to `to`, both endpoints included.
///
/// The result has `max(|dx|, |dy|) + 1` cells, consecutive cells are
/// 8-adjacent, and `plot_line(b, a)` is `plot_line(a, b)` reversed.
pub fn plot_line(from: Position, to: Position) -> Vec<Position> {
    let mut out = Vec::new();
    plot_line_into(from, to, &mut out);
    out
}

/// Like [`plot_line`] but appends into a caller-owned buffer, which is
/// cleared first. Lets hot loops reuse one allocation.
pub fn plot_line_into(from: Position, to: Position, out: &mut Vec<Position>) {
    out.clear();
    let octant = Octant::classify(to.x - from.x, to.y - from.y);
    if octant.is_rotated() {
        raster(to, from, out);
        out.reverse();
    } else {
        raster(from, to, out);
    }
}

fn raster(from: Position, to: Position, out: &mut Vec<Position>) {
    let octant = Octant::classify(to.x - from.x, to.y - from.y);
    let (a, b) = octant.to_zero(to.x - from.x, to.y - from.y);
    out.reserve(a as usize + 1);

    let (a64, b64) = (i64::from(a), i64::from(b));
    let mut err = 2 * b64 - a64;
    let mut y = 0;
    for x in 0..=a {
        let (dx, dy) = octant.from_zero(x, y);
        out.push(from.offset(dx, dy));
        if err > 0 {
            y += 1;
            err -= 2 * a64;
        }
        err += 2 * b64;
    }
}
