//! Strongly-typed identifiers and counters.

use std::fmt;

/// Identifies an actor registered with a world.
///
/// Assigned once at registration from a monotonic counter and never
/// reused within the same world, so a stale id can never alias a newer
/// actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ActorId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an item lying on a tile or carried by an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a level (dungeon floor) within a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(pub u32);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LevelId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing world turn counter.
///
/// The first world turn is `TurnNumber(1)`. Scent values are keyed by
/// turn number, so turn zero would make fresh deposits indistinguishable
/// from untouched cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnNumber(pub u64);

impl TurnNumber {
    /// The turn a freshly created world starts on.
    pub const FIRST: TurnNumber = TurnNumber(1);

    /// The turn after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TurnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TurnNumber {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Visibility stamp written into a visibility map.
///
/// `Generation::NEVER` (zero) marks cells that were never seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u32);

impl Generation {
    /// Stamp of a cell that has never been seen.
    pub const NEVER: Generation = Generation(0);

    /// The generation after this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1).max(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
