//! Test utilities for Umbra development.
//!
//! - [`AsciiMap`] / [`grid_from_ascii`]: build grids from string art.
//! - [`walled_room`]: an open floor ringed by walls.
//! - [`RecordingSink`]: an [`EventSink`] that keeps every event.
//! - [`fixtures`]: ready-made worlds.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex, PoisonError};

use umbra_core::{EventSink, GameEvent, Position};
use umbra_space::{Grid, TileKind};

/// A grid parsed from rows of characters, plus the marker cells.
///
/// | char | tile |
/// |------|------|
/// | `#` | wall |
/// | `.` | floor |
/// | `<` | up stair |
/// | `>` | down stair |
/// | anything else | floor, remembered as a marker |
pub struct AsciiMap {
    pub grid: Grid,
    markers: Vec<(char, Position)>,
}

impl AsciiMap {
    /// Parse `rows`. Panics on ragged or empty input.
    pub fn parse(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        assert!(
            rows.iter().all(|r| r.chars().count() == width),
            "ragged ascii map"
        );
        let mut grid =
            Grid::new(width as u32, height as u32, TileKind::Floor).expect("non-empty map");
        let mut markers = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let kind = match c {
                    '#' => TileKind::Wall,
                    '<' => TileKind::UpStair,
                    '>' => TileKind::DownStair,
                    '.' => TileKind::Floor,
                    other => {
                        markers.push((other, pos));
                        TileKind::Floor
                    }
                };
                grid.set_kind(pos, kind).expect("in bounds");
            }
        }
        Self { grid, markers }
    }

    /// First cell marked with `c`, in row-major order.
    pub fn marker(&self, c: char) -> Option<Position> {
        self.markers.iter().find(|(m, _)| *m == c).map(|(_, p)| *p)
    }

    /// Every cell marked with `c`, in row-major order.
    pub fn markers(&self, c: char) -> Vec<Position> {
        self.markers
            .iter()
            .filter(|(m, _)| *m == c)
            .map(|(_, p)| *p)
            .collect()
    }
}

/// Parse `rows` and keep only the grid.
pub fn grid_from_ascii(rows: &[&str]) -> Grid {
    AsciiMap::parse(rows).grid
}

/// A `width` x `height` grid whose border is wall and interior floor.
pub fn walled_room(width: u32, height: u32) -> Grid {
    let mut grid = Grid::new(width, height, TileKind::Wall).expect("non-empty room");
    if width > 2 && height > 2 {
        grid.fill_rect(
            Position::new(1, 1),
            Position::new(width as i32 - 2, height as i32 - 2),
            TileKind::Floor,
        );
    }
    grid
}

/// Keeps a copy of every event it receives.
///
/// Clones share the same log, so keep one clone and box the other into
/// the world.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, in delivery order.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for RecordingSink {
    fn notify(&mut self, event: &GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tiles_and_markers() {
        let map = AsciiMap::parse(&["#<#", "@g>", "#.g"]);
        assert_eq!(map.grid.kind_at(Position::new(1, 0)), Ok(TileKind::UpStair));
        assert_eq!(map.grid.kind_at(Position::new(2, 1)), Ok(TileKind::DownStair));
        assert_eq!(map.grid.kind_at(Position::new(0, 1)), Ok(TileKind::Floor));
        assert_eq!(map.marker('@'), Some(Position::new(0, 1)));
        assert_eq!(map.markers('g'), vec![Position::new(1, 1), Position::new(2, 2)]);
        assert_eq!(map.marker('x'), None);
    }

    #[test]
    fn walled_room_has_solid_border() {
        let grid = walled_room(5, 4);
        assert!(!grid.is_walkable(Position::new(0, 0)));
        assert!(!grid.is_walkable(Position::new(4, 3)));
        assert!(grid.is_walkable(Position::new(3, 2)));
        assert_eq!(grid.positions_of(TileKind::Floor).count(), 6);
    }

    #[test]
    fn recording_sink_shares_log_between_clones() {
        let keep = RecordingSink::new();
        let mut boxed = keep.clone();
        boxed.notify(&GameEvent::PlayerDied {
            actor: umbra_core::ActorId(0),
        });
        assert_eq!(keep.events().len(), 1);
        assert_eq!(keep.take().len(), 1);
        assert!(keep.events().is_empty());
    }
}
