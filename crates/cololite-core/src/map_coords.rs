//! Lazy enumeration of every hex within a radius.

use crate::hex::HexCoord;
use std::iter::FusedIterator;

/// Number of hexes within `radius` steps of the origin: `3n² + 3n + 1`
pub fn hex_count(radius: u32) -> usize {
    let n = radius as usize;
    3 * n * n + 3 * n + 1
}

/// Every coordinate at distance `<= size` from the origin.
///
/// Iteration runs row by row with increasing `r` from `-size` to `size`,
/// and increasing `q` within a row. The sequence is restartable: iterate it
/// as often as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapCoords {
    size: i32,
}

impl MapCoords {
    /// Coordinates of a map of radius `size`
    pub fn new(size: u32) -> Self {
        Self { size: size as i32 }
    }

    /// The radius
    pub fn size(&self) -> u32 {
        self.size as u32
    }

    /// Number of coordinates produced
    pub fn len(&self) -> usize {
        hex_count(self.size())
    }

    /// Never empty: radius 0 still holds the centre
    pub fn is_empty(&self) -> bool {
        false
    }

    /// A fresh iterator positioned at the first coordinate
    pub fn iter(&self) -> MapCoordsIter {
        MapCoordsIter::new(self.size)
    }
}

impl IntoIterator for MapCoords {
    type Item = HexCoord;
    type IntoIter = MapCoordsIter;

    fn into_iter(self) -> MapCoordsIter {
        self.iter()
    }
}

impl IntoIterator for &MapCoords {
    type Item = HexCoord;
    type IntoIter = MapCoordsIter;

    fn into_iter(self) -> MapCoordsIter {
        self.iter()
    }
}

/// Cursor over [`MapCoords`]. Two cursors compare equal when they sit at
/// the same position of the same map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCoordsIter {
    size: i32,
    r: i32,
    q: i32,
}

fn row_start(size: i32, r: i32) -> i32 {
    -size - r.min(0)
}

fn row_end(size: i32, r: i32) -> i32 {
    size - r.max(0)
}

fn row_len(size: i32, r: i32) -> usize {
    (row_end(size, r) - row_start(size, r) + 1) as usize
}

impl MapCoordsIter {
    fn new(size: i32) -> Self {
        Self {
            size,
            r: -size,
            q: row_start(size, -size),
        }
    }

    /// The coordinate the next call to `next` returns, if any
    pub fn peek(&self) -> Option<HexCoord> {
        (self.r <= self.size).then(|| HexCoord::new(self.q, self.r))
    }

    fn remaining(&self) -> usize {
        if self.r > self.size {
            return 0;
        }
        let current_row = (row_end(self.size, self.r) - self.q + 1) as usize;
        let later_rows: usize = (self.r + 1..=self.size).map(|r| row_len(self.size, r)).sum();
        current_row + later_rows
    }
}

impl Iterator for MapCoordsIter {
    type Item = HexCoord;

    fn next(&mut self) -> Option<HexCoord> {
        let coord = self.peek()?;
        self.q += 1;
        if self.q > row_end(self.size, self.r) {
            self.r += 1;
            self.q = row_start(self.size, self.r);
        }
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MapCoordsIter {}

impl FusedIterator for MapCoordsIter {}
