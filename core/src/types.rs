use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

/// Stable position of a tile in the hidden sequence, `0..n`.
pub type TileId = u16;

/// Hidden value carried by a tile.
pub type TileValue = u16;

/// Index into a puzzle board, row-major.
pub type CellIndex = u8;

/// Value printed on a puzzle tile, `0` marks the empty cell.
pub type CellValue = u8;

pub const MIN_TILE_VALUE: TileValue = 100;
pub const MAX_TILE_VALUE: TileValue = 999;

/// Inclusive range every generated tile value is drawn from.
pub const TILE_VALUES: RangeInclusive<TileValue> = MIN_TILE_VALUE..=MAX_TILE_VALUE;

pub const fn is_valid_tile_value(value: TileValue) -> bool {
    value >= MIN_TILE_VALUE && value <= MAX_TILE_VALUE
}

/// Direction of an arrow key, named after the way the moved tile travels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DISPLACEMENTS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Applies `delta` to `(col, row)`, returning a value only when it remains in bounds.
fn apply_delta(coords: (u8, u8), delta: (i8, i8), side: u8) -> Option<(u8, u8)> {
    let (col, row) = coords;
    let (dx, dy) = delta;

    let next_col = col.checked_add_signed(dx)?;
    if next_col >= side {
        return None;
    }

    let next_row = row.checked_add_signed(dy)?;
    if next_row >= side {
        return None;
    }

    Some((next_col, next_row))
}

/// Orthogonal neighbors of a cell on a square board, in up/down/left/right order.
#[derive(Debug)]
pub struct AdjacentIter {
    center: (u8, u8),
    side: u8,
    index: u8,
}

impl AdjacentIter {
    pub fn new(center: CellIndex, side: u8) -> Self {
        Self {
            center: (center % side, center / side),
            side,
            index: 0,
        }
    }
}

impl Iterator for AdjacentIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.side);
            self.index += 1;

            if let Some((col, row)) = next_item {
                return Some(row * self.side + col);
            }
        }
    }
}
