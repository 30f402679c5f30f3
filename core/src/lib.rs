#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use puzzle::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod puzzle;
mod tile;
mod types;

/// Count type for tiles in a stopping game.
pub type TileCount = u16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoppingConfig {
    pub tiles: TileCount,
}

impl StoppingConfig {
    pub const DEFAULT_TILES: TileCount = 30;

    pub const fn new_unchecked(tiles: TileCount) -> Self {
        Self { tiles }
    }

    pub fn new(tiles: TileCount) -> Self {
        Self::new_unchecked(tiles.clamp(1, TileId::MAX))
    }
}

impl Default for StoppingConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_TILES)
    }
}

/// Hidden values of a stopping game, fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTileLayout")]
pub struct TileLayout {
    values: Vec<TileValue>,
    best_value: TileValue,
}

impl TileLayout {
    pub(crate) fn new_unchecked(values: Vec<TileValue>) -> Self {
        let best_value = values.iter().copied().max().unwrap_or_default();
        Self { values, best_value }
    }

    pub fn from_values(values: Vec<TileValue>) -> Result<Self> {
        if values.is_empty() || values.len() > usize::from(TileId::MAX) {
            return Err(GameError::InvalidLayout);
        }
        if !values.iter().all(|&value| is_valid_tile_value(value)) {
            return Err(GameError::InvalidLayout);
        }

        Ok(Self::new_unchecked(values))
    }

    pub fn stopping_config(&self) -> StoppingConfig {
        StoppingConfig::new_unchecked(self.tile_count())
    }

    pub fn tile_count(&self) -> TileCount {
        // bounded by `from_values` and `StoppingConfig::new`
        self.values.len() as TileCount
    }

    pub fn values(&self) -> &[TileValue] {
        &self.values
    }

    pub fn best_value(&self) -> TileValue {
        self.best_value
    }
}

#[derive(Deserialize)]
struct RawTileLayout {
    values: Vec<TileValue>,
    best_value: TileValue,
}

impl TryFrom<RawTileLayout> for TileLayout {
    type Error = GameError;

    fn try_from(raw: RawTileLayout) -> Result<Self> {
        let layout = Self::from_values(raw.values)?;
        if layout.best_value != raw.best_value {
            return Err(GameError::InvalidLayout);
        }
        Ok(layout)
    }
}

impl Index<TileId> for TileLayout {
    type Output = TileValue;

    fn index(&self, tile_id: TileId) -> &Self::Output {
        &self.values[usize::from(tile_id)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub size: u8,
    pub shuffle_moves: u16,
}

impl PuzzleConfig {
    pub const DEFAULT_SIZE: u8 = 4;
    pub const MIN_SIZE: u8 = 2;
    pub const MAX_SIZE: u8 = 15;
    pub const DEFAULT_SHUFFLE_MOVES: u16 = 200;

    pub const fn new_unchecked(size: u8, shuffle_moves: u16) -> Self {
        Self {
            size,
            shuffle_moves,
        }
    }

    pub fn new(size: u8, shuffle_moves: u16) -> Self {
        Self::new_unchecked(size.clamp(Self::MIN_SIZE, Self::MAX_SIZE), shuffle_moves)
    }

    pub const fn total_cells(&self) -> u8 {
        self.size.saturating_mul(self.size)
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_SHUFFLE_MOVES)
    }
}

/// Arrangement of a sliding puzzle, `0` standing for the empty cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardLayout")]
pub struct BoardLayout {
    size: u8,
    cells: Vec<CellValue>,
    empty_index: CellIndex,
}

impl BoardLayout {
    /// Cell `i` holds `i + 1` and the last cell is empty.
    pub fn solved(size: u8) -> Self {
        let size = size.clamp(PuzzleConfig::MIN_SIZE, PuzzleConfig::MAX_SIZE);
        let total = size * size;
        let cells = (0..total).map(|i| (i + 1) % total).collect();
        Self {
            size,
            cells,
            empty_index: total - 1,
        }
    }

    pub fn from_cells(size: u8, cells: Vec<CellValue>) -> Result<Self> {
        if !(PuzzleConfig::MIN_SIZE..=PuzzleConfig::MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidLayout);
        }
        let total = size * size;
        if cells.len() != usize::from(total) {
            return Err(GameError::InvalidLayout);
        }

        let mut seen = [false; 256];
        for &value in &cells {
            if value >= total || seen[usize::from(value)] {
                return Err(GameError::InvalidLayout);
            }
            seen[usize::from(value)] = true;
        }

        let empty_index = cells
            .iter()
            .position(|&value| value == 0)
            .ok_or(GameError::InvalidLayout)? as CellIndex;

        Ok(Self {
            size,
            cells,
            empty_index,
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn empty_index(&self) -> CellIndex {
        self.empty_index
    }

    pub fn total_cells(&self) -> u8 {
        self.size * self.size
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        index < self.total_cells()
    }

    pub fn is_solved(&self) -> bool {
        let last = self.total_cells() - 1;
        self.cells[usize::from(last)] == 0
            && (0..last).all(|i| self.cells[usize::from(i)] == i + 1)
    }

    pub fn is_in_place(&self, index: CellIndex) -> bool {
        self.contains(index) && self[index] != 0 && self[index] == index + 1
    }

    pub fn iter_adjacent(&self, index: CellIndex) -> AdjacentIter {
        AdjacentIter::new(index, self.size)
    }

    pub fn is_adjacent_to_empty(&self, index: CellIndex) -> bool {
        self.iter_adjacent(self.empty_index).any(|pos| pos == index)
    }

    /// Cell reached from `index` by moving one step in `direction`.
    pub fn step(&self, index: CellIndex, direction: Direction) -> Option<CellIndex> {
        let (col, row) = (index % self.size, index / self.size);
        let (col, row) = match direction {
            Direction::Up => (col, row.checked_sub(1)?),
            Direction::Down => (col, row + 1),
            Direction::Left => (col.checked_sub(1)?, row),
            Direction::Right => (col + 1, row),
        };
        (col < self.size && row < self.size).then(|| row * self.size + col)
    }

    pub(crate) fn swap_with_empty(&mut self, index: CellIndex) {
        self.cells
            .swap(usize::from(index), usize::from(self.empty_index));
        self.empty_index = index;
    }
}

#[derive(Deserialize)]
struct RawBoardLayout {
    size: u8,
    cells: Vec<CellValue>,
    empty_index: CellIndex,
}

impl TryFrom<RawBoardLayout> for BoardLayout {
    type Error = GameError;

    fn try_from(raw: RawBoardLayout) -> Result<Self> {
        let board = Self::from_cells(raw.size, raw.cells)?;
        if board.empty_index != raw.empty_index {
            return Err(GameError::InvalidLayout);
        }
        Ok(board)
    }
}

impl Index<CellIndex> for BoardLayout {
    type Output = CellValue;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.cells[usize::from(index)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The tile is pending, either `accept` or `reject` may follow.
    Revealed,
    /// The last hidden tile was revealed, only `accept` may follow.
    MustAccept,
}

impl RevealOutcome {
    pub const fn is_forced(self) -> bool {
        matches!(self, Self::MustAccept)
    }
}

/// Result of accepting a tile, what a caller forwards to score keeping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub tile_id: TileId,
    pub accepted_value: TileValue,
    pub best_value: TileValue,
    pub did_win: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlideOutcome {
    Moved,
    Solved,
}

impl SlideOutcome {
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}
