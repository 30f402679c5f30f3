use serde::{Deserialize, Serialize};

use crate::*;

/// Sliding puzzle played by moving tiles into the empty cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSlideEngine")]
pub struct SlideEngine {
    board: BoardLayout,
    move_count: u32,
    state: EngineState,
}

impl SlideEngine {
    pub fn new(board: BoardLayout) -> Self {
        Self {
            board,
            move_count: 0,
            state: Default::default(),
        }
    }

    pub fn new_game(config: PuzzleConfig, generator: impl BoardGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &BoardLayout {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.board.size()
    }

    pub fn cells(&self) -> &[CellValue] {
        self.board.cells()
    }

    pub fn value_at(&self, index: CellIndex) -> Option<CellValue> {
        self.board.cells().get(usize::from(index)).copied()
    }

    pub fn empty_index(&self) -> CellIndex {
        self.board.empty_index()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    pub fn is_in_place(&self, index: CellIndex) -> bool {
        self.board.is_in_place(index)
    }

    /// Cells whose tile may slide into the empty cell.
    pub fn movable_cells(&self) -> impl Iterator<Item = CellIndex> + use<> {
        self.board.iter_adjacent(self.board.empty_index())
    }

    pub fn can_slide(&self, index: CellIndex) -> bool {
        !self.is_finished() && self.board.contains(index) && self.board.is_adjacent_to_empty(index)
    }

    pub fn slide(&mut self, index: CellIndex) -> Result<SlideOutcome> {
        if !self.can_slide(index) {
            return Err(GameError::InvalidMove);
        }

        self.board.swap_with_empty(index);
        self.move_count = self.move_count.saturating_add(1);

        if self.board.is_solved() {
            self.state = EngineState::Won;
            log::debug!("puzzle solved in {} moves", self.move_count);
            Ok(SlideOutcome::Solved)
        } else {
            self.mark_started();
            log::trace!("slid cell {} ({} moves)", index, self.move_count);
            Ok(SlideOutcome::Moved)
        }
    }

    /// Moves the tile that would travel in `direction` into the empty cell.
    ///
    /// `Up` moves the tile below the empty cell, `Left` the one to its right.
    pub fn slide_toward(&mut self, direction: Direction) -> Result<SlideOutcome> {
        let source = match direction {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        };
        let index = self
            .board
            .step(self.board.empty_index(), source)
            .ok_or(GameError::InvalidMove)?;
        self.slide(index)
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }
}

#[derive(Deserialize)]
struct RawSlideEngine {
    board: BoardLayout,
    move_count: u32,
    state: EngineState,
}

impl TryFrom<RawSlideEngine> for SlideEngine {
    type Error = GameError;

    fn try_from(raw: RawSlideEngine) -> Result<Self> {
        let consistent = match raw.state {
            EngineState::Ready => raw.move_count == 0,
            EngineState::Active => true,
            EngineState::Won => raw.board.is_solved() && raw.move_count > 0,
            EngineState::Lost => false,
        };
        if !consistent {
            return Err(GameError::InvalidLayout);
        }

        Ok(Self {
            board: raw.board,
            move_count: raw.move_count,
            state: raw.state,
        })
    }
}
