use alloc::vec::Vec;

use super::*;

/// Replays a known sequence of tile values.
///
/// When the requested tile count differs from the sequence, the values are
/// cycled or truncated to fit.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedTileGenerator {
    values: Vec<TileValue>,
}

impl FixedTileGenerator {
    pub fn from_values(values: Vec<TileValue>) -> Result<Self> {
        let layout = TileLayout::from_values(values)?;
        Ok(Self::from_layout(layout))
    }

    pub fn from_layout(layout: TileLayout) -> Self {
        Self {
            values: layout.values().to_vec(),
        }
    }
}

impl TileGenerator for FixedTileGenerator {
    fn generate(self, config: StoppingConfig) -> TileLayout {
        let tiles = usize::from(config.tiles.max(1));
        if tiles == self.values.len() {
            return TileLayout::new_unchecked(self.values);
        }

        log::warn!(
            "Fixed layout has {} values but {} tiles were requested, cycling",
            self.values.len(),
            tiles
        );
        let values = self.values.iter().copied().cycle().take(tiles).collect();
        TileLayout::new_unchecked(values)
    }
}

/// Starts a puzzle from a known arrangement, ignoring the configured size.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    board: BoardLayout,
}

impl FixedBoardGenerator {
    pub fn new(board: BoardLayout) -> Self {
        Self { board }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(self, config: PuzzleConfig) -> BoardLayout {
        if config.size != self.board.size() {
            log::warn!(
                "Fixed board is {0}x{0}, ignoring requested size {1}",
                self.board.size(),
                config.size
            );
        }
        self.board
    }
}
