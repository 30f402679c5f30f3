use rand::prelude::*;

use super::*;

/// Draws every tile value uniformly from [`TILE_VALUES`].
#[derive(Clone, Debug, PartialEq)]
pub struct RandomTileGenerator {
    seed: u64,
}

impl RandomTileGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl TileGenerator for RandomTileGenerator {
    fn generate(self, config: StoppingConfig) -> TileLayout {
        let tiles = config.tiles.max(1);
        if tiles != config.tiles {
            log::warn!("Requested an empty game, generating a single tile instead");
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let values = (0..tiles).map(|_| rng.gen_range(TILE_VALUES)).collect();
        TileLayout::new_unchecked(values)
    }
}

/// Shuffles a solved board with random moves of the empty cell, which keeps it solvable.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleBoardGenerator {
    seed: u64,
}

impl ShuffleBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for ShuffleBoardGenerator {
    fn generate(self, config: PuzzleConfig) -> BoardLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut board = BoardLayout::solved(config.size);

        for _ in 0..config.shuffle_moves {
            random_step(&mut board, &mut rng);
        }

        // never hand out a board that is already solved
        if board.is_solved() {
            log::debug!("Shuffle ended on the solved board, taking one more step");
            random_step(&mut board, &mut rng);
        }

        board
    }
}

fn random_step(board: &mut BoardLayout, rng: &mut SmallRng) {
    if let Some(index) = board.iter_adjacent(board.empty_index()).choose(rng) {
        board.swap_with_empty(index);
    }
}
