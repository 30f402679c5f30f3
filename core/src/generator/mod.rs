use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of the hidden values of a stopping game.
pub trait TileGenerator {
    fn generate(self, config: StoppingConfig) -> TileLayout;
}

/// Source of the starting arrangement of a sliding puzzle.
pub trait BoardGenerator {
    fn generate(self, config: PuzzleConfig) -> BoardLayout;
}
