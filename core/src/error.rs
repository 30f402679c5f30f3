use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move for the current game state")]
    InvalidMove,
    #[error("Layout does not describe a playable game")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
