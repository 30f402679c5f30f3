use serde::{Deserialize, Serialize};

use crate::*;

/// Decision state of a tile in the stopping game.
///
/// `Rejected` and `Accepted` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Revealed,
    Rejected,
    Accepted,
}

impl TileState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Rejected | Self::Accepted)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    value: TileValue,
    state: TileState,
}

impl Tile {
    pub(crate) const fn new(id: TileId, value: TileValue) -> Self {
        Self {
            id,
            value,
            state: TileState::Hidden,
        }
    }

    pub const fn id(&self) -> TileId {
        self.id
    }

    pub const fn value(&self) -> TileValue {
        self.value
    }

    pub const fn state(&self) -> TileState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: TileState) {
        self.state = state;
    }
}
