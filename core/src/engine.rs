use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Reveal/decide state machine of the optimal-stopping game.
///
/// Tiles are revealed one at a time and every reveal must be settled with
/// [`StoppingEngine::accept`] or [`StoppingEngine::reject`] before the next one.
/// Once the last hidden tile has been revealed it can only be accepted. The
/// game is won when the accepted value equals the best value of the layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStoppingEngine")]
pub struct StoppingEngine {
    tiles: Vec<Tile>,
    best_value: TileValue,
    revealed_count: TileCount,
    pending: Option<TileId>,
    state: EngineState,
}

impl StoppingEngine {
    pub fn new(layout: TileLayout) -> Self {
        let best_value = layout.best_value();
        let tiles = layout
            .values()
            .iter()
            .zip(0..)
            .map(|(&value, id)| Tile::new(id, value))
            .collect();
        Self {
            tiles,
            best_value,
            revealed_count: 0,
            pending: None,
            state: Default::default(),
        }
    }

    pub fn new_game(config: StoppingConfig, generator: impl TileGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, tile_id: TileId) -> Option<&Tile> {
        self.tiles.get(usize::from(tile_id))
    }

    pub fn tile_count(&self) -> TileCount {
        self.tiles.len() as TileCount
    }

    pub fn best_value(&self) -> TileValue {
        self.best_value
    }

    pub fn revealed_count(&self) -> TileCount {
        self.revealed_count
    }

    /// Tiles that were never revealed.
    pub fn remaining(&self) -> TileCount {
        self.tile_count() - self.revealed_count
    }

    pub fn pending_tile_id(&self) -> Option<TileId> {
        self.pending
    }

    pub fn pending_tile(&self) -> Option<&Tile> {
        self.pending.and_then(|tile_id| self.tile(tile_id))
    }

    /// Whether the pending tile is the last one, which forbids rejecting it.
    pub fn must_accept(&self) -> bool {
        !self.is_over() && self.pending.is_some() && self.remaining() == 0
    }

    pub fn can_reject(&self) -> bool {
        !self.is_over() && self.pending.is_some() && self.remaining() > 0
    }

    pub fn can_reveal(&self, tile_id: TileId) -> bool {
        !self.is_over()
            && self.pending.is_none()
            && self.tile(tile_id).is_some_and(|tile| tile.state().is_hidden())
    }

    /// Ids of every tile holding the best value, accepted or not.
    pub fn best_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles
            .iter()
            .filter(|tile| tile.value() == self.best_value)
            .map(Tile::id)
    }

    pub fn reveal(&mut self, tile_id: TileId) -> Result<RevealOutcome> {
        if !self.can_reveal(tile_id) {
            return Err(GameError::InvalidMove);
        }

        self.tiles[usize::from(tile_id)].set_state(TileState::Revealed);
        self.revealed_count += 1;
        self.pending = Some(tile_id);
        self.mark_started();
        log::trace!(
            "revealed tile {} ({} left)",
            tile_id,
            self.remaining()
        );

        Ok(if self.must_accept() {
            RevealOutcome::MustAccept
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Discards the pending tile for good.
    pub fn reject(&mut self) -> Result<TileId> {
        if !self.can_reject() {
            return Err(GameError::InvalidMove);
        }
        let tile_id = self.pending.take().ok_or(GameError::InvalidMove)?;

        self.tiles[usize::from(tile_id)].set_state(TileState::Rejected);
        log::trace!("rejected tile {}", tile_id);
        Ok(tile_id)
    }

    /// Settles on the pending tile and ends the game.
    pub fn accept(&mut self) -> Result<Decision> {
        self.check_not_finished()?;
        let tile_id = self.pending.take().ok_or(GameError::InvalidMove)?;

        let tile = &mut self.tiles[usize::from(tile_id)];
        tile.set_state(TileState::Accepted);
        let accepted_value = tile.value();
        let did_win = accepted_value == self.best_value;
        self.end_game(did_win);
        log::debug!(
            "accepted {} after {} reveals, best was {}",
            accepted_value,
            self.revealed_count,
            self.best_value
        );

        Ok(Decision {
            tile_id,
            accepted_value,
            best_value: self.best_value,
            did_win,
        })
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::InvalidMove)
        } else {
            Ok(())
        }
    }
}

#[derive(Deserialize)]
struct RawStoppingEngine {
    tiles: Vec<Tile>,
    best_value: TileValue,
    revealed_count: TileCount,
    pending: Option<TileId>,
    state: EngineState,
}

impl TryFrom<RawStoppingEngine> for StoppingEngine {
    type Error = GameError;

    /// Accepts only snapshots that the operations above could have produced.
    fn try_from(raw: RawStoppingEngine) -> Result<Self> {
        let layout = TileLayout::from_values(raw.tiles.iter().map(Tile::value).collect())?;

        let ids_in_order = raw.tiles.iter().zip(0..).all(|(tile, id)| tile.id() == id);
        let revealed = raw
            .tiles
            .iter()
            .filter(|tile| !tile.state().is_hidden())
            .count();
        let undecided: Vec<TileId> = raw
            .tiles
            .iter()
            .filter(|tile| tile.state() == TileState::Revealed)
            .map(Tile::id)
            .collect();
        let accepted: Vec<TileValue> = raw
            .tiles
            .iter()
            .filter(|tile| tile.state() == TileState::Accepted)
            .map(Tile::value)
            .collect();

        let state_matches = match raw.state {
            EngineState::Ready => revealed == 0,
            EngineState::Active => revealed > 0 && accepted.is_empty(),
            EngineState::Won | EngineState::Lost => {
                let won = matches!(raw.state, EngineState::Won);
                undecided.is_empty()
                    && accepted.len() == 1
                    && (accepted[0] == layout.best_value()) == won
            }
        };

        let consistent = ids_in_order
            && state_matches
            && layout.best_value() == raw.best_value
            && usize::from(raw.revealed_count) == revealed
            && undecided.len() <= 1
            && raw.pending == undecided.first().copied();
        if !consistent {
            return Err(GameError::InvalidLayout);
        }

        Ok(Self {
            tiles: raw.tiles,
            best_value: raw.best_value,
            revealed_count: raw.revealed_count,
            pending: raw.pending,
            state: raw.state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn engine(values: &[TileValue]) -> StoppingEngine {
        StoppingEngine::new(TileLayout::from_values(values.to_vec()).unwrap())
    }

    #[test]
    fn new_game_starts_hidden_and_ready() {
        let engine = engine(&[300, 450, 120]);

        assert!(engine.state().is_ready());
        assert_eq!(engine.best_value(), 450);
        assert_eq!(engine.revealed_count(), 0);
        assert_eq!(engine.pending_tile_id(), None);
        assert!(!engine.is_over());
        for (i, tile) in engine.tiles().iter().enumerate() {
            assert_eq!(usize::from(tile.id()), i);
            assert_eq!(tile.state(), TileState::Hidden);
        }
    }

    #[test]
    fn reveal_twice_is_invalid() {
        let mut engine = engine(&[300, 450, 120]);

        assert_eq!(engine.reveal(0), Ok(RevealOutcome::Revealed));
        assert_eq!(engine.reveal(0), Err(GameError::InvalidMove));
        assert_eq!(engine.revealed_count(), 1);
    }

    #[test]
    fn reveal_while_pending_is_invalid() {
        let mut engine = engine(&[300, 450, 120]);

        engine.reveal(0).unwrap();
        assert_eq!(engine.reveal(1), Err(GameError::InvalidMove));
        assert_eq!(engine.tiles()[1].state(), TileState::Hidden);
        assert_eq!(engine.pending_tile_id(), Some(0));
    }

    #[test]
    fn reveal_unknown_tile_is_invalid() {
        let mut engine = engine(&[300, 450]);

        assert_eq!(engine.reveal(2), Err(GameError::InvalidMove));
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn rejected_tile_cannot_be_revealed_again() {
        let mut engine = engine(&[300, 450, 120]);

        engine.reveal(1).unwrap();
        assert_eq!(engine.reject(), Ok(1));
        assert_eq!(engine.tiles()[1].state(), TileState::Rejected);
        assert_eq!(engine.reveal(1), Err(GameError::InvalidMove));
    }

    #[test]
    fn reject_or_accept_without_pending_is_invalid() {
        let mut engine = engine(&[300, 450, 120]);

        assert_eq!(engine.reject(), Err(GameError::InvalidMove));
        assert_eq!(engine.accept(), Err(GameError::InvalidMove));
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn accept_picks_best_in_middle() {
        let mut engine = engine(&[500, 999, 100]);

        assert_eq!(engine.reveal(0), Ok(RevealOutcome::Revealed));
        assert_eq!(engine.pending_tile_id(), Some(0));
        assert_eq!(engine.reject(), Ok(0));
        assert_eq!(engine.tiles()[0].state(), TileState::Rejected);
        assert_eq!(engine.reveal(1), Ok(RevealOutcome::Revealed));
        assert_eq!(engine.pending_tile_id(), Some(1));

        let decision = engine.accept().unwrap();

        assert_eq!(
            decision,
            Decision {
                tile_id: 1,
                accepted_value: 999,
                best_value: 999,
                did_win: true,
            }
        );
        assert!(engine.is_over());
        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.pending_tile_id(), None);
        assert_eq!(engine.tiles()[2].state(), TileState::Hidden);
    }

    #[test]
    fn last_tile_must_be_accepted() {
        let mut engine = engine(&[300, 700]);

        engine.reveal(0).unwrap();
        engine.reject().unwrap();
        assert_eq!(engine.reveal(1), Ok(RevealOutcome::MustAccept));
        assert!(engine.must_accept());
        assert!(!engine.can_reject());
        assert_eq!(engine.reject(), Err(GameError::InvalidMove));
        assert_eq!(engine.pending_tile_id(), Some(1));

        let decision = engine.accept().unwrap();

        assert_eq!(decision.accepted_value, 700);
        assert!(decision.did_win);
        assert!(engine.is_over());
    }

    #[test]
    fn single_tile_game_always_wins() {
        let mut engine = engine(&[555]);

        assert_eq!(engine.reveal(0), Ok(RevealOutcome::MustAccept));
        assert_eq!(engine.reject(), Err(GameError::InvalidMove));

        let decision = engine.accept().unwrap();

        assert_eq!(decision.accepted_value, 555);
        assert_eq!(decision.best_value, 555);
        assert!(decision.did_win);
    }

    #[test]
    fn accepting_lower_value_loses() {
        let mut engine = engine(&[400, 800, 200]);

        engine.reveal(2).unwrap();
        let decision = engine.accept().unwrap();

        assert!(!decision.did_win);
        assert_eq!(decision.best_value, 800);
        assert_eq!(engine.state(), EngineState::Lost);
    }

    #[test]
    fn tied_best_value_wins_regardless_of_tile() {
        let mut engine = engine(&[910, 400, 910]);

        engine.reveal(2).unwrap();
        let decision = engine.accept().unwrap();

        assert!(decision.did_win);
        assert_eq!(engine.best_tiles().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(engine.tiles()[0].state(), TileState::Hidden);
    }

    #[test]
    fn every_move_after_game_over_is_invalid() {
        let mut engine = engine(&[300, 450, 120]);

        engine.reveal(0).unwrap();
        engine.accept().unwrap();

        assert_eq!(engine.reveal(1), Err(GameError::InvalidMove));
        assert_eq!(engine.reject(), Err(GameError::InvalidMove));
        assert_eq!(engine.accept(), Err(GameError::InvalidMove));
        assert_eq!(engine.tiles()[0].state(), TileState::Accepted);
        assert_eq!(engine.tiles()[1].state(), TileState::Hidden);
    }

    #[test]
    fn exactly_one_tile_accepted_at_end() {
        let mut engine = engine(&[150, 250, 350, 450]);

        for tile_id in 0..3 {
            engine.reveal(tile_id).unwrap();
            engine.reject().unwrap();
        }
        engine.reveal(3).unwrap();
        engine.accept().unwrap();

        let accepted = engine
            .tiles()
            .iter()
            .filter(|tile| tile.state() == TileState::Accepted)
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(engine.remaining(), 0);
        assert!(engine.tiles().iter().all(|tile| tile.state().is_resolved()));
    }

    #[test]
    fn snapshot_restores_pending_decision() {
        let mut engine = engine(&[300, 700]);
        engine.reveal(0).unwrap();

        let json = serde_json::to_string(&engine).unwrap();
        let mut restored: StoppingEngine = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, engine);
        assert_eq!(restored.reject(), Ok(0));
        assert_eq!(restored.reveal(1), Ok(RevealOutcome::MustAccept));
    }

    #[test]
    fn snapshot_of_finished_game_restores() {
        let mut engine = engine(&[300, 700, 200]);
        engine.reveal(2).unwrap();
        engine.accept().unwrap();

        let json = serde_json::to_string(&engine).unwrap();
        let restored: StoppingEngine = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, engine);
        assert_eq!(restored.state(), EngineState::Lost);
    }

    fn snapshot_with(engine: &StoppingEngine, field: &str, value: serde_json::Value) -> bool {
        let mut snapshot = serde_json::to_value(engine).unwrap();
        snapshot[field] = value;
        serde_json::from_value::<StoppingEngine>(snapshot).is_ok()
    }

    #[test]
    fn snapshot_must_keep_best_value() {
        let engine = engine(&[100, 900]);

        assert!(snapshot_with(&engine, "best_value", 900.into()));
        assert!(!snapshot_with(&engine, "best_value", 100.into()));
    }

    #[test]
    fn snapshot_must_count_reveals() {
        let mut engine = engine(&[300, 700]);
        assert!(!snapshot_with(&engine, "revealed_count", 5.into()));

        engine.reveal(0).unwrap();
        assert!(!snapshot_with(&engine, "revealed_count", 0.into()));
    }

    #[test]
    fn snapshot_pending_must_be_the_revealed_tile() {
        let mut engine = engine(&[300, 700, 200]);
        assert!(!snapshot_with(&engine, "pending", 1.into()));
        assert!(!snapshot_with(&engine, "pending", 7.into()));

        engine.reveal(0).unwrap();
        assert!(snapshot_with(&engine, "pending", 0.into()));
        assert!(!snapshot_with(&engine, "pending", serde_json::Value::Null));
    }

    #[test]
    fn snapshot_state_must_match_tiles() {
        let mut engine = engine(&[300, 700, 200]);
        assert!(!snapshot_with(&engine, "state", "Won".into()));

        engine.reveal(1).unwrap();
        engine.accept().unwrap();
        assert!(snapshot_with(&engine, "state", "Won".into()));
        assert!(!snapshot_with(&engine, "state", "Lost".into()));
        assert!(!snapshot_with(&engine, "state", "Active".into()));
    }

    #[test]
    fn snapshot_ids_must_be_sequential() {
        let engine = engine(&[300, 700]);
        let mut snapshot = serde_json::to_value(&engine).unwrap();
        snapshot["tiles"][1]["id"] = 0.into();

        assert!(serde_json::from_value::<StoppingEngine>(snapshot).is_err());
    }

    #[test]
    fn new_game_uses_generator() {
        let generator = FixedTileGenerator::from_values(vec![120, 640]).unwrap();
        let engine = StoppingEngine::new_game(StoppingConfig::new(2), generator);

        assert_eq!(engine.tile_count(), 2);
        assert_eq!(engine.best_value(), 640);
    }
}
