use alloc::vec::IntoIter;
use alloc::vec::Vec;

use rand::RngCore;

use crate::*;

/// Anything that can drive a game from its first click to a terminal status.
pub trait MoveSource {
    /// The reveal that triggers mine placement.
    fn first_move(&mut self, field: &MineField) -> Result<Move>;

    /// Called only while the field is in progress.
    fn next_move(&mut self, field: &MineField, rng: &mut dyn RngCore) -> Result<Move>;
}

impl<T: MoveSource + ?Sized> MoveSource for &mut T {
    fn first_move(&mut self, field: &MineField) -> Result<Move> {
        (**self).first_move(field)
    }

    fn next_move(&mut self, field: &MineField, rng: &mut dyn RngCore) -> Result<Move> {
        (**self).next_move(field, rng)
    }
}

/// Plays back a recorded move list.
#[derive(Clone, Debug)]
pub struct Replay {
    moves: IntoIter<Move>,
}

impl Replay {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }

    /// Moves not played yet.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }

    fn pop(&mut self, field: &MineField) -> Result<Move> {
        let mv = self.moves.next().ok_or(GameError::ReplayExhausted)?;
        if field.status() == GameStatus::InProgress && !mv.is_applicable(field) {
            log::warn!("Recorded {:?} does not apply to the current board", mv);
            return Err(GameError::IllegalMove { index: mv.index });
        }
        Ok(mv)
    }
}

impl MoveSource for Replay {
    fn first_move(&mut self, field: &MineField) -> Result<Move> {
        let mv = self.pop(field)?;
        if mv.index >= field.geometry().total_cells() || !matches!(mv.mode, Mode::Reveal) {
            return Err(GameError::IllegalMove { index: mv.index });
        }
        Ok(mv)
    }

    fn next_move(&mut self, field: &MineField, _rng: &mut dyn RngCore) -> Result<Move> {
        self.pop(field)
    }
}
