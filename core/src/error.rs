use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be at least one cell wide and high")]
    InvalidBoardSize,
    #[error("Too many mines: {mines} requested but only {available} cells lie outside the safe region")]
    InitMineMap {
        mines: CellCount,
        available: CellCount,
    },
    #[error("Mine layout does not fit the board or the safe region")]
    InvalidMineLayout,
    #[error("Unknown move mode {0}")]
    InvalidMode(u8),
    #[error("Move at cell {index} cannot be applied")]
    IllegalMove { index: CellIndex },
    #[error("Recorded game ended before reaching a final state")]
    ReplayExhausted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
