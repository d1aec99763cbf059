use serde::{Deserialize, Serialize};

use crate::*;

/// How a move acts on its target cell. The discriminants are the boundary encoding used in recordings.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Reveal = 0,
    Chord = 1,
    Flag = 2,
    /// A reveal picked without a deduction behind it.
    RandomReveal = 3,
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode as u8
    }
}

impl TryFrom<u8> for Mode {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::Reveal,
            1 => Self::Chord,
            2 => Self::Flag,
            3 => Self::RandomReveal,
            other => return Err(GameError::InvalidMode(other)),
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub index: CellIndex,
    pub mode: Mode,
}

impl Move {
    pub const fn new(index: CellIndex, mode: Mode) -> Self {
        Self { index, mode }
    }

    pub const fn reveal(index: CellIndex) -> Self {
        Self::new(index, Mode::Reveal)
    }

    pub const fn chord(index: CellIndex) -> Self {
        Self::new(index, Mode::Chord)
    }

    pub const fn flag(index: CellIndex) -> Self {
        Self::new(index, Mode::Flag)
    }

    pub const fn random_reveal(index: CellIndex) -> Self {
        Self::new(index, Mode::RandomReveal)
    }

    pub const fn is_guess(&self) -> bool {
        matches!(self.mode, Mode::RandomReveal)
    }

    /// Whether the move still makes sense on `field`.
    ///
    /// Reveals and flags need a hidden target; a chord needs a revealed target that still borders hidden cells.
    pub fn is_applicable(&self, field: &MineField) -> bool {
        if self.index >= field.geometry().total_cells() {
            return false;
        }
        match self.mode {
            Mode::Reveal | Mode::Flag | Mode::RandomReveal => field.view_at(self.index).is_hidden(),
            Mode::Chord => field.is_valuable(self.index),
        }
    }
}
