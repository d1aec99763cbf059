use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::*;

/// End-of-game record handed to recording and statistics collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub config: GameConfig,
    pub status: GameStatus,
    pub cells_revealed: CellCount,
    pub flags_placed: CellCount,
    pub total_steps: u32,
    pub guess_count: u32,
    pub elapsed: Duration,
    pub mine_indexes: Vec<CellIndex>,
    pub moves: Vec<Move>,
}

impl GameSummary {
    /// Cells that are no longer hidden.
    pub fn progress(&self) -> CellCount {
        self.cells_revealed + self.flags_placed
    }

    pub fn won_without_guessing(&self) -> bool {
        self.status == GameStatus::Won && self.guess_count == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Which finished games a recorder keeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordPolicy {
    All,
    WinsOnly,
    LossesOnly,
    #[default]
    Never,
}

impl RecordPolicy {
    /// Games still running are never recorded.
    pub fn should_record(self, status: GameStatus) -> bool {
        match (self, status) {
            (_, GameStatus::NotStarted | GameStatus::InProgress) => false,
            (Self::All, _) => true,
            (Self::WinsOnly, GameStatus::Won) => true,
            (Self::LossesOnly, GameStatus::Lost) => true,
            _ => false,
        }
    }
}
