#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use event::*;
pub use field::*;
pub use generator::*;
pub use geometry::*;
pub use inference::*;
pub use moves::*;
pub use replay::*;
pub use session::*;
pub use spiral::*;
pub use summary::*;
pub use types::*;

mod cell;
mod error;
mod event;
mod field;
mod generator;
mod geometry;
mod inference;
mod moves;
mod replay;
mod session;
mod spiral;
mod summary;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the board to at least one cell and the mines to at most one per cell.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let mines = mines.min(mult(size_x, size_y));
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Checks a config that did not go through [`GameConfig::new`], e.g. one read from a recording.
    ///
    /// Whether the mines fit around the first click is only known once it happens, see [`MineField::place_mines`].
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        if self.mines > self.total_cells() {
            return Err(GameError::InitMineMap {
                mines: self.mines,
                available: self.total_cells(),
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::expert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_values() {
        assert_eq!(GameConfig::new((0, 4), 3).size, (1, 4));
        assert_eq!(GameConfig::new((3, 3), 20).mines, 9);
        assert_eq!(GameConfig::new((3, 3), 0).mines, 0);
    }

    #[test]
    fn validate_rejects_unclamped_configs() {
        assert_eq!(
            GameConfig::new_unchecked((0, 5), 1).validate(),
            Err(GameError::InvalidBoardSize)
        );
        assert_eq!(
            GameConfig::new_unchecked((2, 2), 5).validate(),
            Err(GameError::InitMineMap {
                mines: 5,
                available: 4
            })
        );
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert!(MineField::new(GameConfig::new_unchecked((4, 0), 0)).is_err());
    }

    #[test]
    fn presets_match_the_classic_boards() {
        assert_eq!(GameConfig::beginner().total_cells(), 81);
        assert_eq!(GameConfig::intermediate().total_cells(), 256);
        assert_eq!(GameConfig::expert(), GameConfig::default());
        assert_eq!(
            (GameConfig::expert().width(), GameConfig::expert().height()),
            (30, 16)
        );
    }
}
