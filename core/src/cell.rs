use serde::{Deserialize, Serialize};

/// Fixed content of a cell once mines are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseCell {
    Mine,
    /// Number of mines among the neighbors, `0..=8`.
    Clear(u8),
}

impl BaseCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for BaseCell {
    fn default() -> Self {
        Self::Clear(0)
    }
}

/// Player-visible state of a cell.
///
/// A cell only ever leaves `Hidden`; the last three states are assigned when a mine detonates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    Hidden,
    Revealed(u8),
    Flagged,
    DetonatedMine,
    OtherMine,
    WrongFlag,
}

impl ViewState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn revealed_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Hidden
    }
}
