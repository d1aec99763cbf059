use alloc::vec::Vec;

use rand::RngCore;

use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Picks mine cells for a new field.
///
/// `candidates` lists every cell outside the first click's safe region in ascending order. The returned layout is
/// validated by [`MineField::place_mines`], so a generator may hand back whatever it likes.
pub trait MinefieldGenerator {
    fn generate(
        &mut self,
        rng: &mut dyn RngCore,
        candidates: &[CellIndex],
        mines: usize,
    ) -> Result<Vec<CellIndex>>;
}
