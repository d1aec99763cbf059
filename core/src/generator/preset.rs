use super::*;

/// Fixed layout, for replaying recorded games and building boards by hand.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMinefieldGenerator {
    mines: Vec<CellIndex>,
}

impl PresetMinefieldGenerator {
    pub fn new(mines: impl IntoIterator<Item = CellIndex>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinefieldGenerator for PresetMinefieldGenerator {
    fn generate(
        &mut self,
        _rng: &mut dyn RngCore,
        _candidates: &[CellIndex],
        _mines: usize,
    ) -> Result<Vec<CellIndex>> {
        Ok(self.mines.clone())
    }
}
