use alloc::collections::VecDeque;
use alloc::vec::Vec;

use hashbrown::HashSet;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Mines not placed yet
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Board contents and everything a player can see of them.
///
/// Mines are placed on the first reveal. Afterwards the field only changes through [`MineField::apply`], and every
/// change is queued as a [`FieldEvent`] until drained with [`MineField::take_events`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    config: GameConfig,
    geometry: BoardGeometry,
    base: CellMap<BaseCell>,
    view: CellMap<ViewState>,
    /// Hidden neighbors per cell.
    unknown: CellMap<u8>,
    /// Flagged neighbors per cell.
    flags: CellMap<u8>,
    mine_indexes: Vec<CellIndex>,
    hidden_count: usize,
    revealed_count: CellCount,
    flagged_count: CellCount,
    steps: u32,
    guesses: u32,
    status: GameStatus,
    last_index: CellIndex,
    #[serde(skip)]
    events: Vec<FieldEvent>,
}

impl MineField {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let geometry = BoardGeometry::new(config.size);
        let mut unknown = CellMap::from_elem(config.size, 0);
        for index in 0..geometry.total_cells() {
            unknown[index] = geometry.neighbors(index).len() as u8;
        }

        Ok(Self {
            config,
            base: CellMap::from_elem(config.size, BaseCell::default()),
            view: CellMap::from_elem(config.size, ViewState::Hidden),
            unknown,
            flags: CellMap::from_elem(config.size, 0),
            mine_indexes: Vec::new(),
            hidden_count: geometry.total_cells(),
            revealed_count: 0,
            flagged_count: 0,
            steps: 0,
            guesses: 0,
            status: GameStatus::NotStarted,
            last_index: geometry.center(),
            events: Vec::new(),
            geometry,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn view_at(&self, index: CellIndex) -> ViewState {
        self.view[index]
    }

    /// Every cell's visible state, as a `[y, x]` grid.
    pub fn view(&self) -> &CellMap<ViewState> {
        &self.view
    }

    /// Ground truth for a cell; meaningless before mines are placed.
    pub fn base_at(&self, index: CellIndex) -> BaseCell {
        self.base[index]
    }

    pub fn unknown_around(&self, index: CellIndex) -> u8 {
        self.unknown[index]
    }

    pub fn flags_around(&self, index: CellIndex) -> u8 {
        self.flags[index]
    }

    /// Revealed and still bordering at least one hidden cell.
    pub fn is_valuable(&self, index: CellIndex) -> bool {
        matches!(self.view[index], ViewState::Revealed(_)) && self.unknown[index] > 0
    }

    pub fn mine_indexes(&self) -> &[CellIndex] {
        &self.mine_indexes
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Moves applied so far, including the first reveal.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn guesses(&self) -> u32 {
        self.guesses
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    /// Cell of the most recent move; detonation and win sweeps spiral out from here.
    pub fn last_index(&self) -> CellIndex {
        self.last_index
    }

    /// Hands over the events produced since the previous call.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        core::mem::take(&mut self.events)
    }

    /// Lays out the mines so that `first_index` and its neighbors are all safe.
    ///
    /// Nothing changes unless the whole layout is accepted.
    pub fn place_mines(
        &mut self,
        first_index: CellIndex,
        generator: &mut dyn MinefieldGenerator,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        assert_eq!(
            self.status,
            GameStatus::NotStarted,
            "mines are already placed"
        );

        let safe_region = self.geometry.safe_region(first_index);
        let candidates: Vec<CellIndex> = (0..self.geometry.total_cells())
            .filter(|index| !safe_region.contains(index))
            .collect();
        let mines = usize::from(self.config.mines);

        if candidates.len() < mines {
            log::warn!(
                "Cannot keep the first click safe, requested {} mines but only {} cells are available",
                mines,
                candidates.len()
            );
            return Err(GameError::InitMineMap {
                mines: self.config.mines,
                available: candidates.len() as CellCount,
            });
        }

        let mut mine_indexes = generator.generate(rng, &candidates, mines)?;
        let mut seen = HashSet::with_capacity(mine_indexes.len());
        let valid = mine_indexes.len() == mines
            && mine_indexes.iter().all(|&index| {
                index < self.geometry.total_cells()
                    && !safe_region.contains(&index)
                    && seen.insert(index)
            });
        if !valid {
            log::warn!("Rejected mine layout {:?}", mine_indexes);
            return Err(GameError::InvalidMineLayout);
        }
        mine_indexes.sort_unstable();

        for &mine in &mine_indexes {
            self.base[mine] = BaseCell::Mine;
        }
        for index in 0..self.geometry.total_cells() {
            if self.base[index].is_mine() {
                continue;
            }
            let count = self
                .geometry
                .neighbors(index)
                .iter()
                .filter(|&&neighbor| self.base[neighbor].is_mine())
                .count();
            self.base[index] = BaseCell::Clear(count as u8);
        }

        log::debug!(
            "Placed {} mines, first click at {:?}",
            mine_indexes.len(),
            self.geometry.index_to_coord(first_index)
        );
        self.mine_indexes = mine_indexes;
        self.last_index = first_index;
        self.status = GameStatus::InProgress;
        Ok(())
    }

    /// Applies one move and then checks for a win.
    ///
    /// Panics when the game is not in progress or the target is in the wrong state for the move.
    pub fn apply(&mut self, mv: Move) {
        assert_eq!(
            self.status,
            GameStatus::InProgress,
            "move {mv:?} applied outside of a running game"
        );
        log::trace!("Applying {:?}", mv);

        self.steps += 1;
        self.last_index = mv.index;
        match mv.mode {
            Mode::Reveal => {
                self.assert_hidden(mv);
                self.reveal_blank(mv.index);
            }
            Mode::RandomReveal => {
                self.assert_hidden(mv);
                self.guesses += 1;
                self.reveal_blank(mv.index);
            }
            Mode::Chord => {
                assert!(
                    matches!(self.view[mv.index], ViewState::Revealed(_)),
                    "chord on unrevealed cell: {mv:?}"
                );
                self.chord(mv.index);
            }
            Mode::Flag => {
                self.assert_hidden(mv);
                self.flag(mv.index);
            }
        }
        self.check_win();
    }

    fn assert_hidden(&self, mv: Move) {
        assert!(
            self.view[mv.index].is_hidden(),
            "{mv:?} targets a {:?} cell",
            self.view[mv.index]
        );
    }

    fn reveal_blank(&mut self, index: CellIndex) {
        match self.base[index] {
            BaseCell::Mine => self.detonate(&[index]),
            BaseCell::Clear(0) => self.expand_zero(index),
            BaseCell::Clear(_) => self.reveal_single(index),
        }
    }

    /// Reveals the connected zero region around `index` plus its hidden border, in spiral order.
    fn expand_zero(&mut self, index: CellIndex) {
        let mut region = HashSet::new();
        region.insert(index);
        let mut to_visit = VecDeque::from([index]);

        while let Some(visit) = to_visit.pop_front() {
            for &neighbor in self.geometry.neighbors(visit) {
                if self.base[neighbor] == BaseCell::Clear(0)
                    && self.view[neighbor].is_hidden()
                    && region.insert(neighbor)
                {
                    to_visit.push_back(neighbor);
                }
            }
        }

        let border: Vec<CellIndex> = region
            .iter()
            .flat_map(|&zero| self.geometry.neighbors(zero).iter().copied())
            .filter(|&neighbor| self.view[neighbor].is_hidden())
            .collect();
        region.extend(border);
        log::trace!(
            "Flood-fill from {:?} opens {} cells",
            self.geometry.index_to_coord(index),
            region.len()
        );

        for cell in self.geometry.ordered_in_spiral(index, region) {
            self.reveal_single(cell);
        }
    }

    fn reveal_single(&mut self, index: CellIndex) {
        let BaseCell::Clear(count) = self.base[index] else {
            panic!("cell {index} holds a mine");
        };
        debug_assert!(self.view[index].is_hidden());

        self.view[index] = ViewState::Revealed(count);
        self.hidden_count -= 1;
        self.revealed_count += 1;
        for &neighbor in self.geometry.neighbors(index) {
            self.unknown[neighbor] -= 1;
        }
        self.events.push(FieldEvent::Revealed { index, count });
    }

    /// Opens every hidden neighbor once the flag count matches the number; a misplaced flag sets off the mines it
    /// failed to cover.
    fn chord(&mut self, index: CellIndex) {
        let BaseCell::Clear(count) = self.base[index] else {
            return;
        };
        if self.flags[index] != count {
            return;
        }

        let unflagged_mines: Vec<CellIndex> = self
            .geometry
            .neighbors(index)
            .iter()
            .copied()
            .filter(|&neighbor| self.base[neighbor].is_mine() && !self.view[neighbor].is_flagged())
            .collect();
        if !unflagged_mines.is_empty() {
            self.detonate(&unflagged_mines);
            return;
        }

        let neighbors = self.geometry.neighbors(index).to_vec();
        for neighbor in neighbors {
            if self.view[neighbor].is_hidden() {
                self.reveal_blank(neighbor);
            }
        }
    }

    fn flag(&mut self, index: CellIndex) {
        self.view[index] = ViewState::Flagged;
        self.hidden_count -= 1;
        self.flagged_count += 1;
        for &neighbor in self.geometry.neighbors(index) {
            self.unknown[neighbor] -= 1;
            self.flags[neighbor] += 1;
            debug_assert!(
                usize::from(self.unknown[neighbor] + self.flags[neighbor])
                    <= self.geometry.neighbors(neighbor).len()
            );
        }
        self.events.push(FieldEvent::Flagged { index });
    }

    /// Won once every hidden cell must be a mine; those cells get flagged.
    fn check_win(&mut self) {
        if self.status != GameStatus::InProgress || self.hidden_count as isize != self.mines_left() {
            return;
        }

        for index in self.geometry.spiral(self.last_index) {
            if self.view[index].is_hidden() {
                self.flag(index);
            }
        }
        self.status = GameStatus::Won;
        self.events.push(FieldEvent::Won);
        log::debug!("Won after {} steps and {} guesses", self.steps, self.guesses);
    }

    fn detonate(&mut self, triggers: &[CellIndex]) {
        for index in self.geometry.spiral(self.last_index) {
            let state = match (self.base[index], self.view[index]) {
                _ if triggers.contains(&index) => ViewState::DetonatedMine,
                (BaseCell::Mine, view) if !view.is_flagged() => ViewState::OtherMine,
                (BaseCell::Clear(_), ViewState::Flagged) => ViewState::WrongFlag,
                _ => continue,
            };
            self.view[index] = state;
            self.events.push(FieldEvent::Detonated { index, state });
        }
        self.status = GameStatus::Lost;
        self.events.push(FieldEvent::Lost);
        log::debug!(
            "Lost at {:?} after {} steps and {} guesses",
            self.geometry.index_to_coord(self.last_index),
            self.steps,
            self.guesses
        );
    }

    #[cfg(test)]
    pub(crate) fn place_mines_with(
        &mut self,
        first_index: CellIndex,
        mines: impl IntoIterator<Item = CellIndex>,
    ) -> Result<()> {
        use rand::SeedableRng;

        self.place_mines(
            first_index,
            &mut PresetMinefieldGenerator::new(mines),
            &mut rand::rngs::SmallRng::seed_from_u64(0),
        )
    }
}
