use alloc::vec::Vec;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::*;
pub use pending::*;

mod pending;

/// Deterministic solver: plays only moves that follow from the visible numbers, and guesses uniformly at random when
/// nothing does.
///
/// Deductions are produced by scanning the board in spiral order around the cell where the previous deduction was
/// found, which keeps the solver working in the area it was last active in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InferenceEngine {
    pending: PendingMoves,
    anchor: Option<CellIndex>,
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self {
            pending: PendingMoves::new(),
            anchor: None,
        }
    }

    pub fn pending(&self) -> &PendingMoves {
        &self.pending
    }

    /// Where the next scan will start.
    pub fn anchor(&self) -> Option<CellIndex> {
        self.anchor
    }

    /// Always the board center.
    pub fn first_move(&mut self, field: &MineField) -> Move {
        let center = field.geometry().center();
        self.anchor = Some(center);
        Move::reveal(center)
    }

    /// A queued deduction whose target is still hidden, else the first deduction of a fresh scan, else a guess.
    ///
    /// Queued entries only count while their target is hidden, so a queued chord is always dropped; chords are
    /// played only when a scan produces one at the front of the queue.
    pub fn next_move<R: Rng + ?Sized>(&mut self, field: &MineField, rng: &mut R) -> Move {
        if let Some(mv) = self
            .pending
            .pop_valid(|mv| field.view_at(mv.index).is_hidden())
        {
            return mv;
        }

        let anchor = self.anchor.unwrap_or_else(|| field.geometry().center());
        for index in field.geometry().spiral(anchor) {
            self.infer_single(field, index);
            // the queue was empty before this scan, so the front entry reflects the current board
            if let Some(mv) = self.pending.pop() {
                self.anchor = Some(index);
                return mv;
            }
        }

        self.random_choice(field, rng)
    }

    /// Queues every move that follows from the number at `index`, alone or paired with a nearby number.
    pub fn infer_single(&mut self, field: &MineField, index: CellIndex) {
        if !field.is_valuable(index) {
            return;
        }
        let ViewState::Revealed(count) = field.view_at(index) else {
            return;
        };
        let geometry = field.geometry();
        let flags = field.flags_around(index);
        let unknown = field.unknown_around(index);

        // all mines accounted for, the rest is safe
        if flags == count {
            self.pending.push(Move::chord(index));
        }
        // every hidden neighbor is needed to reach the number
        if unknown + flags == count {
            self.pending.extend(
                geometry
                    .neighbors(index)
                    .iter()
                    .filter(|&&neighbor| field.view_at(neighbor).is_hidden())
                    .map(|&neighbor| Move::flag(neighbor)),
            );
        }

        for &other in geometry.wide_neighbors(index) {
            if field.is_valuable(other) {
                self.pairwise(field, index, other);
            }
        }
    }

    /// Subset rule for two numbers `a` and `b` with overlapping neighborhoods.
    ///
    /// When the difference between their remaining mine counts equals the number of hidden cells only `a` touches,
    /// those cells are all mines and the hidden cells only `b` touches are all safe.
    pub fn pairwise(&mut self, field: &MineField, a: CellIndex, b: CellIndex) {
        let (Some(count_a), Some(count_b)) = (
            field.view_at(a).revealed_count(),
            field.view_at(b).revealed_count(),
        ) else {
            return;
        };
        let geometry = field.geometry();
        let is_hidden = |cell: &CellIndex| field.view_at(*cell).is_hidden();

        let shared = geometry.shared_neighbors(a, b).filter(is_hidden).count() as i16;
        let exclusive_a = i16::from(field.unknown_around(a)) - shared;
        let mine_difference = i16::from(count_a) - i16::from(count_b);
        let flag_difference = i16::from(field.flags_around(a)) - i16::from(field.flags_around(b));
        if mine_difference != exclusive_a + flag_difference {
            return;
        }

        self.pending.extend(
            geometry
                .exclusive_neighbors(a, b)
                .filter(is_hidden)
                .map(Move::flag),
        );
        self.pending.extend(
            geometry
                .exclusive_neighbors(b, a)
                .filter(is_hidden)
                .map(Move::reveal),
        );
    }

    /// Uniform pick among hidden cells.
    fn random_choice<R: Rng + ?Sized>(&mut self, field: &MineField, rng: &mut R) -> Move {
        let hidden: Vec<CellIndex> = (0..field.geometry().total_cells())
            .filter(|&index| field.view_at(index).is_hidden())
            .collect();
        assert!(!hidden.is_empty(), "no hidden cell left to guess");

        let index = hidden[rng.random_range(0..hidden.len())];
        log::debug!(
            "No deduction available, guessing {:?} out of {} hidden cells",
            field.geometry().index_to_coord(index),
            hidden.len()
        );
        self.anchor = Some(index);
        Move::random_reveal(index)
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for InferenceEngine {
    fn first_move(&mut self, field: &MineField) -> Result<Move> {
        Ok(InferenceEngine::first_move(self, field))
    }

    fn next_move(&mut self, field: &MineField, rng: &mut dyn RngCore) -> Result<Move> {
        Ok(InferenceEngine::next_move(self, field, rng))
    }
}
