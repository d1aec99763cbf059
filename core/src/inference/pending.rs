use alloc::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

/// FIFO of deduced moves.
///
/// Entries may go stale while they wait: a later move can open or flag their target. Validity is checked only when
/// popping with [`PendingMoves::pop_valid`], never on push or when the board changes, so stale entries simply sit in
/// the queue until they reach the front.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingMoves {
    queue: VecDeque<Move>,
}

impl PendingMoves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        self.queue.push_back(mv);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.queue.iter()
    }

    /// Front entry, without any validity check.
    pub fn pop(&mut self) -> Option<Move> {
        self.queue.pop_front()
    }

    /// Pops from the front until an entry passes `is_valid`, dropping the stale ones on the way.
    pub fn pop_valid(&mut self, mut is_valid: impl FnMut(&Move) -> bool) -> Option<Move> {
        while let Some(mv) = self.queue.pop_front() {
            if is_valid(&mv) {
                return Some(mv);
            }
            log::trace!("Dropping stale {:?}", mv);
        }
        None
    }
}

impl Extend<Move> for PendingMoves {
    fn extend<T: IntoIterator<Item = Move>>(&mut self, moves: T) {
        self.queue.extend(moves);
    }
}
