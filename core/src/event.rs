use alloc::boxed::Box;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// State change emitted by [`MineField`], in the order it happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEvent {
    Revealed { index: CellIndex, count: u8 },
    Flagged { index: CellIndex },
    /// Set once per affected cell when a mine goes off; `state` is one of the end-of-game states.
    Detonated { index: CellIndex, state: ViewState },
    Won,
    Lost,
}

impl FieldEvent {
    /// The cell this event updated and its new state.
    pub const fn cell_update(&self) -> Option<(CellIndex, ViewState)> {
        match *self {
            Self::Revealed { index, count } => Some((index, ViewState::Revealed(count))),
            Self::Flagged { index } => Some((index, ViewState::Flagged)),
            Self::Detonated { index, state } => Some((index, state)),
            Self::Won | Self::Lost => None,
        }
    }
}

/// Hooks for renderers, recorders and anything else following a game.
///
/// Every hook defaults to doing nothing. Observers compose through tuples, boxes and vectors rather than by wrapping
/// the session.
pub trait GameObserver {
    /// Called before `mv` is applied.
    fn on_move(&mut self, _mv: Move) {}

    fn on_reveal(&mut self, _index: CellIndex, _count: u8) {}

    fn on_flag(&mut self, _index: CellIndex) {}

    fn on_detonate(&mut self, _index: CellIndex, _state: ViewState) {}

    fn on_win(&mut self) {}

    fn on_loss(&mut self) {}

    fn notify(&mut self, event: &FieldEvent) {
        match *event {
            FieldEvent::Revealed { index, count } => self.on_reveal(index, count),
            FieldEvent::Flagged { index } => self.on_flag(index),
            FieldEvent::Detonated { index, state } => self.on_detonate(index, state),
            FieldEvent::Won => self.on_win(),
            FieldEvent::Lost => self.on_loss(),
        }
    }
}

impl GameObserver for () {}

impl<T: GameObserver + ?Sized> GameObserver for &mut T {
    fn on_move(&mut self, mv: Move) {
        (**self).on_move(mv)
    }

    fn notify(&mut self, event: &FieldEvent) {
        (**self).notify(event)
    }
}

impl<T: GameObserver + ?Sized> GameObserver for Box<T> {
    fn on_move(&mut self, mv: Move) {
        (**self).on_move(mv)
    }

    fn notify(&mut self, event: &FieldEvent) {
        (**self).notify(event)
    }
}

impl<A: GameObserver, B: GameObserver> GameObserver for (A, B) {
    fn on_move(&mut self, mv: Move) {
        self.0.on_move(mv);
        self.1.on_move(mv);
    }

    fn notify(&mut self, event: &FieldEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}

impl GameObserver for Vec<Box<dyn GameObserver>> {
    fn on_move(&mut self, mv: Move) {
        for observer in self.iter_mut() {
            observer.on_move(mv);
        }
    }

    fn notify(&mut self, event: &FieldEvent) {
        for observer in self.iter_mut() {
            observer.notify(event);
        }
    }
}

/// Records every event.
impl GameObserver for Vec<FieldEvent> {
    fn notify(&mut self, event: &FieldEvent) {
        self.push(*event);
    }
}
