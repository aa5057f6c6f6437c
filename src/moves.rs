//! Move records and the undo/redo history built from them.

use circular_buffer::CircularBuffer;

use crate::holder::{CardId, Holder};

pub const UNDO_LEVELS: usize = 1000;

/// One relocation of a card (and everything stacked on it).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    pub card: CardId,
    pub parent: Holder,
    pub previous_parent: Holder,
}

impl Move {
    pub fn new(card: CardId, parent: Holder, previous_parent: Holder) -> Move {
        Move { card, parent, previous_parent }
    }
}

/// Undo and redo stacks. Both are bounded; pushing onto a full stack drops its oldest entry.
pub struct History {
    undo: CircularBuffer<UNDO_LEVELS, Move>,
    redo: CircularBuffer<UNDO_LEVELS, Move>,
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}

impl History {
    pub fn new() -> History {
        History {
            undo: CircularBuffer::new(),
            redo: CircularBuffer::new(),
        }
    }

    /// Records a freshly played move. Anything that was undone can no longer be redone.
    pub fn record(&mut self, mv: Move) {
        self.undo.push_back(mv);
        self.redo.clear();
    }

    pub fn pop_undo(&mut self) -> Option<Move> {
        self.undo.pop_back()
    }

    pub fn pop_redo(&mut self) -> Option<Move> {
        self.redo.pop_back()
    }

    pub fn push_undo(&mut self, mv: Move) {
        self.undo.push_back(mv);
    }

    pub fn push_redo(&mut self, mv: Move) {
        self.redo.push_back(mv);
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn last(&self) -> Option<&Move> {
        self.undo.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};

    fn mv(rank: u8) -> Move {
        Move::new(
            CardId::of(Card { rank, suit: Suit::Hearts }),
            Holder::FreeCell(0),
            Holder::Column(0),
        )
    }

    #[test]
    fn recording_clears_redo() {
        let mut history = History::new();
        history.record(mv(1));
        history.record(mv(2));
        let undone = history.pop_undo().unwrap();
        history.push_redo(undone);
        assert_eq!(history.redo_len(), 1);

        history.record(mv(3));
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.last(), Some(&mv(3)));
    }

    #[test]
    fn oldest_moves_fall_off_a_full_history() {
        let mut history = History::new();
        for i in 0..UNDO_LEVELS + 5 {
            history.record(mv((i % 13) as u8 + 1));
        }
        assert_eq!(history.undo_len(), UNDO_LEVELS);
    }

    #[test]
    fn popping_an_empty_history_is_none() {
        let mut history = History::new();
        assert_eq!(history.pop_undo(), None);
        assert_eq!(history.pop_redo(), None);
    }
}
