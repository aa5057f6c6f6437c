//! Card selection and the click and drop intents built on it.

use tracing::{debug, trace};

use crate::events::Change;
use crate::holder::{CardId, Holder};

use super::Game;

impl Game {
    pub fn selected_card(&self) -> Option<CardId> {
        self.selected
    }

    pub fn unselect_card(&mut self) {
        if let Some(card) = self.selected.take() {
            self.cards[card.index()].selected = false;
            self.changes.push(Change::Selected { card, selected: false });
        }
    }

    pub fn set_selected_card(&mut self, card: CardId) {
        if self.selected == Some(card) {
            return;
        }
        self.unselect_card();
        self.selected = Some(card);
        self.cards[card.index()].selected = true;
        self.changes.push(Change::Selected { card, selected: true });
    }

    /// Selection state machine. Picking the selected card again drops the selection;
    /// picking a card that can take the selected one moves it there; anything else
    /// becomes the new selection.
    pub fn select_card(&mut self, card: CardId) {
        match self.selected {
            Some(selected) if selected == card => self.unselect_card(),
            Some(selected) if self.can_stack_card(Holder::Card(card), selected) => {
                self.set_parent(selected, Holder::Card(card));
            }
            previous => {
                if let Some(previous) = previous {
                    self.changes.push(Change::PositionReset { card: previous });
                }
                self.set_selected_card(card);
            }
        }
    }

    /// A click on a card. It either receives the current selection, toggles it off,
    /// or becomes the selection if it can be picked up with its run.
    pub fn select_or_activate_card(&mut self, card: CardId) {
        let receives = self
            .selected
            .is_some_and(|selected| selected == card || self.can_stack_card(Holder::Card(card), selected));
        if receives || self.is_pickable(card) {
            self.select_card(card);
        } else {
            trace!(target: "rules", card = %card.card(), "card cannot be picked up");
        }
    }

    /// A click on any holder. Empty holders and the piles under them take the
    /// current selection when the rules allow it.
    pub fn select_holder(&mut self, holder: Holder) {
        match holder {
            Holder::Card(card) => self.select_or_activate_card(card),
            root => {
                let Some(selected) = self.selected else {
                    return;
                };
                if self.can_stack_card(root, selected) {
                    let target = self.exposed(root);
                    self.set_parent(selected, target);
                }
            }
        }
    }

    /// The end of a drag: `card` dropped on `target`. Refused drops leave the board
    /// untouched and ask the view to put the card back.
    pub fn request_move(&mut self, card: CardId, target: Holder) -> bool {
        if self.is_pickable(card) && self.can_stack_card(target, card) {
            let target = if target.is_root() { self.exposed(target) } else { target };
            self.unselect_card();
            self.set_parent(card, target);
            true
        } else {
            debug!(target: "rules", card = %card.card(), to = ?target, "move refused");
            self.changes.push(Change::PositionReset { card });
            false
        }
    }
}
