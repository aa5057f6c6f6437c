//! Stacking legality and supermove capacity.

use crate::cards::ACE;
use crate::holder::{CardId, Holder, COLUMNS, FREE_CELLS};

use super::Game;

impl Game {
    /// Whether `candidate` may be placed on `holder` as its new top card. An occupied
    /// freecell, foundation or column defers to the card exposed on top of it.
    pub fn can_stack_card(&self, holder: Holder, candidate: CardId) -> bool {
        let holder = if holder.is_root() { self.exposed(holder) } else { holder };
        if holder == Holder::Card(candidate) || !self.is_vacant(holder) {
            return false;
        }
        let card = candidate.card();
        match holder {
            Holder::FreeCell(_) => {
                card.rank != ACE
                    && self.card_state(candidate).child.is_none()
                    && self.is_movable(candidate)
            }
            Holder::Foundation(suit) => {
                card.rank == ACE && card.suit == suit && self.is_movable(candidate)
            }
            Holder::Column(_) => self.is_movable(candidate),
            Holder::Card(parent) => {
                // Foundations take cards one at a time.
                if self.card_state(parent).on_foundation
                    && self.card_state(candidate).child.is_some()
                {
                    return false;
                }
                self.is_stackable(holder)
                    && self.is_movable(candidate)
                    && self.is_valid_parent_of(parent, candidate)
            }
        }
    }

    /// Whether cards may pile up on `holder`. A card is stackable when the holder
    /// at the bottom of its chain is.
    pub fn is_stackable(&self, holder: Holder) -> bool {
        match holder {
            Holder::FreeCell(_) => false,
            Holder::Foundation(_) | Holder::Column(_) => true,
            Holder::Card(card) => self.root_of(card).is_some_and(|root| self.is_stackable(root)),
        }
    }

    /// Whether `card` can be picked up together with everything stacked on it. Cards
    /// still in the deck are not in play.
    pub fn is_movable(&self, card: CardId) -> bool {
        let state = self.card_state(card);
        if state.parent.is_none() || state.on_foundation || state.scattered {
            return false;
        }
        if state.child.is_none() {
            return true;
        }
        let mut current = card;
        while let Some(child) = self.card_state(current).child {
            let child_state = self.card_state(child);
            if child_state.on_foundation
                || child_state.scattered
                || !self.is_valid_parent_of(current, child)
            {
                return false;
            }
            current = child;
        }
        self.has_enough_freecells(self.count_children(card) + 1)
    }

    /// The acceptance rule between two cards: ascending by suit on a foundation,
    /// descending by alternating color anywhere else.
    pub fn is_valid_parent_of(&self, parent: CardId, child: CardId) -> bool {
        let below = parent.card();
        let above = child.card();
        if self.card_state(parent).on_foundation {
            above.rank == below.rank + 1 && above.suit == below.suit
        } else {
            below.rank == above.rank + 1 && below.color() != above.color()
        }
    }

    pub fn is_valid_parent_of_all_children(&self, card: CardId) -> bool {
        self.chain_from(card)
            .windows(2)
            .all(|pair| self.is_valid_parent_of(pair[0], pair[1]))
    }

    pub fn count_children(&self, card: CardId) -> usize {
        self.chain(Holder::Card(card)).len()
    }

    pub fn count_free_cells(&self) -> usize {
        (0..FREE_CELLS)
            .filter(|&i| self.is_vacant(Holder::FreeCell(i)))
            .count()
    }

    pub fn count_empty_columns(&self) -> usize {
        (0..COLUMNS)
            .filter(|&i| self.is_vacant(Holder::Column(i)))
            .count()
    }

    /// Supermove capacity: each free cell holds one card of the run, the moved card
    /// itself adds one, and every empty column doubles the total. Relaxed mode lifts
    /// the limit.
    pub fn has_enough_freecells(&self, cards_to_move: usize) -> bool {
        if self.is_relaxed() {
            return true;
        }
        cards_to_move <= (self.count_free_cells() + 1) << self.count_empty_columns()
    }

    /// A card the player may grab: in play, movable, and sitting under a valid run.
    pub fn is_pickable(&self, card: CardId) -> bool {
        self.card_state(card).parent.is_some()
            && self.is_movable(card)
            && self.is_valid_parent_of_all_children(card)
    }
}
