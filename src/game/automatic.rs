//! Double-click moves and the sweep that promotes exposed cards to the foundations.

use tracing::{debug, instrument, trace};

use crate::cards::Suit;
use crate::holder::{CardId, Holder, COLUMNS, FREE_CELLS};

use super::Game;

impl Game {
    /// Sends `card` somewhere useful: its foundation, else the first column that takes
    /// it, else (single cards only) the first empty freecell.
    #[instrument(level = "debug", skip(self), fields(card = %card.card()))]
    pub fn automatic_move(&mut self, card: CardId) {
        if self.try_automatic_ace_move(Some(card)) {
            return;
        }

        for i in 0..COLUMNS {
            let bottom = self.exposed(Holder::Column(i));
            if self.can_stack_card(bottom, card)
                && self.has_enough_freecells(self.count_children(card))
            {
                self.set_parent(card, bottom);
                return;
            }
        }

        if self.card_state(card).child.is_none() && self.is_movable(card) {
            if let Some(i) = (0..FREE_CELLS).find(|&i| self.is_vacant(Holder::FreeCell(i))) {
                self.set_parent(card, Holder::FreeCell(i));
                return;
            }
        }
        trace!(target: "moves", "no automatic move available");
    }

    /// With a card: moves it onto the first foundation that accepts it. Without one:
    /// runs the foundation sweep. Returns whether anything was promoted.
    pub fn try_automatic_ace_move(&mut self, card: Option<CardId>) -> bool {
        let Some(card) = card else {
            return self.sweep_to_foundations();
        };
        for suit in Suit::ALL {
            let holder = self.exposed(Holder::Foundation(suit));
            if self.can_stack_card(holder, card) {
                self.unselect_card();
                self.select_card(card);
                self.select_holder(holder);
                debug!(target: "moves", card = %card.card(), "promoted to foundation");
                return true;
            }
        }
        false
    }

    /// Promotes exposed column cards until a full pass over the columns promotes
    /// nothing. Returns whether any card was promoted.
    pub fn sweep_to_foundations(&mut self) -> bool {
        if self.sweeping {
            return false;
        }
        self.sweeping = true;
        let mut promoted_any = false;
        loop {
            let mut promoted = false;
            for i in 0..COLUMNS {
                if let Holder::Card(bottom) = self.exposed(Holder::Column(i)) {
                    promoted |= self.try_automatic_ace_move(Some(bottom));
                }
            }
            if !promoted {
                break;
            }
            promoted_any = true;
        }
        self.sweeping = false;
        if promoted_any {
            self.check_won();
        }
        promoted_any
    }
}
