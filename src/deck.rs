//! The pile of undealt cards and its seeded shuffle.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cards::{new_standard_deck, DECK_SIZE};
use crate::holder::CardId;

/// Cards not yet dealt, drawn from the back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<CardId>,
}

impl Deck {
    pub fn new() -> Deck {
        let mut deck = Deck { cards: Vec::with_capacity(DECK_SIZE) };
        deck.build();
        deck
    }

    /// Discards whatever the deck holds and refills it with the full set, ordered
    /// by suit and then by rank.
    pub fn build(&mut self) {
        self.cards.clear();
        self.cards.extend(new_standard_deck().into_iter().map(CardId::of));
    }

    /// Reorders the cards from `seed`. ChaCha8 output is specified independently
    /// of platform and word size, so a seed always yields the same order.
    pub fn shuffle(&mut self, seed: u32) {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
        self.cards.shuffle(&mut rng);
    }

    pub fn draw_card(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    pub fn push_card(&mut self, card: CardId) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_order() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle(1_000_000);
        b.shuffle(1_000_000);
        assert_eq!(a, b);

        let mut c = Deck::new();
        c.shuffle(1_000_001);
        assert_ne!(a, c);
    }

    #[test]
    fn draw_takes_from_the_back() {
        let mut deck = Deck::new();
        let last = *deck.cards().last().unwrap();
        assert_eq!(deck.draw_card(), Some(last));
        assert_eq!(deck.len(), DECK_SIZE - 1);
        deck.push_card(last);
        assert_eq!(deck.len(), DECK_SIZE);
    }

    #[test]
    fn build_restores_a_full_ordered_deck() {
        let mut deck = Deck::new();
        deck.shuffle(42);
        while deck.draw_card().is_some() {}
        assert!(deck.is_empty());
        deck.build();
        assert_eq!(deck, Deck::new());
    }
}
