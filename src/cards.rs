//! Card identities: suits, ranks, colors and the standard 52-card set

use std::fmt;

pub const RANKS: u8 = 13;
pub const SUITS: u8 = 4;
pub const DECK_SIZE: usize = RANKS as usize * SUITS as usize;

pub const ACE: u8 = 1;
pub const KING: u8 = 13;

/// The four suits, in the order the deck is built and the foundations are laid out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; SUITS as usize] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// A playing card with a rank and a suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    /// The rank of the card, from 1 (Ace) to 13 (King).
    pub rank: u8,
    pub suit: Suit,
}

impl Card {
    pub fn color(&self) -> Color {
        self.suit.color()
    }

    pub fn rank_name(&self) -> &'static str {
        const RANK_STRINGS: [&str; RANKS as usize + 1] =
            ["?", "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"];
        RANK_STRINGS.get(self.rank as usize).copied().unwrap_or("?")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank_name(), self.suit.symbol())
    }
}

/// Creates a standard deck of playing cards, suit by suit, Ace to King.
pub fn new_standard_deck() -> Vec<Card> {
    (0..RANKS * SUITS)
        .map(|i| Card {
            rank: i % RANKS + 1,
            suit: Suit::ALL[(i / RANKS) as usize],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_every_card_once() {
        let deck = new_standard_deck();
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(unique.len(), DECK_SIZE);
        assert_eq!(deck[0], Card { rank: ACE, suit: Suit::Clubs });
        assert_eq!(deck[DECK_SIZE - 1], Card { rank: KING, suit: Suit::Spades });
    }

    #[test]
    fn hearts_and_diamonds_are_red() {
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
    }

    #[test]
    fn display_uses_rank_and_suit_symbol() {
        assert_eq!(Card { rank: 10, suit: Suit::Hearts }.to_string(), "10♥");
        assert_eq!(Card { rank: 12, suit: Suit::Spades }.to_string(), "Q♠");
    }
}
