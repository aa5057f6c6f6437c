//! Everything a card can rest on, plus the board geometry those holders present.

use crate::cards::{Card, Suit, DECK_SIZE, RANKS};

pub const FREE_CELLS: usize = 4;
pub const FOUNDATIONS: usize = Suit::ALL.len();
pub const COLUMNS: usize = 8;

pub const CARD_WIDTH: i32 = 150;
pub const CARD_HEIGHT: i32 = 210;
pub const SPACING: i32 = 15;

/// Vertical offset between a tableau card and the card stacked on it.
pub const CHILD_OFFSET: i32 = CARD_HEIGHT / 6;

/// Stable handle of one of the 52 cards. The handle of a card never changes,
/// so it can be derived from the card's identity and back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(u8);

impl CardId {
    pub fn of(card: Card) -> CardId {
        CardId((card.suit.index() * RANKS as usize + card.rank as usize - 1) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn card(self) -> Card {
        Card {
            rank: self.0 % RANKS + 1,
            suit: Suit::ALL[(self.0 / RANKS) as usize],
        }
    }

    pub fn all() -> impl Iterator<Item = CardId> {
        (0..DECK_SIZE as u8).map(CardId)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Holder {
    FreeCell(usize),
    Foundation(Suit),
    Column(usize),
    Card(CardId),
}

impl Holder {
    /// The 16 holders that are not cards, freecells first.
    pub fn roots() -> impl Iterator<Item = Holder> {
        (0..FREE_CELLS)
            .map(Holder::FreeCell)
            .chain(Suit::ALL.into_iter().map(Holder::Foundation))
            .chain((0..COLUMNS).map(Holder::Column))
    }

    pub fn is_root(self) -> bool {
        !matches!(self, Holder::Card(_))
    }

    /// Board position of a root holder. Cards position themselves relative to their parent.
    pub fn root_position(self) -> Option<Point> {
        let pitch = CARD_WIDTH + SPACING;
        match self {
            Holder::FreeCell(i) => Some(Point::new(i as i32 * pitch + 2 * SPACING, SPACING)),
            Holder::Foundation(suit) => Some(Point::new(
                (5 + suit.index() as i32) * pitch + 2 * SPACING,
                SPACING,
            )),
            Holder::Column(i) => Some(Point::new(
                (2 * i as i32 + 1) * pitch / 2 + 2 * SPACING,
                2 * SPACING + CARD_HEIGHT,
            )),
            Holder::Card(_) => None,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_ids_map_one_to_one() {
        for id in CardId::all() {
            assert_eq!(CardId::of(id.card()), id);
        }
        assert_eq!(CardId::all().count(), DECK_SIZE);
    }

    #[test]
    fn roots_are_laid_out_left_to_right() {
        let freecell = Holder::FreeCell(3).root_position().unwrap();
        let foundation = Holder::Foundation(Suit::Clubs).root_position().unwrap();
        assert!(freecell.x < foundation.x);
        assert_eq!(freecell.y, foundation.y);

        let first = Holder::Column(0).root_position().unwrap();
        let last = Holder::Column(COLUMNS - 1).root_position().unwrap();
        assert_eq!(first, Point::new(112, 240));
        assert_eq!(last.x - first.x, 7 * (CARD_WIDTH + SPACING));
        assert_eq!(Holder::roots().count(), FREE_CELLS + FOUNDATIONS + COLUMNS);
    }
}
