//! Freecell rules engine: cards and the holders they rest on, stacking legality,
//! supermove capacity, automatic foundation moves, seeded deals and undo/redo.
//!
//! Drawing the board is left to the caller. It sends intents to [`Game`] and reads
//! the queued [`Change`]s back with [`Game::drain_changes`].

pub mod cards;
pub mod deck;
pub mod events;
pub mod game;
pub mod holder;
pub mod moves;

pub use cards::{Card, Color, Suit};
pub use events::Change;
pub use game::{CardState, Game, Layout, GAME_NUMBERS};
pub use holder::{CardId, Holder, Point};
pub use moves::Move;
