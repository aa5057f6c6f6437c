//! Notifications queued by the engine for whatever draws the board.

use crate::holder::{CardId, Holder, Point};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Change {
    /// A card now sits at `position` with z-order `z`.
    Placed { card: CardId, position: Point, z: i32 },
    /// A card's holder changed. `None` means it left the board.
    Parented { card: CardId, parent: Option<Holder> },
    /// A card's z-order changed without it moving.
    Raised { card: CardId, z: i32 },
    /// A card gained or lost the selection.
    Selected { card: CardId, selected: bool },
    /// A refused drag: the card goes back to where it was.
    PositionReset { card: CardId },
    Shown(CardId),
    Hidden(CardId),
    GameNumber(u32),
    /// First move of a deal; the view starts its elapsed-time clock.
    TimerStarted,
    TimerReset,
    Won,
}
