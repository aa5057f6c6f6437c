mod automatic;
mod rules;
mod selection;

use std::mem;
use std::ops::RangeInclusive;

use rand::Rng;
use tracing::{debug, info, instrument, trace};

use crate::cards::{Card, Suit, DECK_SIZE};
use crate::deck::Deck;
use crate::events::Change;
use crate::holder::{CardId, Holder, Point, CHILD_OFFSET, COLUMNS, FOUNDATIONS, FREE_CELLS};
use crate::moves::{History, Move};

/// Game numbers handed out by `new_game` and accepted by `select_game`.
pub const GAME_NUMBERS: RangeInclusive<u32> = 1_000_000..=9_999_999;

/// Mutable state of one card. Parent and child are handles into the game's arena,
/// never ownership.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CardState {
    pub card: Card,
    pub parent: Option<Holder>,
    pub child: Option<CardId>,
    pub position: Point,
    pub z: i32,
    pub on_foundation: bool,
    pub selected: bool,
    pub scattered: bool,
    pub visible: bool,
}

impl CardState {
    fn new(id: CardId) -> CardState {
        CardState {
            card: id.card(),
            parent: None,
            child: None,
            position: Point::default(),
            z: 0,
            on_foundation: false,
            selected: false,
            scattered: false,
            visible: false,
        }
    }
}

/// Which card sits where, read bottom to top. Two games with equal layouts show the
/// same tableau.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub freecells: [Option<CardId>; FREE_CELLS],
    pub foundations: [Vec<CardId>; FOUNDATIONS],
    pub columns: [Vec<CardId>; COLUMNS],
}

impl Layout {
    pub fn card_count(&self) -> usize {
        self.freecells.iter().flatten().count()
            + self.foundations.iter().map(Vec::len).sum::<usize>()
            + self.columns.iter().map(Vec::len).sum::<usize>()
    }
}

/// Owns every card and holder. All changes to the board go through here.
pub struct Game {
    cards: Vec<CardState>,
    freecells: [Option<CardId>; FREE_CELLS],
    foundations: [Option<CardId>; FOUNDATIONS],
    columns: [Option<CardId>; COLUMNS],
    deck: Deck,
    dealt: Vec<CardId>,
    selected: Option<CardId>,
    history: History,
    sweeping: bool,
    relaxed: bool,
    game_number: u32,
    timer_running: bool,
    won: bool,
    changes: Vec<Change>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// An empty board with a freshly built deck. Nothing is dealt yet.
    pub fn new() -> Game {
        Game {
            cards: CardId::all().map(CardState::new).collect(),
            freecells: [None; FREE_CELLS],
            foundations: [None; FOUNDATIONS],
            columns: [None; COLUMNS],
            deck: Deck::new(),
            dealt: Vec::with_capacity(DECK_SIZE),
            selected: None,
            history: History::new(),
            sweeping: false,
            relaxed: false,
            game_number: 0,
            timer_running: false,
            won: false,
            changes: Vec::new(),
        }
    }

    /// Starts a random game from `GAME_NUMBERS`.
    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.end_game();
        let game_number = rng.gen_range(GAME_NUMBERS);
        self.deal_cards(game_number);
    }

    /// Starts the given game. Numbers outside `GAME_NUMBERS` are refused.
    pub fn select_game(&mut self, game_number: u32) -> bool {
        if !GAME_NUMBERS.contains(&game_number) {
            debug!(target: "deal", game_number, "refused game number outside range");
            return false;
        }
        self.end_game();
        self.deal_cards(game_number);
        true
    }

    /// Deals the current game number again from scratch.
    pub fn restart_game(&mut self) {
        self.end_game();
        self.deal_cards(self.game_number);
    }

    pub fn end_game(&mut self) {
        self.collect_cards();
        if mem::take(&mut self.timer_running) {
            self.changes.push(Change::TimerReset);
        }
    }

    /// Rebuilds and shuffles the deck from `game_number`, then deals it round robin
    /// over the columns: card `i` lands in column `i % COLUMNS`.
    #[instrument(level = "debug", skip(self))]
    pub fn deal_cards(&mut self, game_number: u32) {
        if !self.dealt.is_empty() {
            self.collect_cards();
        }
        self.build_deck();
        self.deck.shuffle(game_number);
        self.history.clear();
        self.game_number = game_number;
        self.won = false;
        if mem::take(&mut self.timer_running) {
            self.changes.push(Change::TimerReset);
        }
        self.changes.push(Change::GameNumber(game_number));

        assert_eq!(
            self.deck.len(),
            DECK_SIZE,
            "deck must hold the full set of cards before dealing"
        );

        let mut leaves: [Option<CardId>; COLUMNS] = [None; COLUMNS];
        let mut i = 0;
        while let Some(card) = self.deck.draw_card() {
            let column = i % COLUMNS;
            let parent = leaves[column].map_or(Holder::Column(column), Holder::Card);
            self.place(card, Some(parent));
            leaves[column] = Some(card);
            self.dealt.push(card);
            self.cards[card.index()].visible = true;
            self.changes.push(Change::Shown(card));
            i += 1;
        }
        info!(target: "deal", game_number, "dealt {} cards", self.dealt.len());
    }

    /// Takes every card off the board and returns it to the deck, last dealt first.
    pub fn collect_cards(&mut self) {
        self.unselect_card();
        while let Some(card) = self.dealt.pop() {
            self.cards[card.index()].visible = false;
            self.changes.push(Change::Hidden(card));
            self.place(card, None);
            let state = &mut self.cards[card.index()];
            state.on_foundation = false;
            state.scattered = false;
            self.deck.push_card(card);
        }
        self.freecells = [None; FREE_CELLS];
        self.foundations = [None; FOUNDATIONS];
        self.columns = [None; COLUMNS];
        trace!(target: "deal", cards = self.deck.len(), "collected cards");
    }

    fn build_deck(&mut self) {
        for id in CardId::all() {
            self.cards[id.index()] = CardState::new(id);
        }
        self.freecells = [None; FREE_CELLS];
        self.foundations = [None; FOUNDATIONS];
        self.columns = [None; COLUMNS];
        self.selected = None;
        self.deck.build();
    }

    /// Moves `card`, and everything stacked on it, onto `parent`. A change of parent
    /// is recorded in the history and followed by the foundation sweep.
    pub(crate) fn set_parent(&mut self, card: CardId, parent: Holder) {
        let previous = self.place(card, Some(parent));
        match previous {
            Some(previous) if previous != parent => {
                self.on_card_moved(Move::new(card, parent, previous));
            }
            _ => {}
        }
    }

    /// Re-links `card` without touching the history. Returns the previous parent.
    fn place(&mut self, card: CardId, parent: Option<Holder>) -> Option<Holder> {
        let previous = self.cards[card.index()].parent;
        if let Some(previous) = previous {
            self.set_child(previous, None);
        }
        self.cards[card.index()].parent = parent;
        self.changes.push(Change::Parented { card, parent });

        if let Some(parent) = parent {
            self.set_child(parent, Some(card));
            self.cards[card.index()].on_foundation = self.rests_on_foundation(parent);
            self.update_position(card);
            self.unselect_card();
        }
        previous
    }

    fn on_card_moved(&mut self, mv: Move) {
        debug!(
            target: "moves",
            card = %mv.card.card(),
            from = ?mv.previous_parent,
            to = ?mv.parent,
            "card moved"
        );
        self.history.record(mv);
        if !self.timer_running {
            self.timer_running = true;
            self.changes.push(Change::TimerStarted);
        }
        if self.sweeping {
            return;
        }
        self.sweep_to_foundations();
        self.check_won();
    }

    /// Puts the last move back. Does nothing when there is nothing to undo.
    pub fn undo(&mut self) {
        let Some(mv) = self.history.pop_undo() else {
            trace!(target: "history", "nothing to undo");
            return;
        };
        debug!(target: "history", card = %mv.card.card(), to = ?mv.previous_parent, "undo");
        self.place(mv.card, Some(mv.previous_parent));
        self.history.push_redo(mv);
        self.check_won();
    }

    /// Plays the last undone move again. Does nothing when there is nothing to redo.
    pub fn redo(&mut self) {
        let Some(mv) = self.history.pop_redo() else {
            trace!(target: "history", "nothing to redo");
            return;
        };
        debug!(target: "history", card = %mv.card.card(), to = ?mv.parent, "redo");
        self.place(mv.card, Some(mv.parent));
        self.history.push_undo(mv);
        self.check_won();
    }

    fn check_won(&mut self) {
        let won = self.is_won();
        if won && !self.won {
            info!(target: "moves", game_number = self.game_number, "game won");
            self.changes.push(Change::Won);
        }
        self.won = won;
    }

    /// Lifts a card off the board for the victory animation. Not recorded.
    pub fn scatter(&mut self, card: CardId, point: Point) {
        self.place(card, None);
        let state = &mut self.cards[card.index()];
        state.on_foundation = false;
        state.scattered = true;
        state.position = point;
        let z = state.z;
        self.changes.push(Change::Placed { card, position: point, z });
    }

    /// Raises a card above the cards stacked on it so it can be read.
    pub fn peek_card(&mut self, card: CardId) {
        let z = self.top_z_index(card);
        self.cards[card.index()].z = z;
        self.changes.push(Change::Raised { card, z });
    }

    pub fn end_peek(&mut self, card: CardId) {
        let z = self.cards[card.index()]
            .parent
            .map_or(1, |parent| self.z_index(parent) + 1);
        self.cards[card.index()].z = z;
        self.changes.push(Change::Raised { card, z });
    }

    fn top_z_index(&self, card: CardId) -> i32 {
        let top = self.chain_from(card).last().copied().unwrap_or(card);
        self.cards[top.index()].z + 1
    }

    /// Recomputes position and z-order of `card` and of everything stacked on it.
    fn update_position(&mut self, card: CardId) {
        let mut current = Some(card);
        while let Some(id) = current {
            let Some(parent) = self.cards[id.index()].parent else {
                break;
            };
            let position = self.child_position(parent);
            let z = self.z_index(parent) + 1;
            let state = &mut self.cards[id.index()];
            state.position = position;
            state.z = z;
            current = state.child;
            self.changes.push(Change::Placed { card: id, position, z });
        }
    }

    /// Where a card resting on `holder` is drawn.
    pub fn child_position(&self, holder: Holder) -> Point {
        match holder {
            Holder::Card(card) => {
                let state = &self.cards[card.index()];
                if state.on_foundation {
                    state.position
                } else {
                    Point::new(state.position.x, state.position.y + CHILD_OFFSET)
                }
            }
            root => root.root_position().unwrap_or_default(),
        }
    }

    pub fn z_index(&self, holder: Holder) -> i32 {
        match holder {
            Holder::Card(card) => self.cards[card.index()].z,
            _ => 0,
        }
    }

    pub fn holder_position(&self, holder: Holder) -> Point {
        match holder {
            Holder::Card(card) => self.cards[card.index()].position,
            root => root.root_position().unwrap_or_default(),
        }
    }

    fn rests_on_foundation(&self, holder: Holder) -> bool {
        match holder {
            Holder::Foundation(_) => true,
            Holder::Card(card) => self.cards[card.index()].on_foundation,
            _ => false,
        }
    }

    fn slot(&self, holder: Holder) -> Option<&Option<CardId>> {
        match holder {
            Holder::FreeCell(i) => self.freecells.get(i),
            Holder::Foundation(suit) => self.foundations.get(suit.index()),
            Holder::Column(i) => self.columns.get(i),
            Holder::Card(card) => self.cards.get(card.index()).map(|state| &state.child),
        }
    }

    fn set_child(&mut self, holder: Holder, child: Option<CardId>) {
        let slot = match holder {
            Holder::FreeCell(i) => self.freecells.get_mut(i),
            Holder::Foundation(suit) => self.foundations.get_mut(suit.index()),
            Holder::Column(i) => self.columns.get_mut(i),
            Holder::Card(card) => self.cards.get_mut(card.index()).map(|state| &mut state.child),
        };
        if let Some(slot) = slot {
            *slot = child;
        }
    }

    /// The card resting directly on `holder`, if any.
    pub fn child_of(&self, holder: Holder) -> Option<CardId> {
        self.slot(holder).copied().flatten()
    }

    /// True for an existing holder with nothing on it.
    pub fn is_vacant(&self, holder: Holder) -> bool {
        matches!(self.slot(holder), Some(None))
    }

    /// The holder a new card would land on: the last card of the chain on `holder`,
    /// or `holder` itself when it is empty.
    pub fn exposed(&self, holder: Holder) -> Holder {
        let mut exposed = holder;
        while let Some(child) = self.child_of(exposed) {
            exposed = Holder::Card(child);
        }
        exposed
    }

    /// The cards resting on `holder`, bottom to top.
    pub fn chain(&self, holder: Holder) -> Vec<CardId> {
        let mut chain = Vec::new();
        let mut current = self.child_of(holder);
        while let Some(card) = current {
            chain.push(card);
            current = self.cards[card.index()].child;
        }
        chain
    }

    /// `card` followed by the cards stacked on it.
    pub fn chain_from(&self, card: CardId) -> Vec<CardId> {
        let mut chain = vec![card];
        chain.extend(self.chain(Holder::Card(card)));
        chain
    }

    /// The freecell, foundation or column a card ultimately rests on.
    pub fn root_of(&self, card: CardId) -> Option<Holder> {
        let mut parent = self.cards[card.index()].parent?;
        while let Holder::Card(below) = parent {
            parent = self.cards[below.index()].parent?;
        }
        Some(parent)
    }

    pub fn card_state(&self, card: CardId) -> &CardState {
        &self.cards[card.index()]
    }

    pub fn cards(&self) -> impl Iterator<Item = (CardId, &CardState)> {
        CardId::all().zip(self.cards.iter())
    }

    pub fn column(&self, i: usize) -> Vec<CardId> {
        self.chain(Holder::Column(i))
    }

    pub fn freecell(&self, i: usize) -> Option<CardId> {
        self.child_of(Holder::FreeCell(i))
    }

    pub fn foundation_top(&self, suit: Suit) -> Option<CardId> {
        self.chain(Holder::Foundation(suit)).last().copied()
    }

    pub fn layout(&self) -> Layout {
        Layout {
            freecells: self.freecells,
            foundations: Suit::ALL.map(|suit| self.chain(Holder::Foundation(suit))),
            columns: core::array::from_fn(|i| self.column(i)),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn is_won(&self) -> bool {
        self.cards.iter().filter(|state| state.on_foundation).count() == DECK_SIZE
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    pub fn set_relaxed(&mut self, relaxed: bool) {
        debug!(target: "rules", relaxed, "relaxed mode changed");
        self.relaxed = relaxed;
    }

    pub fn is_relaxed(&self) -> bool {
        self.relaxed
    }

    /// Number of moves that can currently be undone.
    pub fn move_count(&self) -> usize {
        self.history.undo_len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.undo_len() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.redo_len() > 0
    }

    /// Hands over every notification queued since the last call.
    pub fn drain_changes(&mut self) -> Vec<Change> {
        mem::take(&mut self.changes)
    }
}
