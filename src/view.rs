//! Keyboard front-end: a cursor over the sixteen holders, feeding intents to the game.

mod print;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;

use freecell::holder::{COLUMNS, FOUNDATIONS, FREE_CELLS};
use freecell::{CardId, Change, Game, Holder};

const SLOTS: usize = FREE_CELLS + FOUNDATIONS + COLUMNS;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub struct View {
    /// Index into `Holder::roots()`: freecells, then foundations, then columns.
    highlighted: usize,
    /// How many cards below the exposed one the cursor sits, for picking up runs.
    depth: usize,
    peeked: Option<CardId>,
    high_contrast: bool,
    started: Option<Instant>,
    finished: Option<Duration>,
}

impl Default for View {
    fn default() -> Self {
        View::new()
    }
}

fn slot_holder(slot: usize) -> Holder {
    Holder::roots().nth(slot).unwrap_or(Holder::Column(0))
}

impl View {
    pub fn new() -> View {
        View {
            highlighted: FREE_CELLS + FOUNDATIONS,
            depth: 0,
            peeked: None,
            high_contrast: false,
            started: None,
            finished: None,
        }
    }

    pub fn handle_key<R: Rng + ?Sized>(&mut self, game: &mut Game, key: KeyEvent, rng: &mut R) -> Action {
        if key.kind == KeyEventKind::Release {
            return Action::Continue;
        }
        if key.code != KeyCode::Char('p') {
            if let Some(card) = self.peeked.take() {
                game.end_peek(card);
            }
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if control => return Action::Quit,
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('n') if control => game.new_game(rng),
            KeyCode::Char('r') if control => game.restart_game(),
            KeyCode::Left => self.move_cursor(game, -1),
            KeyCode::Right => self.move_cursor(game, 1),
            KeyCode::Up => self.deepen(game),
            KeyCode::Down => self.depth = self.depth.saturating_sub(1),
            KeyCode::Char(' ') => self.press(game),
            KeyCode::Enter => {
                if let Some(card) = self.card_at(game, self.depth) {
                    game.automatic_move(card);
                }
                self.depth = 0;
            }
            KeyCode::Char('a') => {
                game.try_automatic_ace_move(None);
            }
            KeyCode::Char('z') => game.undo(),
            KeyCode::Char('y') => game.redo(),
            KeyCode::Char('r') => game.set_relaxed(!game.is_relaxed()),
            KeyCode::Char('h') => self.high_contrast = !self.high_contrast,
            KeyCode::Char('p') => self.toggle_peek(game),
            _ => {}
        }
        self.clamp_depth(game);
        Action::Continue
    }

    /// Keeps the view's clock and flags in step with what the game reports.
    pub fn apply_changes(&mut self, changes: Vec<Change>) {
        for change in changes {
            match change {
                Change::TimerStarted => {
                    self.started = Some(Instant::now());
                    self.finished = None;
                }
                Change::TimerReset => {
                    self.started = None;
                    self.finished = None;
                }
                Change::Won => self.finished = Some(self.elapsed()),
                Change::GameNumber(_) => {
                    self.depth = 0;
                    self.peeked = None;
                }
                _ => {}
            }
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.finished
            .or_else(|| self.started.map(|started| started.elapsed()))
            .unwrap_or_default()
    }

    fn press(&mut self, game: &mut Game) {
        match self.card_at(game, self.depth) {
            Some(card) => game.select_or_activate_card(card),
            None => game.select_holder(slot_holder(self.highlighted)),
        }
        if game.selected_card().is_none() {
            self.depth = 0;
        }
    }

    fn toggle_peek(&mut self, game: &mut Game) {
        if let Some(card) = self.peeked.take() {
            game.end_peek(card);
        } else if let Some(card) = self.card_at(game, self.depth) {
            game.peek_card(card);
            self.peeked = Some(card);
        }
    }

    /// Steps to the next slot worth stopping at: one holding cards, or while a card
    /// is selected, one that would take it.
    fn move_cursor(&mut self, game: &Game, step: isize) {
        self.depth = 0;
        for _ in 0..SLOTS {
            self.highlighted = (self.highlighted as isize + step).rem_euclid(SLOTS as isize) as usize;
            if self.is_stop(game) {
                break;
            }
        }
    }

    fn is_stop(&self, game: &Game) -> bool {
        let holder = slot_holder(self.highlighted);
        match game.selected_card() {
            Some(selected) => game.root_of(selected) == Some(holder) || game.can_stack_card(holder, selected),
            None => game.child_of(holder).is_some(),
        }
    }

    fn deepen(&mut self, game: &Game) {
        if let Some(card) = self.card_at(game, self.depth + 1) {
            if game.is_pickable(card) {
                self.depth += 1;
            }
        }
    }

    fn clamp_depth(&mut self, game: &Game) {
        let len = game.chain(slot_holder(self.highlighted)).len();
        self.depth = self.depth.min(len.saturating_sub(1));
    }

    /// The card `depth` places below the exposed card of the highlighted slot.
    fn card_at(&self, game: &Game, depth: usize) -> Option<CardId> {
        let chain = game.chain(slot_holder(self.highlighted));
        chain.len().checked_sub(depth + 1).map(|i| chain[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dealt() -> Game {
        let mut game = Game::new();
        game.deal_cards(1_000_000);
        game
    }

    #[test]
    fn cursor_starts_on_the_first_column_and_wraps() {
        let mut game = dealt();
        let mut view = View::new();
        let mut rng = rand::thread_rng();
        assert_eq!(slot_holder(view.highlighted), Holder::Column(0));

        // Empty freecells and foundations are skipped when nothing is selected.
        view.handle_key(&mut game, key(KeyCode::Left), &mut rng);
        assert_eq!(slot_holder(view.highlighted), Holder::Column(COLUMNS - 1));
        view.handle_key(&mut game, key(KeyCode::Right), &mut rng);
        assert_eq!(slot_holder(view.highlighted), Holder::Column(0));
    }

    #[test]
    fn space_selects_and_toggles_the_exposed_card() {
        let mut game = dealt();
        let mut view = View::new();
        let mut rng = rand::thread_rng();
        let top = *game.column(0).last().unwrap();

        view.handle_key(&mut game, key(KeyCode::Char(' ')), &mut rng);
        assert_eq!(game.selected_card(), Some(top));
        view.handle_key(&mut game, key(KeyCode::Char(' ')), &mut rng);
        assert_eq!(game.selected_card(), None);
    }

    #[test]
    fn quit_keys() {
        let mut game = dealt();
        let mut view = View::new();
        let mut rng = rand::thread_rng();
        assert_eq!(view.handle_key(&mut game, key(KeyCode::Char('q')), &mut rng), Action::Quit);
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(view.handle_key(&mut game, ctrl_q, &mut rng), Action::Quit);
    }

    #[test]
    fn clock_follows_timer_changes() {
        let mut view = View::new();
        assert_eq!(view.elapsed(), Duration::ZERO);
        view.apply_changes(vec![Change::TimerStarted]);
        assert!(view.started.is_some());
        view.apply_changes(vec![Change::Won]);
        let frozen = view.elapsed();
        assert_eq!(view.elapsed(), frozen);
        view.apply_changes(vec![Change::TimerReset]);
        assert_eq!(view.elapsed(), Duration::ZERO);
    }
}
