use std::io::{self, Write};

use crossterm::{cursor, style::{self, Stylize}, terminal, QueueableCommand};

use freecell::holder::FREE_CELLS;
use freecell::{Card, CardId, Color, Game, Holder, Suit};

use crate::MIN_TERMINAL_WIDTH;

use super::{slot_holder, View, SLOTS};

const TYPICAL_BOARD_HEIGHT: usize = 24;

const CARD_PRINT_WIDTH: usize = 7;
const CARD_PRINT_HEIGHT: usize = 5;
const TABLEAU_VERTICAL_OFFSET: usize = 2;

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_TERMINAL_HEIGHT: u16 = 24;

/// What goes in a card-sized box.
#[derive(Copy, Clone)]
enum Face {
    Card(Card),
    /// An empty holder, optionally decorated with the suit it collects.
    Empty(Option<Suit>),
}

impl View {
    pub fn print(&self, game: &Game, out: &mut io::Stdout) -> Result<(), io::Error> {
        if !game.is_won() {
            self.print_board(game, out)?;
            self.print_chrome(game, out)?;
        } else {
            // won
            out.queue(style::SetAttribute(style::Attribute::Dim))?;
            self.print_board(game, out)?;
            out.queue(style::SetAttribute(style::Attribute::Reset))?;
            self.print_chrome(game, out)?;
            self.print_win(out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn print_board(&self, game: &Game, out: &mut io::Stdout) -> Result<(), io::Error> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        let highlighted_card = self.card_at(game, self.depth);

        for slot in 0..SLOTS {
            let holder = slot_holder(slot);
            let slot_is_highlighted = self.highlighted == slot && !game.is_won();
            match holder {
                Holder::FreeCell(_) | Holder::Foundation(_) => {
                    // Only the top card of a freecell or foundation shows
                    let x = if slot < FREE_CELLS {
                        slot * CARD_PRINT_WIDTH + 1
                    } else {
                        slot * CARD_PRINT_WIDTH + 3
                    };
                    let decoration = match holder {
                        Holder::Foundation(suit) => Some(suit),
                        _ => None,
                    };
                    match game.chain(holder).last() {
                        Some(&card) => self.print_card_at_coord(
                            out,
                            x,
                            1,
                            Face::Card(card.card()),
                            slot_is_highlighted,
                            game.card_state(card).selected,
                        )?,
                        None => self.print_card_at_coord(out, x, 1, Face::Empty(decoration), slot_is_highlighted, false)?,
                    }
                }
                Holder::Column(column) => {
                    let x = column * CARD_PRINT_WIDTH + 2;
                    let cards = game.chain(holder);
                    if cards.is_empty() {
                        // If tableau column is empty, print placeholder instead
                        self.print_card_at_coord(
                            out,
                            x,
                            CARD_PRINT_HEIGHT + 1,
                            Face::Empty(None),
                            slot_is_highlighted,
                            false,
                        )?;
                        continue;
                    }
                    // Draw lowest z first so a peeked card lands on top of its run
                    let mut by_z: Vec<(usize, CardId)> = cards.into_iter().enumerate().collect();
                    by_z.sort_by_key(|&(_, card)| game.card_state(card).z);
                    for (y, card) in by_z {
                        self.print_card_at_coord(
                            out,
                            x,
                            y * TABLEAU_VERTICAL_OFFSET + CARD_PRINT_HEIGHT + 1,
                            Face::Card(card.card()),
                            slot_is_highlighted && highlighted_card == Some(card),
                            game.card_state(card).selected,
                        )?;
                    }
                }
                Holder::Card(_) => {}
            }
        }
        Ok(())
    }

    fn print_chrome(&self, game: &Game, out: &mut io::Stdout) -> Result<(), io::Error> {
        let (_term_width, term_height) =
            terminal::size().unwrap_or((DEFAULT_TERMINAL_WIDTH, DEFAULT_TERMINAL_HEIGHT));

        // Print title bar
        out.queue(cursor::MoveTo(0, 0))?;
        print!("╭── Freecell #{} ──────────────────────────────────────────╮", game.game_number());
        out.queue(cursor::MoveTo(26, 0))?;
        let seconds = self.elapsed().as_secs();
        print!(" Moves: {} ─ {:02}:{:02} ", game.move_count(), seconds / 60, seconds % 60);
        if game.is_relaxed() {
            out.queue(cursor::MoveTo(48, 0))?;
            print!(" Relaxed ");
        }

        // Print side bars
        for i in 1..term_height {
            out.queue(cursor::MoveTo(0, i))?;
            print!("│");
            out.queue(cursor::MoveTo(MIN_TERMINAL_WIDTH - 1, i))?;
            print!("│");
        }

        // Print bottom bar
        out.queue(cursor::MoveTo(0, term_height))?;
        print!("╰─ (New: ^n) (Restart: ^r) (Undo: z) (Redo: y) (Quit: q) ─╯");

        Ok(())
    }

    fn print_card_at_coord(
        &self,
        out: &mut io::Stdout,
        x: usize,
        y: usize,
        face: Face,
        highlighted: bool,
        selected: bool,
    ) -> Result<(), io::Error> {
        let card_display_str = match face {
            Face::Card(card) if selected => format!(
                "\
                ╭─────╮\n\
                │ {: <3} │\n\
                │     │\n\
                │  △  │\n\
                ╰─────╯\n",
                card.to_string()
            ),
            Face::Card(card) => format!(
                "\
                ╭─────╮\n\
                │ {: <3} │\n\
                │     │\n\
                │     │\n\
                ╰─────╯\n",
                card.to_string()
            ),
            // Print suit-decorated placeholder
            Face::Empty(suit) => format!(
                "\
                ╭─────╮\n\
                │     │\n\
                │  {}  │\n\
                │     │\n\
                ╰─────╯\n",
                suit.map_or(" ", Suit::symbol)
            ),
        };

        for (d, line) in card_display_str.lines().enumerate() {
            out.queue(cursor::MoveTo(x as u16, y as u16 + d as u16))?;
            if highlighted {
                out.queue(style::SetAttribute(style::Attribute::Reverse))?;
            } else if matches!(face, Face::Empty(_)) {
                // dim placeholder
                out.queue(style::SetAttribute(style::Attribute::Dim))?;
            }

            match face {
                Face::Card(card) if self.high_contrast => {
                    let color = match card.suit {
                        Suit::Hearts => style::Color::DarkRed,
                        Suit::Clubs => style::Color::White,
                        Suit::Diamonds => style::Color::Magenta,
                        Suit::Spades => style::Color::Yellow,
                    };
                    print!("{}", line.with(color));
                }
                Face::Card(card) if card.color() == Color::Red => {
                    print!("{}", line.with(style::Color::Red));
                }
                _ => print!("{}", line),
            }

            if highlighted {
                out.queue(style::SetAttribute(style::Attribute::NoReverse))?;
            } else if matches!(face, Face::Empty(_)) {
                // undim placeholder
                out.queue(style::SetAttribute(style::Attribute::NormalIntensity))?;
            }
        }
        Ok(())
    }

    fn print_win(&self, out: &mut io::Stdout) -> Result<(), io::Error> {
        let win_message_width = 20;
        let win_message_height = 4;
        self.print_string_at_coord(
            out,
            "╭──────────────────╮\n\
             │ You Win!         │\n\
             │ New Game: ctrl-n │\n\
             ╰──────────────────╯",
            (MIN_TERMINAL_WIDTH / 2 - win_message_width / 2) as u16,
            (TYPICAL_BOARD_HEIGHT / 2 - win_message_height / 2) as u16,
        )?;
        Ok(())
    }

    fn print_string_at_coord(&self, out: &mut io::Stdout, string: &str, x: u16, y: u16) -> Result<(), io::Error> {
        for (i, line) in string.lines().enumerate() {
            out.queue(cursor::MoveTo(x, y + i as u16))?;
            print!("{}", line);
        }
        Ok(())
    }
}
