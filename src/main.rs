mod config;
mod view;

use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event},
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use tracing::info;

use freecell::Game;

use crate::config::{Config, USAGE};
use crate::view::{Action, View};

pub const MIN_TERMINAL_WIDTH: u16 = 60;

/// How often the board is redrawn while idle, so the clock keeps ticking.
const TICK: Duration = Duration::from_secs(1);

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    // Prepare terminal
    crossterm::terminal::enable_raw_mode().context("cannot switch the terminal to raw mode")?;
    let mut stdout = stdout();
    stdout.execute(cursor::Hide)?;
    stdout.execute(Clear(ClearType::All))?;

    // Create game
    let mut rng = rand::thread_rng();
    let mut game = Game::new();
    game.set_relaxed(config.relaxed);
    match config.game_number {
        Some(game_number) => {
            game.select_game(game_number);
        }
        None => game.new_game(&mut rng),
    }
    info!(game_number = game.game_number(), relaxed = config.relaxed, "started");

    let mut view = View::new();
    view.apply_changes(game.drain_changes());
    view.print(&game, &mut stdout)?;

    // Game loop
    loop {
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if view.handle_key(&mut game, key, &mut rng) == Action::Quit {
                    break;
                }
                view.apply_changes(game.drain_changes());
            }
        }
        view.print(&game, &mut stdout)?;
    }

    Ok(())
}

fn cleanup() {
    let mut stdout = stdout();
    let _ = stdout.execute(cursor::Show);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.execute(Clear(ClearType::All));
    println!();
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    if config.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_logging(&config)?;

    let result = run(&config);
    cleanup();
    result
}
