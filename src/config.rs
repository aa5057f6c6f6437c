//! Startup options from the command line and the environment.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use freecell::GAME_NUMBERS;

/// Environment variable naming the file debug logs are written to.
pub const LOG_ENV: &str = "FREECELL_LOG";

pub const USAGE: &str = "\
usage: freecell [--game=<number>] [--relaxed]

  --game=<number>  play a specific deal (1000000 to 9999999)
  --relaxed        move runs of any length regardless of free cells
  --help           show this message

Set FREECELL_LOG=<file> to write debug logs to <file>.";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub game_number: Option<u32>,
    pub relaxed: bool,
    pub log_file: Option<PathBuf>,
    pub help: bool,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::parse(env::args().skip(1), env::var_os(LOG_ENV).map(PathBuf::from))
    }

    pub fn parse<I>(args: I, log_file: Option<PathBuf>) -> Result<Config>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config {
            log_file: log_file.filter(|path| !path.as_os_str().is_empty()),
            ..Config::default()
        };

        for arg in args {
            if arg == "--relaxed" {
                config.relaxed = true;
            } else if arg == "--help" || arg == "-h" {
                config.help = true;
            } else if let Some(rest) = arg.strip_prefix("--game=") {
                let game_number: u32 = rest
                    .parse()
                    .with_context(|| format!("game number `{rest}` is not a number"))?;
                if !GAME_NUMBERS.contains(&game_number) {
                    return Err(anyhow!(
                        "game number {game_number} is outside {}..={}",
                        GAME_NUMBERS.start(),
                        GAME_NUMBERS.end()
                    ));
                }
                config.game_number = Some(game_number);
            } else {
                bail!("unknown argument `{arg}`\n\n{USAGE}");
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let config = Config::parse(args(&[]), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_game_number_and_relaxed_flag() {
        let config = Config::parse(args(&["--relaxed", "--game=1234567"]), Some("freecell.log".into())).unwrap();
        assert!(config.relaxed);
        assert_eq!(config.game_number, Some(1_234_567));
        assert_eq!(config.log_file, Some(PathBuf::from("freecell.log")));
    }

    #[test]
    fn rejects_bad_game_numbers() {
        assert!(Config::parse(args(&["--game=12"]), None).is_err());
        assert!(Config::parse(args(&["--game=abc"]), None).is_err());
        assert!(Config::parse(args(&["--deal"]), None).is_err());
    }

    #[test]
    fn empty_log_variable_disables_logging() {
        let config = Config::parse(args(&[]), Some(PathBuf::new())).unwrap();
        assert_eq!(config.log_file, None);
    }
}
