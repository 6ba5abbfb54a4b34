mod app;
mod color;
mod command;
mod config;
mod consts;
mod game;
mod geometry;
mod highscore;
mod logging;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::highscore::HighScore;
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { config })
    }

    fn run(self) -> ExitCode {
        match self {
            Command::Run { config } => match setup(config) {
                Ok(game) => {
                    let terminal = ratatui::init();
                    let r = App::new(game).run(terminal);
                    ratatui::restore();
                    io_exit(r)
                }
                Err(e) => {
                    eprintln!("{}: {e:#}", env!("CARGO_PKG_NAME"));
                    ExitCode::from(2)
                }
            },
            Command::Help => {
                println!("Usage: {} [-c|--config <path>]", env!("CARGO_PKG_NAME"));
                println!();
                println!("{}", env!("CARGO_PKG_DESCRIPTION"));
                println!();
                println!("Options:");
                println!("  -c <path>, --config <path>");
                println!("                    Read configuration from the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                ExitCode::SUCCESS
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

/// Load the configuration, start logging, and read the stored high score
fn setup(config_path: Option<PathBuf>) -> anyhow::Result<Game> {
    let (path, allow_missing) = match config_path {
        Some(p) => (p, false),
        None => (Config::default_path()?, true),
    };
    let config = Config::load(&path, allow_missing)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    let grid = config.board.grid()?;
    let log_file = config.log_file()?;
    if let Err(e) = logging::init(&log_file) {
        eprintln!(
            "{}: logging disabled: {:#}",
            env!("CARGO_PKG_NAME"),
            anyhow::Error::new(e)
        );
    }
    log::info!(
        "Starting {} {} with {config:?}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let hs_path = config.high_score_file()?;
    let high_score = match HighScore::load(hs_path.clone()) {
        Ok(hs) => hs,
        Err(e) => {
            log::error!("{:#}", anyhow::Error::new(e));
            HighScore::empty(hs_path)
        }
    };
    log::debug!(
        "High score {} read from {}",
        high_score.get(),
        high_score.path().display()
    );
    Ok(Game::new(grid, high_score))
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd.run(),
        Err(e) => {
            eprintln!("{}: {e}", env!("CARGO_PKG_NAME"));
            ExitCode::from(2)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
