//! Assorted constants & hard-coded configuration
use crate::color::Rgb;
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Time between simulation ticks (10 ticks per second)
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(100);

/// After entering play, the snake stays still for this long
pub(crate) const GRACE_PERIOD: Duration = Duration::from_millis(500);

/// Default board width, in board units
pub(crate) const DEFAULT_BOARD_WIDTH: u16 = 520;

/// Default board height, in board units
pub(crate) const DEFAULT_BOARD_HEIGHT: u16 = 520;

/// Default edge length of a single grid cell, in board units
pub(crate) const DEFAULT_CELL_SIZE: u16 = 20;

/// Number of segments in a freshly-created snake
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 4;

/// Color of a freshly-created snake
pub(crate) const SNAKE_COLOR: Rgb = Rgb::new(0, 120, 0);

/// The cycle of colors the snake moves through as it eats
pub(crate) const SNAKE_COLOR_CYCLE: [Rgb; 3] = [
    Rgb::new(0, 120, 0),
    Rgb::new(0, 0, 120),
    Rgb::new(120, 0, 0),
];

/// How far the snake's color moves towards the next color in the cycle per
/// apple eaten
pub(crate) const COLOR_TRANSITION_STEP: f64 = 0.25;

/// Amount added to each component of an eaten apple's color to get the new
/// background color
pub(crate) const BACKGROUND_LIGHTEN: u8 = 225;

/// Background color before any apple has been eaten
pub(crate) const BACKGROUND_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Color of the grid marks drawn in empty cells
pub(crate) const GRID_COLOR: Rgb = Rgb::new(173, 216, 230);

pub(crate) const GOLD_APPLE_COLOR: Rgb = Rgb::new(255, 215, 0);

pub(crate) const AQUA_APPLE_COLOR: Rgb = Rgb::new(0, 255, 255);

pub(crate) const RED_APPLE_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Number of random candidates to try when placing an apple before falling
/// back to enumerating the free cells
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Glyph pair for a cell occupied by the snake or an apple.  Each board cell
/// is two terminal columns wide so that cells come out roughly square.
pub(crate) const SOLID_CELL_SYMBOL: &str = "██";

/// Glyph pair for an empty board cell
pub(crate) const EMPTY_CELL_SYMBOL: &str = "· ";

/// Number of terminal columns used to draw one board cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Style for the text drawn on top of the board (scores & messages)
pub(crate) const TEXT_STYLE: Style = Style::new().fg(Color::Black);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Black).add_modifier(Modifier::BOLD);

/// Name used for the configuration & data directories
pub(crate) const APP_DIR_NAME: &str = "applesnake";

/// Default file name for the high score, inside the local data directory
pub(crate) const HIGH_SCORE_FILE_NAME: &str = "highscore.txt";

/// Default file name for the log, inside the local data directory
pub(crate) const LOG_FILE_NAME: &str = "applesnake.log";
