use crate::consts;
use crate::geometry::Grid;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Dimensions of the playing field
    #[serde(default)]
    pub(crate) board: BoardConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(consts::APP_DIR_NAME).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if the board settings are unusable.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let config = toml::from_str::<Config>(&content)?;
        let _ = config.board.grid()?;
        Ok(config)
    }

    /// Return the path at which the high score should be stored: the file
    /// given in the configuration or, if that is not set, a file in the local
    /// data directory.
    pub(crate) fn high_score_file(&self) -> Result<PathBuf, ConfigError> {
        data_file(
            self.files.high_score_file.as_deref(),
            consts::HIGH_SCORE_FILE_NAME,
        )
    }

    /// Return the path to which log messages should be written: the file
    /// given in the configuration or, if that is not set, a file in the local
    /// data directory.
    pub(crate) fn log_file(&self) -> Result<PathBuf, ConfigError> {
        data_file(self.files.log_file.as_deref(), consts::LOG_FILE_NAME)
    }
}

fn data_file(configured: Option<&Path>, default_name: &str) -> Result<PathBuf, ConfigError> {
    match configured {
        Some(p) => Ok(p.to_path_buf()),
        None => dirs::data_local_dir()
            .map(|p| p.join(consts::APP_DIR_NAME).join(default_name))
            .ok_or(ConfigError::NoDataPath),
    }
}

/// Size of the board and of the cells it's divided into
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct BoardConfig {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) cell_size: u16,
}

impl BoardConfig {
    /// The most cells allowed along either edge of the board.  Each cell
    /// takes up two terminal columns, and the board must fit inside a
    /// terminal buffer.
    pub(crate) const MAX_CELLS: u16 = 1000;

    /// Build the grid described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the cell size is zero, if either dimension is
    /// smaller than one cell, if the board would have more than
    /// [`MAX_CELLS`][BoardConfig::MAX_CELLS] cells along an edge, or if the
    /// starting snake would not fit between the center of the board and its
    /// left edge.
    pub(crate) fn grid(self) -> Result<Grid, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Board("cell-size must be greater than zero"));
        }
        if self.width < self.cell_size || self.height < self.cell_size {
            return Err(ConfigError::Board(
                "board width and height must each be at least one cell-size",
            ));
        }
        let grid = Grid::new(self.width, self.height, self.cell_size);
        if grid.columns() > Self::MAX_CELLS || grid.rows() > Self::MAX_CELLS {
            return Err(ConfigError::Board("board has too many cells along an edge"));
        }
        // The snake starts at the center cell with the rest of its body
        // trailing off to the west, and there must be a free cell left over
        // for the apples.
        let snake_fits = grid
            .to_cell(grid.center())
            .is_some_and(|(col, _)| usize::from(col) + 1 >= consts::INITIAL_SNAKE_LENGTH);
        let cells = usize::from(grid.columns()) * usize::from(grid.rows());
        if !snake_fits || cells <= consts::INITIAL_SNAKE_LENGTH {
            return Err(ConfigError::Board(
                "board is too narrow to hold the starting snake",
            ));
        }
        Ok(grid)
    }
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            width: consts::DEFAULT_BOARD_WIDTH,
            height: consts::DEFAULT_BOARD_HEIGHT,
            cell_size: consts::DEFAULT_CELL_SIZE,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Path at which log messages should be written
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to determine path to local data directory")]
    NoDataPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid board configuration: {0}")]
    Board(&'static str),
}
