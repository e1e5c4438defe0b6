use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::symbols::border;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default arena width in tiles (an 800 px panel at 30 px per tile).
pub const DEFAULT_GRID_WIDTH: u16 = 26;

/// Default arena height in tiles (a 600 px panel at 30 px per tile).
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default number of segments the snake spawns with.
pub const DEFAULT_INITIAL_LENGTH: u16 = 5;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Errors raised while resolving and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena must be at least 1x1 tiles, got {width}x{height}")]
    EmptyArena { width: u16, height: u16 },

    #[error("initial snake length must be at least 1")]
    ZeroInitialLength,

    #[error(
        "initial snake length {length} leaves no free tile for food in a {width}x{height} arena"
    )]
    NoRoomForFood { length: u16, width: u16, height: u16 },

    #[error("initial snake length {length} does not fit left of the arena center (max {max})")]
    RowOverflow { length: u16, max: u16 },

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Validated episode parameters accepted by the simulation engine.
///
/// Constructing one is the only place the arena preconditions are checked,
/// so [`crate::game::SimulationEngine::start`] never has to fail.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    grid: GridSize,
    initial_length: u16,
}

impl EngineConfig {
    /// Validates arena dimensions and the initial snake length.
    ///
    /// The initial row must leave at least one free tile for food and must fit
    /// between the left wall and the arena center, where the head spawns.
    pub fn new(width: u16, height: u16, initial_length: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyArena { width, height });
        }

        if initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }

        let grid = GridSize { width, height };
        if usize::from(initial_length) >= grid.total_cells() {
            return Err(ConfigError::NoRoomForFood {
                length: initial_length,
                width,
                height,
            });
        }

        let max = width / 2 + 1;
        if initial_length > max {
            return Err(ConfigError::RowOverflow {
                length: initial_length,
                max,
            });
        }

        Ok(Self {
            grid,
            initial_length,
        })
    }

    #[must_use]
    pub fn grid(self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn initial_length(self) -> u16 {
        self.initial_length
    }
}

/// User-facing settings, loadable from a JSON file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub width: u16,
    pub height: u16,
    pub initial_length: u16,
    pub tick_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            initial_length: DEFAULT_INITIAL_LENGTH,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    /// Loads settings from `explicit`, or from the per-user config file.
    ///
    /// An explicit path must exist. The per-user file is optional: when it is
    /// missing the defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => load_from_path(path),
            None => match default_config_path() {
                Some(path) => load_optional_from_path(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Parses settings from a JSON document. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Validates the arena fields into an [`EngineConfig`].
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        EngineConfig::new(self.width, self.height, self.initial_length)
    }

    /// Returns the validated driver tick interval.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(Duration::from_millis(self.tick_interval_ms))
    }
}

/// Returns the platform-correct per-user config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_at(path, &raw)
}

fn load_optional_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(raw) => parse_at(path, &raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_at(path: &Path, raw: &str) -> Result<AppConfig, ConfigError> {
    AppConfig::from_json(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Terminal columns used to draw one tile, so tiles look roughly square.
pub const TILE_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "██";
