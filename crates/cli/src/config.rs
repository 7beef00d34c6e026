//! Settings for the terminal front end
//!
//! Built-in defaults, overlaid by an optional TOML file, overlaid by
//! command-line flags.

use chess_core::{Board, BoardParseError, Difficulty};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid starting position: {0}")]
    Position(#[from] BoardParseError),
}

/// Front end settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Opponent tier
    pub difficulty: Difficulty,
    /// Pause before the opponent replies, in milliseconds
    pub opponent_delay_ms: u64,
    /// Fixed seed for the opponent (None = fresh entropy)
    pub seed: Option<u64>,
    /// Emit one JSON snapshot per line instead of drawing the board
    pub json: bool,
    /// Placement for the first game, FEN style (None = standard start).
    /// `new` always restarts from the standard position.
    pub position: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            opponent_delay_ms: 500,
            seed: None,
            json: false,
            position: None,
        }
    }
}

impl CliConfig {
    /// Load settings from a TOML file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Board for the first game.
    pub fn starting_board(&self) -> Result<Board, ConfigError> {
        match &self.position {
            Some(diagram) => Ok(Board::from_diagram(diagram)?),
            None => Ok(Board::startpos()),
        }
    }
}
