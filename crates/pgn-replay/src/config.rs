//! Configuration file loading for the replayer.
//!
//! Settings come from `replay.toml` in the working directory. Every field is
//! optional, and a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Replayer settings. Command-line flags override them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Directory scanned for PGN files when no file is given.
    /// Defaults to "games".
    #[serde(default = "default_games_dir")]
    pub games_dir: PathBuf,
    /// Draw the board with White at the bottom. Defaults to true.
    #[serde(default = "default_view_from_white")]
    pub view_from_white: bool,
    /// Print the board after every ply, not only at the end.
    #[serde(default)]
    pub every_ply: bool,
    /// Play the games of a file in random order.
    #[serde(default)]
    pub shuffle: bool,
}

fn default_games_dir() -> PathBuf {
    PathBuf::from("games")
}

fn default_view_from_white() -> bool {
    true
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            games_dir: default_games_dir(),
            view_from_white: default_view_from_white(),
            every_ply: false,
            shuffle: false,
        }
    }
}

impl ReplayConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads the configuration from a specific file, falling back to the
    /// defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("replay.toml")
    }
}
