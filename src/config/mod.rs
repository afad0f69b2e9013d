//! Configuration management module
//!
//! Handles loading, saving, and validation of the game configuration:
//! playfield dimensions, stage count, data directory and text palette.

use crate::{GameError, Result, APP_NAME, CONFIG_FILE, DEFAULT_DATA_DIR, DEFAULT_MAX_STAGES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod persistence;

/// Game configuration passed to every component at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Title shown on the main menu
    pub title: String,
    /// Playfield width in terminal cells
    pub width: u16,
    /// Playfield height in terminal cells
    pub height: u16,
    /// Number of stages; the last one ends the game with a win
    pub max_stages: u32,
    /// Directory holding progress.json and upgrades.json
    pub data_dir: PathBuf,
    /// Center the playfield when the terminal is larger than it
    pub center: bool,
    /// Simulation tick length in milliseconds
    pub tick_ms: u64,
    /// Seed for enemy spawns; random when absent
    pub seed: Option<u64>,
    /// Text colors
    pub palette: Palette,
}

/// Text colors, as color names or `#rrggbb` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub title: String,
    pub text: String,
    pub muted: String,
    pub highlight: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            title: "cyan".to_string(),
            text: "white".to_string(),
            muted: "darkgray".to_string(),
            highlight: "yellow".to_string(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "STAGESHOT".to_string(),
            width: 40,
            height: 22,
            max_stages: DEFAULT_MAX_STAGES,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            center: true,
            tick_ms: 50,
            seed: None,
            palette: Palette::default(),
        }
    }
}

const MIN_WIDTH: u16 = 20;
const MAX_WIDTH: u16 = 200;
const MIN_HEIGHT: u16 = 10;
const MAX_HEIGHT: u16 = 100;
const MAX_STAGE_COUNT: u32 = 99;

impl GameConfig {
    /// Create a new game configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GameError::ConfigError("Title must not be empty".to_string()));
        }

        if self.width < MIN_WIDTH || self.width > MAX_WIDTH {
            return Err(GameError::ConfigError(format!(
                "Width must be between {} and {} cells",
                MIN_WIDTH, MAX_WIDTH
            )));
        }

        if self.height < MIN_HEIGHT || self.height > MAX_HEIGHT {
            return Err(GameError::ConfigError(format!(
                "Height must be between {} and {} cells",
                MIN_HEIGHT, MAX_HEIGHT
            )));
        }

        if self.max_stages == 0 || self.max_stages > MAX_STAGE_COUNT {
            return Err(GameError::ConfigError(format!(
                "Stage count must be between 1 and {}",
                MAX_STAGE_COUNT
            )));
        }

        if !(10..=1000).contains(&self.tick_ms) {
            return Err(GameError::ConfigError(
                "Tick length must be between 10 and 1000 ms".to_string(),
            ));
        }

        Ok(())
    }

    /// Simulation tick as a duration
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    /// Set the number of stages
    pub fn with_max_stages(mut self, max_stages: u32) -> Self {
        self.max_stages = max_stages;
        self
    }

    /// Set the spawn seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the playfield size
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, defaulting when it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            GameError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            GameError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GameError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            GameError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/stageshot/stageshot.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            GameError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
