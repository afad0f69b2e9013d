//! STAGESHOT - stage-based terminal shooter
//!
//! A top-level screen flow controller drives menu, shop, inventory,
//! stage-select and stage-play screens, and advances a persisted progress
//! marker as stages are cleared.

use std::fmt;

pub mod app;
pub mod cli;
pub mod config;
pub mod models;
pub mod util;

pub use app::flow::{
    ClearedChoice, FlowState, GameOverChoice, MenuChoice, ProgressService, ScreenFlowController,
    Screens, StageOutcome,
};

/// Construction steps that run before the main loop starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStage {
    /// Loading the TOML configuration
    Config,
    /// Entering raw mode and the alternate screen
    Terminal,
    /// Building title/normal/small text styles
    Typography,
    /// Building the per-screen background gradients
    Gradients,
    /// Opening the progress store
    Progress,
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StartupStage::Config => "configuration",
            StartupStage::Terminal => "terminal",
            StartupStage::Typography => "typography",
            StartupStage::Gradients => "gradients",
            StartupStage::Progress => "progress store",
        };
        f.write_str(name)
    }
}

// Common error types
#[derive(Debug)]
pub enum GameError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Progress or upgrades file could not be read or written
    PersistenceError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Gradient or typography construction error
    AssetError(String),
    /// The screen flow reached a state it cannot act on
    FlowError(String),
    /// A fault raised while building something the main loop depends on
    Startup {
        /// Which construction step failed
        stage: StartupStage,
        /// The underlying fault
        source: Box<GameError>,
    },
}

impl GameError {
    /// Tag an error as a startup fault of the given stage
    pub fn startup(stage: StartupStage, err: GameError) -> Self {
        GameError::Startup {
            stage,
            source: Box::new(err),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IoError(err) => write!(f, "I/O error: {}", err),
            GameError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GameError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
            GameError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            GameError::AssetError(msg) => write!(f, "Asset error: {}", msg),
            GameError::FlowError(msg) => write!(f, "Screen flow error: {}", msg),
            GameError::Startup { stage, source } => {
                write!(f, "Startup failed while building {}: {}", stage, source)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::IoError(err) => Some(err),
            GameError::Startup { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::IoError(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for GameError {
    fn from(err: toml::de::Error) -> Self {
        GameError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for GameError {
    fn from(err: toml::ser::Error) -> Self {
        GameError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for STAGESHOT operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Error handling utilities
pub mod error {
    use super::{GameError, StartupStage};

    /// Whether the error happened before the main loop could start
    pub fn is_startup_fault(error: &GameError) -> bool {
        matches!(error, GameError::Startup { .. })
    }

    /// The startup stage that failed, if this is a startup fault
    pub fn startup_stage(error: &GameError) -> Option<StartupStage> {
        match error {
            GameError::Startup { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Convert error to user-friendly message
    pub fn user_friendly_message(error: &GameError) -> String {
        match error {
            GameError::Startup {
                stage: StartupStage::Terminal,
                ..
            } => "Could not take over the terminal. Run stageshot from an interactive terminal."
                .to_string(),
            GameError::Startup {
                stage: StartupStage::Progress,
                ..
            } => "Saved progress could not be read. Check or remove progress.json in the data directory."
                .to_string(),
            GameError::Startup { stage, source } => {
                format!("Failed to prepare {}: {}", stage, source)
            }
            GameError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            GameError::PersistenceError(_) => {
                "Failed to save game data. Check disk space and permissions.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "stageshot";
pub const CONFIG_FILE: &str = "stageshot.toml";
pub const LOG_FILE: &str = "stageshot.log";
pub const UPGRADES_FILE: &str = "upgrades.json";
pub const PROGRESS_FILE: &str = "progress.json";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MAX_STAGES: u32 = 10;
