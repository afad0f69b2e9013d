//! Command-line interface for stageshot.

use crate::config::GameConfig;
use crate::Result;
use clap::Parser;
use std::path::PathBuf;

/// STAGESHOT - stage-based terminal shooter
#[derive(Parser, Debug)]
#[command(name = "stageshot")]
#[command(about = "Stage-based shooter for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding progress.json and upgrades.json
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Number of stages before the game is won
    #[arg(long)]
    pub max_stages: Option<u32>,

    /// Seed for enemy spawns (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Load the configuration file and apply command-line overrides
    pub fn load_config(&self) -> Result<GameConfig> {
        let config = match &self.config {
            Some(path) => GameConfig::load_from(path)?,
            None => GameConfig::load()?,
        };
        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    /// Save the effective configuration to `--config` or the standard path
    pub fn write_config_file(&self, config: &GameConfig) -> Result<PathBuf> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => GameConfig::config_file_path()?,
        };
        config.save_to(&path)?;
        Ok(path)
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        if let Some(max_stages) = self.max_stages {
            config = config.with_max_stages(max_stages);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["stageshot"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.write_config);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.apply(GameConfig::default()), GameConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "stageshot",
            "--data-dir",
            "/tmp/saves",
            "--max-stages",
            "4",
            "--seed",
            "42",
        ])
        .unwrap();
        let config = cli.apply(GameConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("/tmp/saves"));
        assert_eq!(config.max_stages, 4);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stageshot.toml");
        std::fs::write(&path, "title = \"ARCADE\"\nmax_stages = 3\n").unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["stageshot", "--config", &path_arg, "--max-stages", "5"])
            .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.title, "ARCADE");
        assert_eq!(config.max_stages, 5);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path_arg = temp_dir.path().join("missing.toml").to_string_lossy().to_string();
        let cli =
            Cli::try_parse_from(["stageshot", "--config", &path_arg, "--max-stages", "0"]).unwrap();
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_write_config_saves_effective_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("stageshot.toml");
        let path_arg = path.to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "stageshot",
            "--config",
            &path_arg,
            "--seed",
            "7",
            "--write-config",
        ])
        .unwrap();
        assert!(cli.write_config);

        let config = cli.load_config().unwrap();
        assert_eq!(cli.write_config_file(&config).unwrap(), path);

        let written = GameConfig::load_from(&path).unwrap();
        assert_eq!(written.seed, Some(7));
        assert_eq!(written, config);
    }
}
