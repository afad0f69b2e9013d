//! Game data persistence module
//!
//! Handles saving and loading of the progress marker and the upgrade
//! counters, both stored as JSON files in the data directory.

use crate::app::flow::ProgressService;
use crate::models::{ProgressRecord, Upgrades};
use crate::{GameError, Result, PROGRESS_FILE, UPGRADES_FILE};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GameError::PersistenceError(format!(
                "Failed to create data directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let content = serde_json::to_string_pretty(value)?;

    fs::write(path, content).map_err(|e| {
        GameError::PersistenceError(format!("Failed to write {}: {}", path.display(), e))
    })
}

/// Progress storage backed by `progress.json`
#[derive(Debug)]
pub struct ProgressStore {
    path: PathBuf,
    max_stages: u32,
    record: ProgressRecord,
}

impl ProgressStore {
    /// Open the progress file in the data directory
    pub fn open(data_dir: &Path, max_stages: u32) -> Result<Self> {
        Self::with_path(data_dir.join(PROGRESS_FILE), max_stages)
    }

    /// Open a progress file at an explicit path
    /// A missing file starts at stage 1, an unreadable one is an error
    pub fn with_path(path: PathBuf, max_stages: u32) -> Result<Self> {
        let record = Self::load_record(&path)?;
        debug!(path = %path.display(), max_unlocked = record.max_unlocked, "Progress loaded");
        Ok(Self {
            path,
            max_stages,
            record,
        })
    }

    fn load_record(path: &Path) -> Result<ProgressRecord> {
        if !path.exists() {
            return Ok(ProgressRecord::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            GameError::PersistenceError(format!(
                "Failed to read progress file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            GameError::PersistenceError(format!(
                "Failed to parse progress file {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressService for ProgressStore {
    fn max_unlocked(&self) -> u32 {
        self.record.unlocked(self.max_stages)
    }

    fn record_unlocked(&mut self, stage: u32) -> Result<()> {
        if !self.record.unlock(stage, self.max_stages) {
            debug!(stage, current = self.record.max_unlocked, "Progress already past stage");
            return Ok(());
        }
        info!(stage = self.record.max_unlocked, "New stage unlocked");
        write_json(&self.path, &self.record)
    }
}

/// Upgrade counter storage backed by `upgrades.json`
#[derive(Debug, Clone)]
pub struct UpgradeStore {
    path: PathBuf,
}

impl UpgradeStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(UPGRADES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load counters, defaulting when the file is missing
    pub fn load(&self) -> Result<Upgrades> {
        if !self.path.exists() {
            return Ok(Upgrades::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            GameError::PersistenceError(format!(
                "Failed to read upgrades file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let map: BTreeMap<String, Value> = serde_json::from_str(&content).map_err(|e| {
            GameError::PersistenceError(format!(
                "Failed to parse upgrades file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Upgrades::from_map(map)
    }

    /// Where an unreadable upgrades file is moved before defaults take over
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Load counters, logging a warning and defaulting on any fault
    ///
    /// An unreadable file is renamed to [`Self::backup_path`] so the next save
    /// does not destroy it.
    pub fn load_tolerant(&self) -> Upgrades {
        match self.load() {
            Ok(upgrades) => upgrades,
            Err(e) => {
                let backup = self.backup_path();
                match fs::rename(&self.path, &backup) {
                    Ok(()) => warn!(
                        error = %e,
                        backup = %backup.display(),
                        "Could not load upgrades, starting from zero"
                    ),
                    Err(rename_err) => warn!(
                        error = %e,
                        backup_error = %rename_err,
                        "Could not load upgrades or back them up, starting from zero"
                    ),
                }
                Upgrades::default()
            }
        }
    }

    pub fn save(&self, upgrades: &Upgrades) -> Result<()> {
        write_json(&self.path, &upgrades.to_map())
    }
}
