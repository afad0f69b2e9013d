//! Persisted progress record
//!
//! Tracks the highest stage the player has unlocked. The marker only ever
//! moves forward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PROGRESS_VERSION: u32 = 1;

/// Highest unlocked stage plus bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub version: u32,
    pub max_unlocked: u32,
    /// When the marker last moved
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            version: PROGRESS_VERSION,
            max_unlocked: 1,
            updated_at: None,
        }
    }
}

impl ProgressRecord {
    /// Current marker clamped into `[1, max_stages]`
    pub fn unlocked(&self, max_stages: u32) -> u32 {
        self.max_unlocked.clamp(1, max_stages.max(1))
    }

    /// Raise the marker to `stage` (clamped), returning whether it moved
    pub fn unlock(&mut self, stage: u32, max_stages: u32) -> bool {
        let stage = stage.clamp(1, max_stages.max(1));
        if stage <= self.max_unlocked {
            return false;
        }
        self.max_unlocked = stage;
        self.updated_at = Some(Utc::now());
        true
    }
}
