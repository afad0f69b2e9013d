//! Data models module
//!
//! Contains the persisted progress record, upgrade counters and the stage
//! simulation.

pub mod progress;
pub mod stage;
pub mod upgrades;

// Re-export commonly used types
pub use progress::ProgressRecord;
pub use stage::{Input, Position, StageParams, StageState, StageStatus};
pub use upgrades::{ShopItem, Upgrades, Weapon};
