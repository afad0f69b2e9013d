//! Utility functions module
//!
//! Contains the visual helpers shared by every screen: background gradients
//! and text styles.

pub mod gradient;
pub mod typography;

// Re-export commonly used types
pub use gradient::{Backdrops, Gradient, Rgb};
pub use typography::{parse_color, Typography};
