//! TUI application module
//!
//! Contains the screen flow controller, the terminal wrapper, the concrete
//! screens and keyboard navigation.

pub mod app;
pub mod flow;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::{bootstrap, settle_stage, App};
pub use flow::{FlowState, ProgressService, ScreenFlowController, Screens};
pub use state::{key_to_navigation, NavigationAction};
pub use tui::Tui;
