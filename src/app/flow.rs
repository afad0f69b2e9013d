//! Screen flow controller
//!
//! Owns the top-level state machine. Each step hands control to exactly one
//! screen, which blocks until the player decides, and interprets the returned
//! outcome as the next state. Rendering belongs to [`Screens`], persistence to
//! [`ProgressService`]; the controller does neither.

use crate::{GameError, Result};
use tracing::{debug, info, instrument, warn};

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    MainMenu,
    Shop,
    Inventory,
    StageSelect,
    PlayingStage(u32),
    StageCleared(u32),
    GameOver {
        won: bool,
        stage: u32,
    },
    /// Terminal state
    Quit,
}

/// Main menu outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Resume from the highest unlocked stage
    Play,
    Shop,
    Inventory,
    SelectStage,
    Quit,
}

/// Stage-play outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Cleared,
    Lost,
    /// Abandoned from the pause overlay
    ReturnToMenu,
}

/// Intermediate victory screen outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearedChoice {
    Advance,
    ReturnToMenu,
    Quit,
}

/// Game-over screen outcome; after a win `Retry` means back to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    Retry,
    Quit,
}

/// Screen presentation services invoked by the controller
///
/// Every call blocks until the player produces an outcome.
pub trait Screens {
    fn main_menu(&mut self, unlocked: u32) -> Result<MenuChoice>;
    fn shop(&mut self) -> Result<()>;
    fn inventory(&mut self) -> Result<()>;
    /// `None` when the player backs out without picking
    fn stage_select(&mut self, unlocked: u32) -> Result<Option<u32>>;
    fn play_stage(&mut self, stage: u32) -> Result<StageOutcome>;
    fn stage_cleared(&mut self, stage: u32) -> Result<ClearedChoice>;
    fn game_over(&mut self, won: bool, stage: u32) -> Result<GameOverChoice>;
}

/// Tracks the highest unlocked stage
pub trait ProgressService {
    fn max_unlocked(&self) -> u32;
    /// Record `stage` as unlocked; never lowers the marker
    fn record_unlocked(&mut self, stage: u32) -> Result<()>;
}

/// Top-level screen state machine
#[derive(Debug)]
pub struct ScreenFlowController<S, P> {
    screens: S,
    progress: P,
    max_stages: u32,
    state: FlowState,
    /// Unlocked marker as read at the last menu visit
    unlocked: u32,
    stages_played: u32,
}

impl<S: Screens, P: ProgressService> ScreenFlowController<S, P> {
    pub fn new(screens: S, progress: P, max_stages: u32) -> Self {
        Self {
            screens,
            progress,
            max_stages: max_stages.max(1),
            state: FlowState::MainMenu,
            unlocked: 1,
            stages_played: 0,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn stages_played(&self) -> u32 {
        self.stages_played
    }

    pub fn screens(&self) -> &S {
        &self.screens
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn into_parts(self) -> (S, P) {
        (self.screens, self.progress)
    }

    /// Run from the main menu until a quit signal
    #[instrument(skip(self), fields(max_stages = self.max_stages))]
    pub fn run(&mut self) -> Result<()> {
        info!("Starting screen flow");
        let mut state = FlowState::MainMenu;
        while state != FlowState::Quit {
            state = self.step(state)?;
        }
        info!(stages_played = self.stages_played, "Screen flow finished");
        Ok(())
    }

    /// Show the screen for `state` and return the state it leads to
    pub fn step(&mut self, state: FlowState) -> Result<FlowState> {
        self.state = state;
        let next = match state {
            FlowState::MainMenu => self.main_menu()?,
            FlowState::Shop => {
                self.screens.shop()?;
                FlowState::MainMenu
            }
            FlowState::Inventory => {
                self.screens.inventory()?;
                FlowState::MainMenu
            }
            FlowState::StageSelect => self.stage_select()?,
            FlowState::PlayingStage(stage) => self.play_stage(stage)?,
            FlowState::StageCleared(stage) => match self.screens.stage_cleared(stage)? {
                ClearedChoice::Advance => FlowState::PlayingStage(stage + 1),
                ClearedChoice::ReturnToMenu => FlowState::MainMenu,
                ClearedChoice::Quit => FlowState::Quit,
            },
            FlowState::GameOver { won, stage } => match self.screens.game_over(won, stage)? {
                GameOverChoice::Retry => FlowState::MainMenu,
                GameOverChoice::Quit => FlowState::Quit,
            },
            FlowState::Quit => FlowState::Quit,
        };
        debug!(from = ?state, to = ?next, "Screen transition");
        self.state = next;
        Ok(next)
    }

    fn resume_stage(&self) -> u32 {
        self.progress.max_unlocked().clamp(1, self.max_stages)
    }

    fn main_menu(&mut self) -> Result<FlowState> {
        self.unlocked = self.resume_stage();
        let choice = self.screens.main_menu(self.unlocked)?;
        debug!(choice = ?choice, unlocked = self.unlocked, "Menu choice");
        Ok(match choice {
            MenuChoice::Play => FlowState::PlayingStage(self.unlocked),
            MenuChoice::Shop => FlowState::Shop,
            MenuChoice::Inventory => FlowState::Inventory,
            MenuChoice::SelectStage => FlowState::StageSelect,
            MenuChoice::Quit => FlowState::Quit,
        })
    }

    fn stage_select(&mut self) -> Result<FlowState> {
        match self.screens.stage_select(self.unlocked)? {
            Some(stage) if (1..=self.unlocked).contains(&stage) => {
                info!(stage, "Stage picked by player");
                Ok(FlowState::PlayingStage(stage))
            }
            Some(stage) => {
                warn!(stage, unlocked = self.unlocked, "Ignoring locked stage pick");
                Ok(FlowState::MainMenu)
            }
            None => Ok(FlowState::MainMenu),
        }
    }

    fn play_stage(&mut self, stage: u32) -> Result<FlowState> {
        if !(1..=self.max_stages).contains(&stage) {
            return Err(GameError::FlowError(format!(
                "Stage {} outside 1..={}",
                stage, self.max_stages
            )));
        }

        self.stages_played += 1;
        let outcome = self.screens.play_stage(stage)?;
        info!(stage, outcome = ?outcome, "Stage finished");

        Ok(match outcome {
            StageOutcome::ReturnToMenu => FlowState::MainMenu,
            StageOutcome::Lost => FlowState::GameOver { won: false, stage },
            StageOutcome::Cleared if stage < self.max_stages => {
                self.progress.record_unlocked(stage + 1)?;
                FlowState::StageCleared(stage)
            }
            StageOutcome::Cleared => {
                self.progress.record_unlocked(self.max_stages)?;
                FlowState::GameOver {
                    won: true,
                    stage: self.max_stages,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Canned {
        menu: Vec<MenuChoice>,
        picks: Vec<Option<u32>>,
        stages: Vec<StageOutcome>,
        cleared: Vec<ClearedChoice>,
        over: Vec<GameOverChoice>,
        calls: Vec<String>,
    }

    fn next<T: Copy>(queue: &mut Vec<T>) -> Result<T> {
        if queue.is_empty() {
            return Err(GameError::FlowError("script exhausted".to_string()));
        }
        Ok(queue.remove(0))
    }

    impl Screens for Canned {
        fn main_menu(&mut self, unlocked: u32) -> Result<MenuChoice> {
            self.calls.push(format!("menu:{}", unlocked));
            next(&mut self.menu)
        }
        fn shop(&mut self) -> Result<()> {
            self.calls.push("shop".to_string());
            Ok(())
        }
        fn inventory(&mut self) -> Result<()> {
            self.calls.push("inventory".to_string());
            Ok(())
        }
        fn stage_select(&mut self, _unlocked: u32) -> Result<Option<u32>> {
            self.calls.push("select".to_string());
            next(&mut self.picks)
        }
        fn play_stage(&mut self, stage: u32) -> Result<StageOutcome> {
            self.calls.push(format!("play:{}", stage));
            next(&mut self.stages)
        }
        fn stage_cleared(&mut self, stage: u32) -> Result<ClearedChoice> {
            self.calls.push(format!("cleared:{}", stage));
            next(&mut self.cleared)
        }
        fn game_over(&mut self, won: bool, stage: u32) -> Result<GameOverChoice> {
            self.calls.push(format!("over:{}:{}", won, stage));
            next(&mut self.over)
        }
    }

    struct Marker(u32);

    impl ProgressService for Marker {
        fn max_unlocked(&self) -> u32 {
            self.0
        }
        fn record_unlocked(&mut self, stage: u32) -> Result<()> {
            self.0 = self.0.max(stage);
            Ok(())
        }
    }

    #[test]
    fn test_starts_in_main_menu() {
        let controller = ScreenFlowController::new(Canned::default(), Marker(1), 3);
        assert_eq!(controller.state(), FlowState::MainMenu);
        assert_eq!(FlowState::default(), FlowState::MainMenu);
    }

    #[test]
    fn test_play_resumes_from_marker() {
        let screens = Canned {
            menu: vec![MenuChoice::Play],
            ..Canned::default()
        };
        let mut controller = ScreenFlowController::new(screens, Marker(2), 3);
        assert_eq!(
            controller.step(FlowState::MainMenu).unwrap(),
            FlowState::PlayingStage(2)
        );
    }

    #[test]
    fn test_stale_marker_is_clamped() {
        let screens = Canned {
            menu: vec![MenuChoice::Play],
            ..Canned::default()
        };
        let mut controller = ScreenFlowController::new(screens, Marker(40), 3);
        assert_eq!(
            controller.step(FlowState::MainMenu).unwrap(),
            FlowState::PlayingStage(3)
        );
    }

    #[test]
    fn test_clear_then_advance() {
        let screens = Canned {
            stages: vec![StageOutcome::Cleared],
            cleared: vec![ClearedChoice::Advance],
            ..Canned::default()
        };
        let mut controller = ScreenFlowController::new(screens, Marker(1), 3);
        let state = controller.step(FlowState::PlayingStage(1)).unwrap();
        assert_eq!(state, FlowState::StageCleared(1));
        assert_eq!(controller.progress().max_unlocked(), 2);
        assert_eq!(
            controller.step(state).unwrap(),
            FlowState::PlayingStage(2)
        );
    }

    #[test]
    fn test_last_stage_wins() {
        let screens = Canned {
            stages: vec![StageOutcome::Cleared],
            ..Canned::default()
        };
        let mut controller = ScreenFlowController::new(screens, Marker(3), 3);
        assert_eq!(
            controller.step(FlowState::PlayingStage(3)).unwrap(),
            FlowState::GameOver {
                won: true,
                stage: 3
            }
        );
    }

    #[test]
    fn test_locked_pick_returns_to_menu() {
        let screens = Canned {
            menu: vec![MenuChoice::SelectStage],
            picks: vec![Some(3)],
            ..Canned::default()
        };
        let mut controller = ScreenFlowController::new(screens, Marker(2), 5);
        let state = controller.step(FlowState::MainMenu).unwrap();
        assert_eq!(state, FlowState::StageSelect);
        assert_eq!(controller.step(state).unwrap(), FlowState::MainMenu);
    }

    #[test]
    fn test_out_of_range_stage_is_a_flow_error() {
        let mut controller = ScreenFlowController::new(Canned::default(), Marker(1), 3);
        assert!(matches!(
            controller.step(FlowState::PlayingStage(4)),
            Err(GameError::FlowError(_))
        ));
        assert!(controller.screens().calls.is_empty());
    }

    #[test]
    fn test_screen_fault_propagates_from_run() {
        let mut controller = ScreenFlowController::new(Canned::default(), Marker(1), 3);
        assert!(controller.run().is_err());
        assert_eq!(controller.screens().calls, vec!["menu:1".to_string()]);
    }

    #[test]
    fn test_quit_is_absorbing() {
        let mut controller = ScreenFlowController::new(Canned::default(), Marker(1), 3);
        assert_eq!(controller.step(FlowState::Quit).unwrap(), FlowState::Quit);
        assert!(controller.screens().calls.is_empty());
    }
}
