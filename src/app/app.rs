//! Main application controller
//!
//! Terminal-backed implementation of [`Screens`]. Each call runs its own
//! draw/input loop on the shared terminal until the player decides.

use crate::{
    app::{
        flow::{
            ClearedChoice, GameOverChoice, MenuChoice, ScreenFlowController, Screens,
            StageOutcome,
        },
        screens::{
            GameOverScreen, InventoryEvent, InventoryScreen, MainMenuScreen, ShopEvent,
            ShopScreen, StageClearedScreen, StageScreen, StageSelectScreen, Theme,
        },
        state::{key_to_navigation, NavigationAction},
        tui::Tui,
    },
    config::{
        persistence::{ProgressStore, UpgradeStore},
        GameConfig,
    },
    models::{StageParams, StageState, Upgrades},
    util::{Backdrops, Typography},
    GameError, Result, StartupStage,
};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Shared styles and backdrops
    theme: Theme,
    config: GameConfig,
    /// Live counters, written back after every change
    upgrades: Upgrades,
    upgrade_store: UpgradeStore,
}

/// Build everything the main loop depends on and hand it to a controller
///
/// Faults are tagged with the step that raised them. The terminal is taken
/// over last so that earlier faults leave the shell untouched.
pub fn bootstrap(config: GameConfig) -> Result<ScreenFlowController<App, ProgressStore>> {
    config
        .validate()
        .map_err(|e| GameError::startup(StartupStage::Config, e))?;
    let typography = Typography::build(&config.palette)
        .map_err(|e| GameError::startup(StartupStage::Typography, e))?;
    let backdrops = Backdrops::build(config.height)
        .map_err(|e| GameError::startup(StartupStage::Gradients, e))?;
    let progress = ProgressStore::open(&config.data_dir, config.max_stages)
        .map_err(|e| GameError::startup(StartupStage::Progress, e))?;

    let upgrade_store = UpgradeStore::new(&config.data_dir);
    let upgrades = upgrade_store.load_tolerant();

    let mut tui = Tui::new().map_err(|e| GameError::startup(StartupStage::Terminal, e))?;
    tui.init()
        .map_err(|e| GameError::startup(StartupStage::Terminal, e))?;

    info!(
        data_dir = %config.data_dir.display(),
        max_stages = config.max_stages,
        coins = upgrades.coins,
        "Startup complete"
    );

    let max_stages = config.max_stages;
    let app = App {
        tui,
        theme: Theme {
            typography,
            backdrops,
        },
        config,
        upgrades,
        upgrade_store,
    };
    Ok(ScreenFlowController::new(app, progress, max_stages))
}

/// Spawn seed for a stage: derived from the configured seed, random otherwise
pub fn stage_seed(seed: Option<u64>, stage: u32) -> u64 {
    match seed {
        Some(seed) => seed.wrapping_add(u64::from(stage)),
        None => rand::thread_rng().gen(),
    }
}

/// Persist the counters a finished or abandoned stage leaves behind
pub fn settle_stage(store: &UpgradeStore, stage: u32, state: &StageState) -> Result<Upgrades> {
    info!(
        stage,
        kills = state.kills(),
        coins_earned = state.coins_earned(),
        "Stage ended"
    );
    let upgrades = state.upgrades().clone();
    store.save(&upgrades)?;
    Ok(upgrades)
}

impl App {
    /// Leave raw mode and the alternate screen
    pub fn shutdown(&mut self) -> Result<()> {
        self.tui.restore()
    }

    /// Wait one tick for a key press
    fn next_action(&mut self) -> Result<NavigationAction> {
        let key = self.tui.next_key(self.config.tick())?;
        Ok(key.map(key_to_navigation).unwrap_or(NavigationAction::None))
    }

    fn save_upgrades(&self) -> Result<()> {
        self.upgrade_store.save(&self.upgrades)?;
        debug!(
            coins = self.upgrades.coins,
            shotgun = self.upgrades.shotgun,
            machinegun = self.upgrades.machinegun,
            "Upgrades saved"
        );
        Ok(())
    }
}

impl Screens for App {
    fn main_menu(&mut self, unlocked: u32) -> Result<MenuChoice> {
        let mut screen = MainMenuScreen::new(&self.config.title, unlocked, self.upgrades.coins);
        loop {
            self.tui.draw(|f| screen.render(f, &self.theme))?;
            if let Some(choice) = screen.handle(self.next_action()?) {
                return Ok(choice);
            }
        }
    }

    fn shop(&mut self) -> Result<()> {
        let mut screen = ShopScreen::new();
        loop {
            self.tui
                .draw(|f| screen.render(f, &self.theme, &self.upgrades))?;
            let action = self.next_action()?;
            match screen.handle(action, &mut self.upgrades) {
                ShopEvent::Purchased(item) => {
                    info!(item = ?item, coins = self.upgrades.coins, "Item purchased");
                    self.save_upgrades()?;
                }
                ShopEvent::Refused(item) => {
                    debug!(item = ?item, coins = self.upgrades.coins, "Purchase refused");
                }
                ShopEvent::Leave => return Ok(()),
                ShopEvent::Stay => {}
            }
        }
    }

    fn inventory(&mut self) -> Result<()> {
        let mut screen = InventoryScreen::new(&self.upgrades);
        loop {
            self.tui
                .draw(|f| screen.render(f, &self.theme, &self.upgrades))?;
            let action = self.next_action()?;
            match screen.handle(action, &mut self.upgrades) {
                InventoryEvent::Equipped(weapon) => {
                    info!(weapon = weapon.label(), "Weapon equipped");
                    self.save_upgrades()?;
                }
                InventoryEvent::Leave => return Ok(()),
                InventoryEvent::Stay => {}
            }
        }
    }

    fn stage_select(&mut self, unlocked: u32) -> Result<Option<u32>> {
        let mut screen = StageSelectScreen::new(self.config.max_stages, unlocked);
        loop {
            self.tui.draw(|f| screen.render(f, &self.theme))?;
            if let Some(pick) = screen.handle(self.next_action()?) {
                return Ok(pick);
            }
        }
    }

    fn play_stage(&mut self, stage: u32) -> Result<StageOutcome> {
        let params = StageParams::for_stage(stage, self.config.width, self.config.height);
        let seed = stage_seed(self.config.seed, stage);
        debug!(stage, seed, kill_target = params.kill_target, "Stage starting");

        let mut screen = StageScreen::new(StageState::new(params, self.upgrades.clone(), seed));
        let tick = self.config.tick();
        let center = self.config.center;
        let mut last_tick = Instant::now();

        let outcome = loop {
            self.tui.draw(|f| screen.render(f, &self.theme, center))?;

            let timeout = tick.saturating_sub(last_tick.elapsed());
            if let Some(key) = self.tui.next_key(timeout)? {
                if let Some(outcome) = screen.handle(key_to_navigation(key)) {
                    break outcome;
                }
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();
                if let Some(outcome) = screen.tick() {
                    break outcome;
                }
            }
        };

        self.upgrades = settle_stage(&self.upgrade_store, stage, &screen.into_state())?;
        Ok(outcome)
    }

    fn stage_cleared(&mut self, stage: u32) -> Result<ClearedChoice> {
        let mut screen = StageClearedScreen::new(stage, self.upgrades.coins);
        loop {
            self.tui.draw(|f| screen.render(f, &self.theme))?;
            if let Some(choice) = screen.handle(self.next_action()?) {
                return Ok(choice);
            }
        }
    }

    fn game_over(&mut self, won: bool, stage: u32) -> Result<GameOverChoice> {
        let mut screen = GameOverScreen::new(won, stage);
        loop {
            self.tui.draw(|f| screen.render(f, &self.theme))?;
            if let Some(choice) = screen.handle(self.next_action()?) {
                return Ok(choice);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Input, Weapon};
    use tempfile::TempDir;

    #[test]
    fn test_configured_seed_is_per_stage() {
        assert_eq!(stage_seed(Some(100), 1), 101);
        assert_eq!(stage_seed(Some(100), 7), 107);
        assert_eq!(stage_seed(Some(u64::MAX), 1), 0);
    }

    #[test]
    fn test_bootstrap_reports_progress_fault_before_terminal() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(crate::PROGRESS_FILE), "{ not json").unwrap();
        let config = GameConfig::default().with_data_dir(temp_dir.path().to_path_buf());

        let err = bootstrap(config).err().unwrap();
        assert_eq!(
            crate::error::startup_stage(&err),
            Some(StartupStage::Progress)
        );
    }

    #[test]
    fn test_bootstrap_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = GameConfig::default()
            .with_data_dir(temp_dir.path().to_path_buf())
            .with_size(40, 1);

        let err = bootstrap(config).err().unwrap();
        assert_eq!(crate::error::startup_stage(&err), Some(StartupStage::Config));
    }

    #[test]
    fn test_settled_stage_writes_spent_ammunition() {
        let temp_dir = TempDir::new().unwrap();
        let store = UpgradeStore::new(temp_dir.path());
        let upgrades = Upgrades {
            shotgun: 3,
            coins: 10,
            equipped: Weapon::Shotgun,
            ..Upgrades::default()
        };
        store.save(&upgrades).unwrap();

        let mut state = StageState::new(StageParams::for_stage(1, 30, 15), upgrades, 5);
        state.apply(Input::Fire);

        let settled = settle_stage(&store, 1, &state).unwrap();
        assert_eq!(settled.shotgun, 2);

        let on_disk = store.load().unwrap();
        assert_eq!(on_disk.shotgun, 2);
        assert_eq!(on_disk.coins, 10);
        assert_eq!(on_disk.equipped, Weapon::Shotgun);
    }
}
