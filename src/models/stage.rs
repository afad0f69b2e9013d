//! Stage simulation
//!
//! Grid-based arcade logic for one stage: the player ship on the bottom row,
//! enemies descending from the top, bullets rising from the ship. Pure state,
//! advanced one tick at a time, deterministic for a given seed.

use crate::models::upgrades::{Upgrades, Weapon};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const STARTING_LIVES: u32 = 3;
const FIRE_COOLDOWN: u8 = 2;
const MIN_INTERVAL: u64 = 2;

/// Cell coordinates, `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Difficulty knobs derived from the stage number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageParams {
    pub stage: u32,
    pub width: u16,
    pub height: u16,
    pub kill_target: u32,
    /// Ticks between enemy spawns
    pub spawn_interval: u64,
    /// Ticks between enemy descents
    pub descent_interval: u64,
}

impl StageParams {
    pub fn for_stage(stage: u32, width: u16, height: u16) -> Self {
        let stage = stage.max(1);
        let level = u64::from(stage);
        Self {
            stage,
            width,
            height,
            kill_target: 6 + 2 * stage,
            spawn_interval: 14u64.saturating_sub(level).max(MIN_INTERVAL),
            descent_interval: 9u64.saturating_sub(level / 2).max(MIN_INTERVAL),
        }
    }

    fn player_row(&self) -> u16 {
        self.height - 1
    }
}

/// Player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Left,
    Right,
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Running,
    Cleared,
    Lost,
}

/// Live state of one stage
#[derive(Debug, Clone)]
pub struct StageState {
    params: StageParams,
    player_x: u16,
    enemies: Vec<Position>,
    bullets: Vec<Position>,
    kills: u32,
    lives: u32,
    coins_earned: u32,
    tick: u64,
    cooldown: u8,
    upgrades: Upgrades,
    status: StageStatus,
    rng: SmallRng,
}

impl StageState {
    /// Start a stage with the player's current counters
    pub fn new(params: StageParams, upgrades: Upgrades, seed: u64) -> Self {
        Self {
            player_x: params.width / 2,
            params,
            enemies: Vec::new(),
            bullets: Vec::new(),
            kills: 0,
            lives: STARTING_LIVES,
            coins_earned: 0,
            tick: 0,
            cooldown: 0,
            upgrades,
            status: StageStatus::Running,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn params(&self) -> &StageParams {
        &self.params
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn player(&self) -> Position {
        Position::new(self.player_x, self.params.player_row())
    }

    pub fn enemies(&self) -> &[Position] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Position] {
        &self.bullets
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn coins_earned(&self) -> u32 {
        self.coins_earned
    }

    /// Counters including coins earned and ammunition spent so far
    pub fn upgrades(&self) -> &Upgrades {
        &self.upgrades
    }

    /// The weapon that will actually fire, empty weapons fall back to the blaster
    pub fn active_weapon(&self) -> Weapon {
        let equipped = self.upgrades.equipped;
        match self.upgrades.ammo(equipped) {
            Some(0) => Weapon::Blaster,
            _ => equipped,
        }
    }

    /// Apply one player command
    pub fn apply(&mut self, input: Input) {
        if self.status != StageStatus::Running {
            return;
        }
        match input {
            Input::Left => self.player_x = self.player_x.saturating_sub(1),
            Input::Right => {
                self.player_x = (self.player_x + 1).min(self.params.width - 1);
            }
            Input::Fire => self.fire(),
        }
    }

    fn fire(&mut self) {
        if self.cooldown > 0 {
            return;
        }
        let x = self.player_x;
        let muzzle = self.params.player_row() - 1;
        match self.active_weapon() {
            Weapon::Blaster => self.bullets.push(Position::new(x, muzzle)),
            Weapon::Shotgun => {
                self.upgrades.consume(Weapon::Shotgun, 1);
                if x > 0 {
                    self.bullets.push(Position::new(x - 1, muzzle));
                }
                self.bullets.push(Position::new(x, muzzle));
                if x + 1 < self.params.width {
                    self.bullets.push(Position::new(x + 1, muzzle));
                }
            }
            Weapon::MachineGun => {
                let taken = self.upgrades.consume(Weapon::MachineGun, 2);
                for offset in 0..taken as u16 {
                    self.bullets.push(Position::new(x, muzzle - offset));
                }
            }
        }
        self.cooldown = FIRE_COOLDOWN;
        self.resolve_hits();
        self.update_status();
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> StageStatus {
        if self.status != StageStatus::Running {
            return self.status;
        }
        self.tick += 1;
        self.cooldown = self.cooldown.saturating_sub(1);

        self.bullets.retain_mut(|bullet| {
            if bullet.y == 0 {
                return false;
            }
            bullet.y -= 1;
            true
        });
        self.resolve_hits();

        if self.tick % self.params.descent_interval == 0 {
            for enemy in &mut self.enemies {
                enemy.y += 1;
            }
            self.resolve_hits();
        }

        let player_row = self.params.player_row();
        let before = self.enemies.len();
        self.enemies.retain(|enemy| enemy.y < player_row);
        let breached = (before - self.enemies.len()) as u32;
        self.lives = self.lives.saturating_sub(breached);

        if self.tick % self.params.spawn_interval == 0 {
            let x = self.rng.gen_range(0..self.params.width);
            self.enemies.push(Position::new(x, 0));
            self.resolve_hits();
        }

        self.update_status();
        self.status
    }

    fn resolve_hits(&mut self) {
        let mut hits = 0;
        let mut i = 0;
        while i < self.bullets.len() {
            let bullet = self.bullets[i];
            match self.enemies.iter().position(|enemy| *enemy == bullet) {
                Some(j) => {
                    self.enemies.swap_remove(j);
                    self.bullets.swap_remove(i);
                    hits += 1;
                }
                None => i += 1,
            }
        }
        if hits > 0 {
            let coins = hits * self.params.stage;
            self.kills += hits;
            self.coins_earned += coins;
            self.upgrades.add_coins(coins);
        }
    }

    // A kill landing on the same tick as the last breach still clears the stage.
    fn update_status(&mut self) {
        if self.kills >= self.params.kill_target {
            self.status = StageStatus::Cleared;
        } else if self.lives == 0 {
            self.status = StageStatus::Lost;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(upgrades: Upgrades) -> StageState {
        StageState::new(StageParams::for_stage(1, 20, 12), upgrades, 7)
    }

    #[test]
    fn test_params_scale_with_stage() {
        let first = StageParams::for_stage(1, 40, 22);
        let tenth = StageParams::for_stage(10, 40, 22);
        assert_eq!(first.kill_target, 8);
        assert_eq!(tenth.kill_target, 26);
        assert!(tenth.spawn_interval < first.spawn_interval);
        assert!(tenth.descent_interval < first.descent_interval);

        let extreme = StageParams::for_stage(99, 40, 22);
        assert_eq!(extreme.spawn_interval, MIN_INTERVAL);
        assert_eq!(extreme.descent_interval, MIN_INTERVAL);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = stage(Upgrades::default());
        let mut b = stage(Upgrades::default());
        for _ in 0..200 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.enemies(), b.enemies());
        assert_eq!(a.lives(), b.lives());
    }

    #[test]
    fn test_player_movement_is_clamped() {
        let mut state = stage(Upgrades::default());
        for _ in 0..50 {
            state.apply(Input::Left);
        }
        assert_eq!(state.player().x, 0);
        for _ in 0..50 {
            state.apply(Input::Right);
        }
        assert_eq!(state.player().x, 19);
    }

    #[test]
    fn test_bullet_destroys_enemy_and_pays_coins() {
        let mut state = stage(Upgrades::default());
        let x = state.player().x;
        state.enemies.push(Position::new(x, 5));
        state.apply(Input::Fire);

        for _ in 0..10 {
            state.tick();
            if state.kills() == 1 {
                break;
            }
        }
        assert_eq!(state.kills(), 1);
        assert_eq!(state.coins_earned(), 1);
        assert_eq!(state.upgrades().coins, 1);
        assert!(!state.enemies().contains(&Position::new(x, 5)));
    }

    #[test]
    fn test_reaching_kill_target_clears() {
        let mut state = stage(Upgrades::default());
        state.kills = state.params().kill_target - 1;
        let x = state.player().x;
        state.enemies.push(Position::new(x, state.params().height - 2));
        state.apply(Input::Fire);
        assert_eq!(state.status(), StageStatus::Cleared);
        assert_eq!(state.tick(), StageStatus::Cleared);
    }

    #[test]
    fn test_breaches_cost_lives_until_lost() {
        let mut state = stage(Upgrades::default());
        let last_row = state.params().height - 2;
        for x in 0..3 {
            state.enemies.push(Position::new(x, last_row));
        }
        let descent = state.params().descent_interval;
        for _ in 0..descent {
            state.tick();
        }
        assert_eq!(state.lives(), 0);
        assert_eq!(state.status(), StageStatus::Lost);

        state.apply(Input::Fire);
        assert!(state.bullets().is_empty());
    }

    #[test]
    fn test_shotgun_spreads_and_consumes_shells() {
        let upgrades = Upgrades {
            shotgun: 1,
            equipped: Weapon::Shotgun,
            ..Upgrades::default()
        };
        let mut state = stage(upgrades);
        state.apply(Input::Fire);
        assert_eq!(state.bullets().len(), 3);
        assert_eq!(state.upgrades().shotgun, 0);
        assert_eq!(state.active_weapon(), Weapon::Blaster);
    }

    #[test]
    fn test_machine_gun_uses_remaining_rounds() {
        let upgrades = Upgrades {
            machinegun: 3,
            equipped: Weapon::MachineGun,
            ..Upgrades::default()
        };
        let mut state = stage(upgrades);
        state.apply(Input::Fire);
        assert_eq!(state.bullets().len(), 2);
        assert_eq!(state.upgrades().machinegun, 1);

        for _ in 0..FIRE_COOLDOWN {
            state.tick();
        }
        state.apply(Input::Fire);
        assert_eq!(state.upgrades().machinegun, 0);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = stage(Upgrades::default());
        state.apply(Input::Fire);
        state.apply(Input::Fire);
        assert_eq!(state.bullets().len(), 1);
    }
}
