//! Upgrade counters
//!
//! Ammunition, coins and the equipped weapon, stored on disk as a flat JSON
//! object. Keys this build does not know about are carried through untouched,
//! whatever their value.

use crate::{GameError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

pub const KEY_SHOTGUN: &str = "shotgun";
pub const KEY_MACHINEGUN: &str = "machinegun";
/// Older save files name the ammunition counters in Portuguese
pub const LEGACY_KEY_SHOTGUN: &str = "espingarda";
pub const LEGACY_KEY_MACHINEGUN: &str = "metralhadora";
pub const KEY_COINS: &str = "coins";
pub const KEY_EQUIPPED: &str = "equipped";

/// Weapons the player can equip from the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weapon {
    /// Single shot, unlimited ammunition
    #[default]
    Blaster,
    /// Three-way spread, one shell per shot
    Shotgun,
    /// Double stream, one round per bullet
    MachineGun,
}

impl Weapon {
    pub fn all() -> [Weapon; 3] {
        [Weapon::Blaster, Weapon::Shotgun, Weapon::MachineGun]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weapon::Blaster => "Blaster",
            Weapon::Shotgun => "Shotgun",
            Weapon::MachineGun => "Machine Gun",
        }
    }

    /// Slot number used in the upgrades file
    pub fn slot(&self) -> i64 {
        match self {
            Weapon::Blaster => 0,
            Weapon::Shotgun => 1,
            Weapon::MachineGun => 2,
        }
    }

    /// Unknown slots fall back to the blaster
    pub fn from_slot(slot: i64) -> Self {
        match slot {
            1 => Weapon::Shotgun,
            2 => Weapon::MachineGun,
            _ => Weapon::Blaster,
        }
    }
}

/// Items sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItem {
    ShotgunShells,
    MachineGunRounds,
}

impl ShopItem {
    pub fn all() -> [ShopItem; 2] {
        [ShopItem::ShotgunShells, ShopItem::MachineGunRounds]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShopItem::ShotgunShells => "Shotgun shells",
            ShopItem::MachineGunRounds => "Machine-gun belt",
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            ShopItem::ShotgunShells => 30,
            ShopItem::MachineGunRounds => 40,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            ShopItem::ShotgunShells => 5,
            ShopItem::MachineGunRounds => 50,
        }
    }
}

/// Counters loaded from and written back to the upgrades file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Upgrades {
    pub shotgun: u32,
    pub machinegun: u32,
    pub coins: u32,
    pub equipped: Weapon,
    /// Keys this build does not interpret
    pub extra: BTreeMap<String, Value>,
}

fn to_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Remove a counter (or its legacy alias) from the map, missing means 0
fn take_counter(map: &mut BTreeMap<String, Value>, key: &str, alias: Option<&str>) -> Result<i64> {
    let legacy = alias.and_then(|alias| map.remove(alias));
    let Some(value) = map.remove(key).or(legacy) else {
        return Ok(0);
    };
    value.as_i64().ok_or_else(|| {
        GameError::PersistenceError(format!("Upgrade counter {} is not an integer: {}", key, value))
    })
}

impl Upgrades {
    /// Build counters from the flat map, missing keys default to 0
    ///
    /// A known counter holding anything but an integer is an error.
    pub fn from_map(mut map: BTreeMap<String, Value>) -> Result<Self> {
        let shotgun = to_count(take_counter(&mut map, KEY_SHOTGUN, Some(LEGACY_KEY_SHOTGUN))?);
        let machinegun = to_count(take_counter(
            &mut map,
            KEY_MACHINEGUN,
            Some(LEGACY_KEY_MACHINEGUN),
        )?);
        let coins = to_count(take_counter(&mut map, KEY_COINS, None)?);
        let equipped = Weapon::from_slot(take_counter(&mut map, KEY_EQUIPPED, None)?);
        Ok(Self {
            shotgun,
            machinegun,
            coins,
            equipped,
            extra: map,
        })
    }

    /// Flatten back into the on-disk representation
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = self.extra.clone();
        map.insert(KEY_SHOTGUN.to_string(), Value::from(self.shotgun));
        map.insert(KEY_MACHINEGUN.to_string(), Value::from(self.machinegun));
        map.insert(KEY_COINS.to_string(), Value::from(self.coins));
        map.insert(KEY_EQUIPPED.to_string(), Value::from(self.equipped.slot()));
        map
    }

    /// Remaining ammunition, `None` for unlimited weapons
    pub fn ammo(&self, weapon: Weapon) -> Option<u32> {
        match weapon {
            Weapon::Blaster => None,
            Weapon::Shotgun => Some(self.shotgun),
            Weapon::MachineGun => Some(self.machinegun),
        }
    }

    /// Take up to `amount` from a weapon's stock, returning how much was taken
    pub fn consume(&mut self, weapon: Weapon, amount: u32) -> u32 {
        let stock = match weapon {
            Weapon::Blaster => return amount,
            Weapon::Shotgun => &mut self.shotgun,
            Weapon::MachineGun => &mut self.machinegun,
        };
        let taken = amount.min(*stock);
        *stock -= taken;
        taken
    }

    /// Buy an item, returning false when the balance does not cover it
    pub fn purchase(&mut self, item: ShopItem) -> bool {
        if self.coins < item.price() {
            return false;
        }
        self.coins -= item.price();
        match item {
            ShopItem::ShotgunShells => {
                self.shotgun = self.shotgun.saturating_add(item.quantity())
            }
            ShopItem::MachineGunRounds => {
                self.machinegun = self.machinegun.saturating_add(item.quantity())
            }
        }
        true
    }

    pub fn add_coins(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }
}
