//! Inventory screen
//!
//! Shows the ammunition counters and lets the player equip a weapon.

use super::{frame_layout, render_help, render_list, render_title, Theme};
use crate::app::state::{Cursor, NavigationAction};
use crate::models::{Upgrades, Weapon};
use ratatui::{widgets::ListItem, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEvent {
    Stay,
    Equipped(Weapon),
    Leave,
}

/// Inventory state
#[derive(Debug)]
pub struct InventoryScreen {
    cursor: Cursor,
}

fn stock_label(weapon: Weapon, upgrades: &Upgrades) -> String {
    match upgrades.ammo(weapon) {
        None => "unlimited".to_string(),
        Some(0) => "empty".to_string(),
        Some(count) => count.to_string(),
    }
}

impl InventoryScreen {
    /// Cursor starts on the equipped weapon
    pub fn new(upgrades: &Upgrades) -> Self {
        let weapons = Weapon::all();
        let index = weapons
            .iter()
            .position(|w| *w == upgrades.equipped)
            .unwrap_or(0);
        Self {
            cursor: Cursor::at(weapons.len(), index),
        }
    }

    pub fn selected(&self) -> Weapon {
        Weapon::all()[self.cursor.index()]
    }

    pub fn handle(&mut self, action: NavigationAction, upgrades: &mut Upgrades) -> InventoryEvent {
        match action {
            NavigationAction::Up => self.cursor.previous(),
            NavigationAction::Down => self.cursor.next(),
            NavigationAction::Select => {
                let weapon = self.selected();
                if upgrades.equipped != weapon {
                    upgrades.equipped = weapon;
                    return InventoryEvent::Equipped(weapon);
                }
            }
            NavigationAction::Back | NavigationAction::Quit => return InventoryEvent::Leave,
            _ => {}
        }
        InventoryEvent::Stay
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme, upgrades: &Upgrades) {
        let area = f.size();
        f.render_widget(&theme.backdrops.inventory, area);

        let [header, body, footer] = frame_layout(area);
        let subtitle = format!("Equipped: {}", upgrades.equipped.label());
        render_title(f, header, theme, "INVENTORY", &subtitle);

        let items: Vec<ListItem> = Weapon::all()
            .iter()
            .map(|weapon| {
                let marker = if *weapon == upgrades.equipped { "*" } else { " " };
                ListItem::new(format!(
                    "{} {:<12} ammo: {}",
                    marker,
                    weapon.label(),
                    stock_label(*weapon, upgrades)
                ))
            })
            .collect();
        render_list(f, body, theme, "Weapons", items, self.cursor.index());

        render_help(
            f,
            footer,
            theme,
            &[("↑↓", "Navigate"), ("Enter", "Equip"), ("Esc", "Back")],
        );
    }
}
