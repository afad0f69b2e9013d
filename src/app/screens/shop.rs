//! Shop screen
//!
//! Sells ammunition packs for coins. The screen only mutates the counters it
//! is handed; saving them is up to the caller.

use super::{frame_layout, render_help, render_list, render_title, Theme};
use crate::app::state::{Cursor, NavigationAction};
use crate::models::{ShopItem, Upgrades};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{ListItem, Paragraph},
    Frame,
};

/// What a key press did in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEvent {
    Stay,
    Purchased(ShopItem),
    Refused(ShopItem),
    Leave,
}

/// Shop state
#[derive(Debug)]
pub struct ShopScreen {
    cursor: Cursor,
    message: Option<String>,
}

impl Default for ShopScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopScreen {
    pub fn new() -> Self {
        // items plus the trailing "Leave" row
        Self {
            cursor: Cursor::new(ShopItem::all().len() + 1),
            message: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn selected_item(&self) -> Option<ShopItem> {
        ShopItem::all().get(self.cursor.index()).copied()
    }

    pub fn handle(&mut self, action: NavigationAction, upgrades: &mut Upgrades) -> ShopEvent {
        match action {
            NavigationAction::Up => self.cursor.previous(),
            NavigationAction::Down => self.cursor.next(),
            NavigationAction::Back | NavigationAction::Quit => return ShopEvent::Leave,
            NavigationAction::Select => {
                let Some(item) = self.selected_item() else {
                    return ShopEvent::Leave;
                };
                if upgrades.purchase(item) {
                    self.message = Some(format!("Bought {} x{}", item.label(), item.quantity()));
                    return ShopEvent::Purchased(item);
                }
                self.message = Some(format!(
                    "Not enough coins: {} costs {}",
                    item.label(),
                    item.price()
                ));
                return ShopEvent::Refused(item);
            }
            _ => {}
        }
        ShopEvent::Stay
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme, upgrades: &Upgrades) {
        let area = f.size();
        f.render_widget(&theme.backdrops.shop, area);

        let [header, body, footer] = frame_layout(area);
        let subtitle = format!(
            "{} coins  |  shells {}  |  rounds {}",
            upgrades.coins, upgrades.shotgun, upgrades.machinegun
        );
        render_title(f, header, theme, "SHOP", &subtitle);

        let mut items: Vec<ListItem> = ShopItem::all()
            .iter()
            .map(|item| {
                ListItem::new(format!(
                    "{} x{}  -  {} coins",
                    item.label(),
                    item.quantity(),
                    item.price()
                ))
            })
            .collect();
        items.push(ListItem::new("Leave"));

        let list_height = body.height.saturating_sub(1);
        render_list(
            f,
            Rect::new(body.x, body.y, body.width, list_height),
            theme,
            "Items",
            items,
            self.cursor.index(),
        );

        if let Some(message) = &self.message {
            let line = Rect::new(body.x, body.y + list_height, body.width, 1);
            f.render_widget(
                Paragraph::new(Span::styled(format!(" {}", message), theme.typography.highlight)),
                line,
            );
        }

        render_help(
            f,
            footer,
            theme,
            &[("↑↓", "Navigate"), ("Enter", "Buy"), ("Esc", "Back")],
        );
    }
}
