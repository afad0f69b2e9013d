//! Main menu screen
//!
//! Play, Select Stage, Shop, Inventory and Quit, plus the unlocked stage and
//! coin balance.

use super::{frame_layout, render_help, render_list, render_title, Theme};
use crate::app::flow::MenuChoice;
use crate::app::state::{Cursor, NavigationAction};
use ratatui::{widgets::ListItem, Frame};

const OPTIONS: [MenuChoice; 5] = [
    MenuChoice::Play,
    MenuChoice::SelectStage,
    MenuChoice::Shop,
    MenuChoice::Inventory,
    MenuChoice::Quit,
];

fn label(choice: MenuChoice) -> &'static str {
    match choice {
        MenuChoice::Play => "Play",
        MenuChoice::SelectStage => "Select Stage",
        MenuChoice::Shop => "Shop",
        MenuChoice::Inventory => "Inventory",
        MenuChoice::Quit => "Quit",
    }
}

/// Main menu state
#[derive(Debug)]
pub struct MainMenuScreen {
    title: String,
    unlocked: u32,
    coins: u32,
    cursor: Cursor,
}

impl MainMenuScreen {
    pub fn new(title: &str, unlocked: u32, coins: u32) -> Self {
        Self {
            title: title.to_string(),
            unlocked,
            coins,
            cursor: Cursor::new(OPTIONS.len()),
        }
    }

    pub fn selected(&self) -> MenuChoice {
        OPTIONS[self.cursor.index()]
    }

    /// Returns the choice once the player confirms one
    pub fn handle(&mut self, action: NavigationAction) -> Option<MenuChoice> {
        match action {
            NavigationAction::Up => self.cursor.previous(),
            NavigationAction::Down => self.cursor.next(),
            NavigationAction::Select => return Some(self.selected()),
            NavigationAction::Back | NavigationAction::Quit => return Some(MenuChoice::Quit),
            _ => {}
        }
        None
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let area = f.size();
        f.render_widget(&theme.backdrops.menu, area);

        let [header, body, footer] = frame_layout(area);
        let subtitle = format!("Stage {} unlocked  |  {} coins", self.unlocked, self.coins);
        render_title(f, header, theme, &self.title, &subtitle);

        let items: Vec<ListItem> = OPTIONS.iter().map(|c| ListItem::new(label(*c))).collect();
        render_list(f, body, theme, "Main Menu", items, self.cursor.index());

        render_help(
            f,
            footer,
            theme,
            &[("↑↓", "Navigate"), ("Enter", "Select"), ("Q", "Quit")],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::{render_text, theme};

    #[test]
    fn test_default_selection_is_play() {
        let mut screen = MainMenuScreen::new("STAGESHOT", 1, 0);
        assert_eq!(screen.handle(NavigationAction::Select), Some(MenuChoice::Play));
    }

    #[test]
    fn test_navigation_reaches_every_option() {
        let mut screen = MainMenuScreen::new("STAGESHOT", 1, 0);
        let mut seen = Vec::new();
        for _ in 0..OPTIONS.len() {
            seen.push(screen.selected());
            assert_eq!(screen.handle(NavigationAction::Down), None);
        }
        assert_eq!(seen, OPTIONS.to_vec());
        assert_eq!(screen.selected(), MenuChoice::Play);

        screen.handle(NavigationAction::Up);
        assert_eq!(screen.selected(), MenuChoice::Quit);
    }

    #[test]
    fn test_escape_and_q_quit() {
        let mut screen = MainMenuScreen::new("STAGESHOT", 1, 0);
        assert_eq!(screen.handle(NavigationAction::Back), Some(MenuChoice::Quit));
        assert_eq!(screen.handle(NavigationAction::Quit), Some(MenuChoice::Quit));
    }

    #[test]
    fn test_render_shows_status() {
        let screen = MainMenuScreen::new("STAGESHOT", 4, 120);
        let theme = theme();
        let text = render_text(60, 20, |f| screen.render(f, &theme));
        assert!(text.contains("STAGESHOT"));
        assert!(text.contains("Stage 4 unlocked"));
        assert!(text.contains("120 coins"));
        assert!(text.contains("Select Stage"));
    }
}
