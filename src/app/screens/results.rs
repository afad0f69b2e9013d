//! Stage-cleared and game-over screens

use super::{frame_layout, render_help, render_list, render_title, Theme};
use crate::app::flow::{ClearedChoice, GameOverChoice};
use crate::app::state::{Cursor, NavigationAction};
use ratatui::{widgets::ListItem, Frame};

const CLEARED_OPTIONS: [ClearedChoice; 3] = [
    ClearedChoice::Advance,
    ClearedChoice::ReturnToMenu,
    ClearedChoice::Quit,
];

const GAME_OVER_OPTIONS: [GameOverChoice; 2] = [GameOverChoice::Retry, GameOverChoice::Quit];

/// Intermediate victory screen shown after every stage but the last
#[derive(Debug)]
pub struct StageClearedScreen {
    stage: u32,
    coins: u32,
    cursor: Cursor,
}

impl StageClearedScreen {
    pub fn new(stage: u32, coins: u32) -> Self {
        Self {
            stage,
            coins,
            cursor: Cursor::new(CLEARED_OPTIONS.len()),
        }
    }

    pub fn selected(&self) -> ClearedChoice {
        CLEARED_OPTIONS[self.cursor.index()]
    }

    pub fn handle(&mut self, action: NavigationAction) -> Option<ClearedChoice> {
        match action {
            NavigationAction::Up => self.cursor.previous(),
            NavigationAction::Down => self.cursor.next(),
            NavigationAction::Select => return Some(self.selected()),
            NavigationAction::Back | NavigationAction::Menu => {
                return Some(ClearedChoice::ReturnToMenu)
            }
            NavigationAction::Quit => return Some(ClearedChoice::Quit),
            _ => {}
        }
        None
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let area = f.size();
        f.render_widget(&theme.backdrops.victory, area);

        let [header, body, footer] = frame_layout(area);
        let title = format!("STAGE {} CLEARED", self.stage);
        let subtitle = format!("{} coins banked", self.coins);
        render_title(f, header, theme, &title, &subtitle);

        let items: Vec<ListItem> = CLEARED_OPTIONS
            .iter()
            .map(|choice| {
                ListItem::new(match choice {
                    ClearedChoice::Advance => format!("Next Stage ({})", self.stage + 1),
                    ClearedChoice::ReturnToMenu => "Main Menu".to_string(),
                    ClearedChoice::Quit => "Quit".to_string(),
                })
            })
            .collect();
        render_list(f, body, theme, "Continue", items, self.cursor.index());

        render_help(
            f,
            footer,
            theme,
            &[("↑↓", "Navigate"), ("Enter", "Select"), ("Esc", "Menu")],
        );
    }
}

/// Final screen after a lost stage or the last stage cleared
#[derive(Debug)]
pub struct GameOverScreen {
    won: bool,
    stage: u32,
    cursor: Cursor,
}

impl GameOverScreen {
    pub fn new(won: bool, stage: u32) -> Self {
        Self {
            won,
            stage,
            cursor: Cursor::new(GAME_OVER_OPTIONS.len()),
        }
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn selected(&self) -> GameOverChoice {
        GAME_OVER_OPTIONS[self.cursor.index()]
    }

    pub fn handle(&mut self, action: NavigationAction) -> Option<GameOverChoice> {
        match action {
            NavigationAction::Up => self.cursor.previous(),
            NavigationAction::Down => self.cursor.next(),
            NavigationAction::Select => return Some(self.selected()),
            NavigationAction::Quit => return Some(GameOverChoice::Quit),
            NavigationAction::Back | NavigationAction::Menu => return Some(GameOverChoice::Retry),
            _ => {}
        }
        None
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let area = f.size();
        let backdrop = if self.won {
            &theme.backdrops.victory
        } else {
            &theme.backdrops.defeat
        };
        f.render_widget(backdrop, area);

        let [header, body, footer] = frame_layout(area);
        let (title, subtitle) = if self.won {
            (
                "VICTORY".to_string(),
                format!("All {} stages cleared", self.stage),
            )
        } else {
            ("GAME OVER".to_string(), format!("Fell on stage {}", self.stage))
        };
        render_title(f, header, theme, &title, &subtitle);

        let retry = if self.won { "Main Menu" } else { "Play Again" };
        let items = vec![ListItem::new(retry), ListItem::new("Quit")];
        render_list(f, body, theme, "What now?", items, self.cursor.index());

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
    fn test_cleared_choices() {
        let mut screen = StageClearedScreen::new(2, 10);
        assert_eq!(screen.handle(NavigationAction::Select), Some(ClearedChoice::Advance));
        screen.handle(NavigationAction::Down);
        assert_eq!(
            screen.handle(NavigationAction::Select),
            Some(ClearedChoice::ReturnToMenu)
        );
        assert_eq!(screen.handle(NavigationAction::Quit), Some(ClearedChoice::Quit));
        assert_eq!(
            screen.handle(NavigationAction::Back),
            Some(ClearedChoice::ReturnToMenu)
        );
        assert_eq!(screen.handle(NavigationAction::Left), None);
    }

    #[test]
    fn test_game_over_choices() {
        let mut screen = GameOverScreen::new(false, 3);
        assert_eq!(screen.handle(NavigationAction::Select), Some(GameOverChoice::Retry));
        screen.handle(NavigationAction::Down);
        assert_eq!(screen.handle(NavigationAction::Select), Some(GameOverChoice::Quit));
        assert_eq!(screen.handle(NavigationAction::Quit), Some(GameOverChoice::Quit));
    }

    #[test]
    fn test_render_cleared() {
        let screen = StageClearedScreen::new(4, 37);
        let theme = theme();
        let text = render_text(60, 20, |f| screen.render(f, &theme));
        assert!(text.contains("STAGE 4 CLEARED"));
        assert!(text.contains("37 coins banked"));
        assert!(text.contains("Next Stage (5)"));
    }

    #[test]
    fn test_render_won_and_lost_variants() {
        let theme = theme();

        let won = GameOverScreen::new(true, 10);
        let text = render_text(60, 20, |f| won.render(f, &theme));
        assert!(text.contains("VICTORY"));
        assert!(text.contains("All 10 stages cleared"));

        let lost = GameOverScreen::new(false, 6);
        let text = render_text(60, 20, |f| lost.render(f, &theme));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Fell on stage 6"));
        assert!(text.contains("Play Again"));
    }
}
