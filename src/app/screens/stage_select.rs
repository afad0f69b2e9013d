//! Stage select screen
//!
//! Lists every stage up to the configured maximum. Stages beyond the unlocked
//! marker are shown but cannot be picked.

use super::{frame_layout, render_help, render_list, render_title, Theme};
use crate::app::state::{Cursor, NavigationAction};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{ListItem, Paragraph},
    Frame,
};

/// Stage select state
#[derive(Debug)]
pub struct StageSelectScreen {
    max_stages: u32,
    unlocked: u32,
    cursor: Cursor,
    message: Option<String>,
}

impl StageSelectScreen {
    /// Cursor starts on the highest unlocked stage
    pub fn new(max_stages: u32, unlocked: u32) -> Self {
        let max_stages = max_stages.max(1);
        let unlocked = unlocked.clamp(1, max_stages);
        Self {
            max_stages,
            unlocked,
            cursor: Cursor::at(max_stages as usize, unlocked as usize - 1),
            message: None,
        }
    }

    pub fn selected(&self) -> u32 {
        self.cursor.index() as u32 + 1
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// `Some(Some(stage))` for a pick, `Some(None)` when backing out
    pub fn handle(&mut self, action: NavigationAction) -> Option<Option<u32>> {
        match action {
            NavigationAction::Up | NavigationAction::Left => self.cursor.previous(),
            NavigationAction::Down | NavigationAction::Right => self.cursor.next(),
            NavigationAction::Select => {
                let stage = self.selected();
                if stage <= self.unlocked {
                    return Some(Some(stage));
                }
                self.message = Some(format!("Stage {} is locked", stage));
            }
            NavigationAction::Back | NavigationAction::Quit | NavigationAction::Menu => {
                return Some(None)
            }
            NavigationAction::None => {}
        }
        None
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let area = f.size();
        f.render_widget(&theme.backdrops.select, area);

        let [header, body, footer] = frame_layout(area);
        let subtitle = format!("{} of {} stages unlocked", self.unlocked, self.max_stages);
        render_title(f, header, theme, "SELECT STAGE", &subtitle);

        let items: Vec<ListItem> = (1..=self.max_stages)
            .map(|stage| {
                if stage <= self.unlocked {
                    ListItem::new(format!("Stage {}", stage))
                } else {
                    ListItem::new(format!("Stage {}  [locked]", stage)).style(theme.typography.small)
                }
            })
            .collect();

        let list_height = body.height.saturating_sub(1);
        render_list(
            f,
            Rect::new(body.x, body.y, body.width, list_height),
            theme,
            "Stages",
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
            &[("↑↓", "Navigate"), ("Enter", "Play"), ("Esc", "Back")],
        );
    }
}
