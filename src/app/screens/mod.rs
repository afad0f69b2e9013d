//! Game screen components
//!
//! Each screen owns its selection state, turns navigation actions into an
//! outcome, and renders itself over its own gradient backdrop.

pub mod inventory;
pub mod menu;
pub mod results;
pub mod shop;
pub mod stage;
pub mod stage_select;

pub use inventory::{InventoryEvent, InventoryScreen};
pub use menu::MainMenuScreen;
pub use results::{GameOverScreen, StageClearedScreen};
pub use shop::{ShopEvent, ShopScreen};
pub use stage::StageScreen;
pub use stage_select::StageSelectScreen;

use crate::util::{Backdrops, Typography};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Styles and backdrops shared by every screen
#[derive(Debug, Clone)]
pub struct Theme {
    pub typography: Typography,
    pub backdrops: Backdrops,
}

/// Title, body and help rows used by the menu-style screens
fn frame_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn render_title(f: &mut Frame, area: Rect, theme: &Theme, title: &str, subtitle: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), theme.typography.title)),
        Line::from(Span::styled(subtitle.to_string(), theme.typography.normal)),
    ];
    let header = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    items: Vec<ListItem>,
    selected: usize,
) {
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.typography.small)
                .title(Span::styled(title.to_string(), theme.typography.normal)),
        )
        .style(theme.typography.normal)
        .highlight_style(theme.typography.highlight.add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_help(f: &mut Frame, area: Rect, theme: &Theme, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(key.to_string(), theme.typography.highlight));
        spans.push(Span::styled(format!(" {}  ", label), theme.typography.small));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.typography.small),
        );
    f.render_widget(help, area);
}

/// A `width × height` box centered in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Theme;
    use crate::config::Palette;
    use crate::util::{Backdrops, Typography};
    use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

    pub fn theme() -> Theme {
        Theme {
            typography: Typography::from_palette(&Palette::default()).unwrap(),
            backdrops: Backdrops::build(20).unwrap(),
        }
    }

    /// Render into an off-screen buffer and return its text
    pub fn render_text<F: FnOnce(&mut Frame)>(width: u16, height: u16, draw: F) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }
}
