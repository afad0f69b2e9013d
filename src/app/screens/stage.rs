//! Stage play screen
//!
//! Wraps a [`StageState`] with pause handling and draws the playfield, the
//! HUD and the pause overlay.

use super::{centered_rect, Theme};
use crate::app::flow::StageOutcome;
use crate::app::state::NavigationAction;
use crate::app::tui::playfield_area;
use crate::models::{Input, StageState, StageStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const PLAYER_GLYPH: char = 'A';
const ENEMY_GLYPH: char = 'V';
const BULLET_GLYPH: char = '|';

/// Stage play state
#[derive(Debug)]
pub struct StageScreen {
    state: StageState,
    paused: bool,
}

impl StageScreen {
    pub fn new(state: StageState) -> Self {
        Self {
            state,
            paused: false,
        }
    }

    pub fn state(&self) -> &StageState {
        &self.state
    }

    pub fn into_state(self) -> StageState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Apply a key press; only the pause overlay can abandon the stage
    pub fn handle(&mut self, action: NavigationAction) -> Option<StageOutcome> {
        if self.paused {
            match action {
                NavigationAction::Menu => return Some(StageOutcome::ReturnToMenu),
                NavigationAction::Back | NavigationAction::Quit | NavigationAction::Select => {
                    self.paused = false
                }
                _ => {}
            }
            return None;
        }

        match action {
            NavigationAction::Left => self.state.apply(Input::Left),
            NavigationAction::Right => self.state.apply(Input::Right),
            NavigationAction::Select | NavigationAction::Up => self.state.apply(Input::Fire),
            NavigationAction::Back | NavigationAction::Quit => self.paused = true,
            _ => {}
        }
        Self::outcome(self.state.status())
    }

    /// Advance one tick unless paused
    pub fn tick(&mut self) -> Option<StageOutcome> {
        if self.paused {
            return None;
        }
        Self::outcome(self.state.tick())
    }

    fn outcome(status: StageStatus) -> Option<StageOutcome> {
        match status {
            StageStatus::Running => None,
            StageStatus::Cleared => Some(StageOutcome::Cleared),
            StageStatus::Lost => Some(StageOutcome::Lost),
        }
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme, center: bool) {
        let area = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        self.render_hud(f, chunks[0], theme);

        let params = self.state.params();
        let outer = playfield_area(chunks[1], params.width + 2, params.height + 2, center);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.typography.small);
        let field = block.inner(outer);
        f.render_widget(&theme.backdrops.game, field);
        f.render_widget(block, outer);
        self.render_field(f, field, theme);

        if self.paused {
            self.render_pause(f, area, theme);
        }
    }

    fn render_hud(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let state = &self.state;
        let weapon = state.active_weapon();
        let ammo = match state.upgrades().ammo(weapon) {
            Some(count) => count.to_string(),
            None => "∞".to_string(),
        };
        let hud = Line::from(vec![
            Span::styled(format!(" Stage {} ", state.params().stage), theme.typography.title),
            Span::styled(
                format!(
                    " Kills {}/{}  Lives {}  Coins {}  {} [{}]",
                    state.kills(),
                    state.params().kill_target,
                    state.lives(),
                    state.upgrades().coins,
                    weapon.label(),
                    ammo
                ),
                theme.typography.normal,
            ),
        ]);
        f.render_widget(Paragraph::new(hud), area);
    }

    fn render_field(&self, f: &mut Frame, field: Rect, theme: &Theme) {
        let buf = f.buffer_mut();
        let mut put = |x: u16, y: u16, glyph: char, style: Style| {
            if x < field.width && y < field.height {
                buf.get_mut(field.x + x, field.y + y)
                    .set_char(glyph)
                    .set_style(style);
            }
        };

        for enemy in self.state.enemies() {
            put(enemy.x, enemy.y, ENEMY_GLYPH, theme.typography.highlight);
        }
        for bullet in self.state.bullets() {
            put(bullet.x, bullet.y, BULLET_GLYPH, theme.typography.normal);
        }
        let player = self.state.player();
        put(player.x, player.y, PLAYER_GLYPH, theme.typography.title);
    }

    fn render_pause(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let overlay = centered_rect(area, 30, 6);
        let lines = vec![
            Line::from(Span::styled("PAUSED", theme.typography.title)),
            Line::from(""),
            Line::from(Span::styled("Esc resume  |  M menu", theme.typography.small)),
        ];
        f.render_widget(Clear, overlay);
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.typography.highlight),
            ),
            overlay,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::testing::{render_text, theme};
    use crate::models::{StageParams, Upgrades};

    fn screen() -> StageScreen {
        StageScreen::new(StageState::new(
            StageParams::for_stage(2, 20, 10),
            Upgrades::default(),
            3,
        ))
    }

    #[test]
    fn test_movement_and_fire() {
        let mut screen = screen();
        let start = screen.state().player().x;
        assert_eq!(screen.handle(NavigationAction::Left), None);
        assert_eq!(screen.state().player().x, start - 1);
        screen.handle(NavigationAction::Select);
        assert_eq!(screen.state().bullets().len(), 1);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut screen = screen();
        screen.handle(NavigationAction::Back);
        assert!(screen.is_paused());

        let x = screen.state().player().x;
        screen.handle(NavigationAction::Left);
        for _ in 0..50 {
            assert_eq!(screen.tick(), None);
        }
        assert_eq!(screen.state().player().x, x);
        assert!(screen.state().enemies().is_empty());

        screen.handle(NavigationAction::Back);
        assert!(!screen.is_paused());
    }

    #[test]
    fn test_menu_only_from_pause() {
        let mut screen = screen();
        assert_eq!(screen.handle(NavigationAction::Menu), None);
        screen.handle(NavigationAction::Quit);
        assert_eq!(
            screen.handle(NavigationAction::Menu),
            Some(StageOutcome::ReturnToMenu)
        );
    }

    #[test]
    fn test_stage_ends_with_an_outcome() {
        let mut screen = screen();
        let mut outcome = None;
        for _ in 0..10_000 {
            outcome = screen.tick();
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(StageOutcome::Lost));
        assert_eq!(screen.state().lives(), 0);
    }

    #[test]
    fn test_render_draws_hud_and_player() {
        let screen = screen();
        let theme = theme();
        let text = render_text(40, 16, |f| screen.render(f, &theme, true));
        assert!(text.contains("Stage 2"));
        assert!(text.contains("Kills 0/10"));
        assert!(text.contains("Lives 3"));
        assert!(text.contains(PLAYER_GLYPH));
    }

    #[test]
    fn test_render_pause_overlay() {
        let mut screen = screen();
        screen.handle(NavigationAction::Back);
        let theme = theme();
        let text = render_text(40, 16, |f| screen.render(f, &theme, true));
        assert!(text.contains("PAUSED"));
    }
}
