//! Keyboard navigation
//!
//! Maps raw key events to the small set of actions every screen understands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move left (arrow left, h, a)
    Left,
    /// Move right (arrow right, l, d)
    Right,
    /// Confirm selection or fire (Enter, Space)
    Select,
    /// Go back, or pause during a stage (Esc, Backspace)
    Back,
    /// Return to the main menu from the pause overlay (m)
    Menu,
    /// Quit (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Convert keyboard event to navigation action
pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
    // crossterm reports releases on some platforms
    if key.kind == KeyEventKind::Release {
        return NavigationAction::None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            NavigationAction::Quit
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => NavigationAction::Up,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => NavigationAction::Down,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => NavigationAction::Left,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => NavigationAction::Right,

        KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,
        KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,
        KeyCode::Char('m') | KeyCode::Char('M') => NavigationAction::Menu,

        _ => NavigationAction::None,
    }
}

/// Wrapping list cursor shared by the menu-style screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    pub fn at(len: usize, index: usize) -> Self {
        let mut cursor = Self::new(len);
        cursor.index = index.min(cursor.len - 1);
        cursor
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn previous(&mut self) {
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }
}
