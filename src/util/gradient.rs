//! Background gradients
//!
//! Vertical color ramps painted behind every screen. Built once at startup
//! and shared by all screens.

use crate::{GameError, Result};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use serde::{Deserialize, Serialize};

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend, `t` in `[0, 1]`
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Precomputed top-to-bottom color ramp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    steps: Vec<Rgb>,
}

impl Gradient {
    pub fn new(top: Rgb, bottom: Rgb, rows: u16) -> Result<Self> {
        if rows == 0 {
            return Err(GameError::AssetError(
                "Gradient needs at least one row".to_string(),
            ));
        }
        let last = (rows - 1).max(1) as f32;
        let steps = (0..rows).map(|row| top.lerp(bottom, row as f32 / last)).collect();
        Ok(Self { steps })
    }

    /// Color for `row` of an area `height` rows tall
    pub fn color_at(&self, row: u16, height: u16) -> Rgb {
        let height = usize::from(height.max(1));
        let index = usize::from(row) * self.steps.len() / height;
        self.steps[index.min(self.steps.len() - 1)]
    }
}

impl Widget for &Gradient {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            let color: Color = self.color_at(row, area.height).into();
            for col in 0..area.width {
                buf.get_mut(area.x + col, area.y + row).set_bg(color);
            }
        }
    }
}

/// One gradient per screen
#[derive(Debug, Clone)]
pub struct Backdrops {
    pub game: Gradient,
    pub menu: Gradient,
    pub victory: Gradient,
    pub defeat: Gradient,
    pub shop: Gradient,
    pub inventory: Gradient,
    pub select: Gradient,
}

pub const SHOP_LIGHT: Rgb = Rgb(150, 100, 210);
pub const SHOP_DARK: Rgb = Rgb(60, 20, 100);

impl Backdrops {
    pub fn build(rows: u16) -> Result<Self> {
        Ok(Self {
            game: Gradient::new(Rgb(0, 0, 30), Rgb(0, 0, 60), rows)?,
            menu: Gradient::new(Rgb(30, 0, 60), Rgb(10, 0, 30), rows)?,
            victory: Gradient::new(Rgb(0, 50, 0), Rgb(0, 20, 40), rows)?,
            defeat: Gradient::new(Rgb(50, 0, 0), Rgb(20, 0, 40), rows)?,
            shop: Gradient::new(SHOP_LIGHT, SHOP_DARK, rows)?,
            inventory: Gradient::new(Rgb(50, 20, 100), Rgb(20, 10, 60), rows)?,
            select: Gradient::new(Rgb(20, 20, 50), Rgb(10, 10, 30), rows)?,
        })
    }
}
