//! Text styles shared by all screens
//!
//! Built from the configured palette. A palette that does not parse falls
//! back to the default palette once; if that also fails the error is returned.

use crate::config::Palette;
use crate::{GameError, Result};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use tracing::warn;

/// Title, body, hint and highlight styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typography {
    pub title: Style,
    pub normal: Style,
    pub small: Style,
    pub highlight: Style,
}

impl Typography {
    /// Build styles from a palette without any fallback
    pub fn from_palette(palette: &Palette) -> Result<Self> {
        let title = parse_color(&palette.title)?;
        let text = parse_color(&palette.text)?;
        let muted = parse_color(&palette.muted)?;
        let highlight = parse_color(&palette.highlight)?;

        Ok(Self {
            title: Style::default().fg(title).add_modifier(Modifier::BOLD),
            normal: Style::default().fg(text),
            small: Style::default().fg(muted),
            highlight: Style::default()
                .fg(highlight)
                .add_modifier(Modifier::BOLD),
        })
    }

    /// Build styles, retrying once with the default palette
    pub fn build(palette: &Palette) -> Result<Self> {
        match Self::from_palette(palette) {
            Ok(typography) => Ok(typography),
            Err(e) => {
                warn!(error = %e, "Palette rejected, using default colors");
                Self::from_palette(&Palette::default())
            }
        }
    }
}

/// Parse a color name, a `#rrggbb` string or a 256-color index
pub fn parse_color(input: &str) -> Result<Color> {
    let value = input.trim();
    // ratatui slices hex strings by byte offset
    if !value.is_ascii() {
        return Err(GameError::AssetError(format!("Unknown color: {}", input)));
    }
    Color::from_str(value).map_err(|_| GameError::AssetError(format!("Unknown color: {}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_and_hex() {
        assert_eq!(parse_color("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color(" darkgrey ").unwrap(), Color::DarkGray);
        assert_eq!(parse_color("#FF8000").unwrap(), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("reset").unwrap(), Color::Reset);
        assert_eq!(parse_color("light-red").unwrap(), Color::LightRed);
        assert_eq!(parse_color("dark gray").unwrap(), Color::DarkGray);
        assert_eq!(parse_color("10").unwrap(), Color::Indexed(10));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#zz0000").is_err());
        assert!(parse_color("chartreuse").is_err());
        assert!(parse_color("#a\u{e9}000").is_err());
    }

    #[test]
    fn test_default_palette_builds() {
        let typography = Typography::from_palette(&Palette::default()).unwrap();
        assert_eq!(typography.title.fg, Some(Color::Cyan));
        assert!(typography.title.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_bad_palette_falls_back_once() {
        let palette = Palette {
            title: "not-a-color".to_string(),
            ..Palette::default()
        };
        assert!(Typography::from_palette(&palette).is_err());

        let typography = Typography::build(&palette).unwrap();
        assert_eq!(typography, Typography::from_palette(&Palette::default()).unwrap());
    }
}
