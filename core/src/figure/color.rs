//! RGBA color type and matplotlib-style color names.

use crate::prelude::{VizError, VizResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Returns this color with its alpha scaled by `alpha` (0..=1).
    pub fn with_alpha(self, alpha: f64) -> Self {
        let scaled = (self.a as f64 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a: scaled, ..self }
    }

    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    // matplotlib's single-letter "g" is a darker green than CSS green.
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const CYAN: Color = Color::rgb(0, 191, 191);
    pub const MAGENTA: Color = Color::rgb(191, 0, 191);
    pub const YELLOW: Color = Color::rgb(191, 191, 0);
    pub const MEDIUM_SEA_GREEN: Color = Color::rgb(60, 179, 113);
    pub const WHITE_SMOKE: Color = Color::rgb(245, 245, 245);

    /// Parses a single-letter code, a supported color name or `#rrggbb`.
    pub fn parse(value: &str) -> VizResult<Self> {
        let name = value.trim();
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| VizError::InvalidColor(value.to_string()));
        }
        let color = match name.to_ascii_lowercase().as_str() {
            "r" | "red" => Color::RED,
            "b" | "blue" => Color::BLUE,
            "g" | "green" => Color::GREEN,
            "c" | "cyan" => Color::CYAN,
            "m" | "magenta" => Color::MAGENTA,
            "y" | "yellow" => Color::YELLOW,
            "k" | "black" => Color::BLACK,
            "w" | "white" => Color::WHITE,
            "mediumseagreen" => Color::MEDIUM_SEA_GREEN,
            "whitesmoke" => Color::WHITE_SMOKE,
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "grey" | "gray" => Color::rgb(128, 128, 128),
            "navy" => Color::rgb(0, 0, 128),
            "skyblue" => Color::rgb(135, 206, 235),
            _ => return Err(VizError::InvalidColor(value.to_string())),
        };
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl FromStr for Color {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_letter_codes() {
        assert_eq!(Color::parse("r").unwrap(), Color::RED);
        assert_eq!(Color::parse("k").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("w").unwrap(), Color::WHITE);
    }

    #[test]
    fn parses_names_and_hex() {
        assert_eq!(
            Color::parse("mediumseagreen").unwrap(),
            Color::MEDIUM_SEA_GREEN
        );
        assert_eq!(Color::parse("#3cb371").unwrap(), Color::MEDIUM_SEA_GREEN);
        assert_eq!(Color::MEDIUM_SEA_GREEN.to_hex(), "#3cb371");
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            Color::parse("chartreuse-ish"),
            Err(VizError::InvalidColor("chartreuse-ish".into()))
        );
        assert!(Color::parse("#12345").is_err());
    }

    #[test]
    fn alpha_scales_existing_opacity() {
        let faded = Color::RED.with_alpha(0.5);
        assert_eq!(faded.a, 128);
        assert_eq!(faded.with_alpha(0.0).a, 0);
    }
}
