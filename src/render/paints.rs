use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ClockError, ClockResult};

/// Straight-alpha RGBA8 color, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` (leading `#` optional).
impl FromStr for Color {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        let bad = || ClockError::validation(format!("invalid color '{s}'"));
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, ch) in hex.chars().enumerate() {
                    let v = ch.to_digit(16).ok_or_else(bad)? as u8;
                    c[i] = v * 17;
                }
                Ok(Self::rgb(c[0], c[1], c[2]))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ClockError;

    fn try_from(s: String) -> ClockResult<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Whether shapes are filled or outlined by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// Color and stroke theme handed to glyph drawing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Paints {
    pub default_paint_style: PaintStyle,
    pub colors: Vec<Color>,
    pub stroke_width: f64,
}

impl Default for Paints {
    fn default() -> Self {
        Self {
            default_paint_style: PaintStyle::Fill,
            colors: vec![
                Color::rgb(0xf0, 0xf0, 0xf0),
                Color::rgb(0xf4, 0xb4, 0x00),
                Color::rgb(0x42, 0x85, 0xf4),
                Color::rgb(0xdb, 0x44, 0x37),
            ],
            stroke_width: 4.0,
        }
    }
}

impl Paints {
    /// Color at `index`, cycling through the palette. Black when the palette is empty.
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        self.colors[index % self.colors.len()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/paints.rs"]
mod tests;
