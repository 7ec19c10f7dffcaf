//! RGBA stroke colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 8-bit RGBA color.  Serialized as `#RRGGBB` / `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color `{0}` must look like #RRGGBB or #RRGGBBAA")]
    BadFormat(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl Color {
    pub const RED:   Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Packed `0xAARRGGBB`.
    pub fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub fn from_argb(argb: u32) -> Self {
        Color {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Composite this color over an opaque ARGB pixel; result is opaque.
    pub fn over(self, dst: u32) -> u32 {
        if self.a == 0xFF { return self.to_argb(); }
        let t = self.a as f32 / 255.0;
        let d = Color::from_argb(dst);
        let lerp = |s: u8, d: u8| (s as f32 * t + d as f32 * (1.0 - t)).round() as u8;
        Color::rgb(lerp(self.r, d.r), lerp(self.g, d.g), lerp(self.b, d.b)).to_argb()
    }

    /// `#rrggbb`, for SVG `stroke` attributes.
    pub fn hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#')
            .ok_or_else(|| ColorParseError::BadFormat(s.to_string()))?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ColorParseError::BadFormat(s.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 0xFF };
        Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Color> for String {
    fn from(c: Color) -> String { c.to_string() }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!("#FF0000".parse::<Color>(), Ok(Color::RED));
        assert_eq!("#00ff0080".parse::<Color>(), Ok(Color::rgba(0, 0xFF, 0, 0x80)));
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!("FF0000".parse::<Color>(), Err(ColorParseError::BadFormat(_))));
        assert!(matches!("#FF00".parse::<Color>(), Err(ColorParseError::BadFormat(_))));
        assert!(matches!("#GG0000".parse::<Color>(), Err(ColorParseError::BadDigit(_))));
    }

    #[test]
    fn argb_packing() {
        assert_eq!(Color::RED.to_argb(), 0xFFFF0000);
        assert_eq!(Color::from_argb(0x80102030), Color::rgba(0x10, 0x20, 0x30, 0x80));
    }

    #[test]
    fn half_alpha_blends() {
        let c = Color::rgba(0xFF, 0x00, 0x00, 0x80);
        let out = Color::from_argb(c.over(Color::WHITE.to_argb()));
        assert_eq!(out.a, 0xFF);
        assert_eq!(out.r, 0xFF);
        assert!(out.g > 0x70 && out.g < 0x80);
    }

    #[test]
    fn display_round_trips() {
        for c in [Color::RED, Color::rgba(1, 2, 3, 4)] {
            assert_eq!(c.to_string().parse::<Color>(), Ok(c));
        }
    }
}
