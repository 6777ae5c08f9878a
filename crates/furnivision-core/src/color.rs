//! Hex color values used by room palettes and furniture.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Color must have 3 or 6 hex digits: {0}")]
    InvalidLength(String),
    #[error("Invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

/// An opaque RGB color, serialized as `#rrggbb`.
///
/// The `#rgb` shorthand is accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if !digits.is_ascii() {
            return Err(ColorError::InvalidLength(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(s.to_string()));
        }
        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ColorError::InvalidDigit(s.to_string()));
        match digits.len() {
            6 => Ok(Self::new(channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
            // #abc expands to #aabbcc
            3 => {
                let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(ColorError::InvalidLength(s.to_string())),
        }
    }

    /// Scale every channel by `factor` (clamped to `[0, 1]`).
    pub fn darken(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let color = HexColor::parse("#A47551").unwrap();
        assert_eq!(color, HexColor::new(0xa4, 0x75, 0x51));
        assert_eq!(color.to_string(), "#a47551");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(HexColor::parse("A47551"), Err(ColorError::MissingHash(_))));
        assert!(matches!(HexColor::parse("#ffff"), Err(ColorError::InvalidLength(_))));
        assert!(matches!(HexColor::parse("#fg0"), Err(ColorError::InvalidDigit(_))));
        assert!(matches!(HexColor::parse("#gg0000"), Err(ColorError::InvalidDigit(_))));
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(HexColor::parse("#fff").unwrap(), HexColor::white());
        assert_eq!(HexColor::parse("#A3c").unwrap(), HexColor::new(0xaa, 0x33, 0xcc));
        assert_eq!(HexColor::parse("#a3c").unwrap().to_string(), "#aa33cc");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&HexColor::new(0x68, 0x75, 0x85)).unwrap();
        assert_eq!(json, "\"#687585\"");
        let back: HexColor = serde_json::from_str("\"#687585\"").unwrap();
        assert_eq!(back, HexColor::new(0x68, 0x75, 0x85));
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }

    #[test]
    fn test_darken() {
        let color = HexColor::new(100, 200, 50).darken(0.8);
        assert_eq!(color, HexColor::new(80, 160, 40));
    }

    #[test]
    fn test_into_peniko() {
        let color: Color = HexColor::new(1, 2, 3).into();
        let rgba = color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (1, 2, 3, 255));
    }
}
