use crate::error::{BarError, Result};
use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const DEFAULT_BG: Self = Self::rgb(0x22, 0x22, 0x22); // #222222
    pub const DEFAULT_FG: Self = Self::rgb(0xcc, 0xcc, 0xcc); // #cccccc

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `RRGGBB`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        Some(Self {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
        })
    }
}

impl FromStr for Color {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s).ok_or_else(|| BarError::Config(format!("invalid hex color '{s}'")))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Color::from_hex("#5394C9"), Some(Color::rgb(0x53, 0x94, 0xc9)));
        assert_eq!(Color::from_hex("445967"), Some(Color::rgb(0x44, 0x59, 0x67)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
        assert!("nope".parse::<Color>().is_err());
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Color::DEFAULT_BG.to_string(), "#222222");
    }
}
