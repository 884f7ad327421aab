//! RGBA colors parsed from hex notation or a small set of names.

use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);

    /// An opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `rgb`, `rgba`, `rrggbb` or `rrggbbaa` hex digits, with or without
    /// a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        let short = |i: usize| -> Option<u8> {
            let v = u8::from_str_radix(&hex[i..i + 1], 16).ok()?;
            Some(v * 17)
        };
        let long = |i: usize| -> Option<u8> { u8::from_str_radix(&hex[i..i + 2], 16).ok() };

        match hex.len() {
            3 => Some(Color::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Color::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Color::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Color::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Look up a named color.
    pub fn named(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "transparent" => Color::TRANSPARENT,
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "gray" | "grey" => Color::GRAY,
            "dark-gray" | "dark-grey" => Color::DARK_GRAY,
            "light-gray" | "light-grey" => Color::LIGHT_GRAY,
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if s.starts_with('#') {
            Color::from_hex(s)
        } else {
            Color::named(s)
        };
        parsed.ok_or_else(|| format!("invalid color: {s}"))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}
