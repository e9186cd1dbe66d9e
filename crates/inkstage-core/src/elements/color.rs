//! RGBA color stored on elements.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializable color representation (RGBA8).
///
/// Serialized as a `#rrggbb` (or `#rrggbbaa` when translucent) hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) or `transparent`.
    /// Anything else falls back to black.
    pub fn parse(color: &str) -> Self {
        let color = color.trim();
        if color.eq_ignore_ascii_case("transparent") {
            return Self::transparent();
        }

        let Some(hex) = color.strip_prefix('#') else {
            return Self::black();
        };
        if !hex.is_ascii() {
            return Self::black();
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        let parsed = match hex.len() {
            3 => (|| {
                Some(Self::rgb(
                    channel(0..1)? * 17,
                    channel(1..2)? * 17,
                    channel(2..3)? * 17,
                ))
            })(),
            6 => (|| Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)))(),
            8 => (|| {
                Some(Self::new(
                    channel(0..2)?,
                    channel(2..4)?,
                    channel(4..6)?,
                    channel(6..8)?,
                ))
            })(),
            _ => None,
        };
        parsed.unwrap_or_else(Self::black)
    }

    /// Format as lowercase hex, omitting alpha when opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<String> for SerializableColor {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for SerializableColor {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Palette used for element defaults.
pub mod palette {
    use super::SerializableColor;

    pub const BLUE: SerializableColor = SerializableColor::rgb(0x3b, 0x82, 0xf6);
    pub const RED: SerializableColor = SerializableColor::rgb(0xef, 0x44, 0x44);
    pub const GREEN: SerializableColor = SerializableColor::rgb(0x10, 0xb9, 0x81);
    pub const AMBER: SerializableColor = SerializableColor::rgb(0xf5, 0x9e, 0x0b);
    pub const VIOLET: SerializableColor = SerializableColor::rgb(0x8b, 0x5c, 0xf6);
}
