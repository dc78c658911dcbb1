//! RGBA color used by map backgrounds, transparent keys and color properties

use crate::error::{FormatError, Result};
use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel RGBA color
///
/// The textual form is `#RRGGBB` when fully opaque and `#AARRGGBB`
/// otherwise, with uppercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    /// Create an opaque color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Whether the alpha channel is 255
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (hex digits are case-insensitive)
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || FormatError::literal("color", value);
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid().into());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::from_rgba(
                channel(2)?,
                channel(4)?,
                channel(6)?,
                channel(0)?,
            )),
            _ => Err(invalid().into()),
        }
    }

    /// Parse the `trans` attribute form, `RRGGBB` without the leading `#`
    pub fn parse_transparent_key(value: &str) -> Result<Self> {
        Color::parse(&format!("#{}", value.trim_start_matches('#')))
    }

    /// Format as the `trans` attribute form (`RRGGBB`, alpha dropped)
    pub fn to_transparent_key(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = crate::error::TmxError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}
