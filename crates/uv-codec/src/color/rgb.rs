//! 8-bit RGB color
//!
//! [`Color`] is the value type every other part of the codec is keyed on:
//! palette entries, raster pixels and nearest-color results.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit sRGB color.
///
/// Supports value equality and hashing so it can key the palette index.
/// Alpha is not part of the color; rasters are composited before they get
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to an opaque RGBA byte array.
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Composite a straight-alpha RGBA pixel over black.
    ///
    /// Fully transparent pixels become black, matching how premultiplied
    /// image readers report them.
    ///
    /// # Example
    /// ```
    /// use uv_codec::Color;
    ///
    /// assert_eq!(Color::from_rgba_over_black([200, 100, 50, 255]), Color::new(200, 100, 50));
    /// assert_eq!(Color::from_rgba_over_black([200, 100, 50, 0]), Color::BLACK);
    /// ```
    #[inline]
    pub fn from_rgba_over_black(rgba: [u8; 4]) -> Self {
        let alpha = rgba[3] as u32;
        let scale = |c: u8| ((c as u32 * alpha + 127) / 255) as u8;
        Self::new(scale(rgba[0]), scale(rgba[1]), scale(rgba[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive, with
    /// surrounding whitespace trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use uv_codec::Color;
    ///
    /// let red: Color = "#F00".parse().unwrap();
    /// assert_eq!(red, Color::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
