//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! The codec only passes through it on the way from 8-bit sRGB to Oklab.

use super::rgb::Color;

/// A color in linear RGB color space, double precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Decode one gamma-encoded sRGB channel in 0.0..=1.0 to linear light.
///
/// Uses the exact IEC 61966-2-1 transfer function rather than a lookup
/// table; quantization decisions must not depend on interpolation error.
#[inline]
pub fn srgb_to_linear(value: f64) -> f64 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

impl From<Color> for LinearRgb {
    fn from(color: Color) -> Self {
        Self {
            r: srgb_to_linear(color.r as f64 / 255.0),
            g: srgb_to_linear(color.g as f64 / 255.0),
            b: srgb_to_linear(color.b as f64 / 255.0),
        }
    }
}
