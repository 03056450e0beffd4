//! Color types and conversion utilities
//!
//! This module provides the 8-bit [`Color`] key used by the palette index and
//! the two working spaces used to compare colors perceptually.
//!
//! # Color Spaces
//!
//! - **Color**: 8-bit gamma-encoded sRGB, exactly as stored in image files.
//! - **LinearRgb**: Linear light intensity, an intermediate step only.
//! - **Oklab**: Perceptual space in which the CIEDE2000 difference is taken.
//!
//! # Example
//!
//! ```
//! use uv_codec::{Color, LinearRgb, Oklab};
//!
//! let color = Color::new(128, 64, 32);
//! let linear = LinearRgb::from(color);
//! let lab = Oklab::from(linear);
//! assert!(lab.l > 0.0 && lab.l < 1.0);
//! ```

mod delta_e;
mod linear_rgb;
mod oklab;
mod rgb;

pub use delta_e::ciede2000;
pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use rgb::Color;
