//! Oklab perceptual color space
//!
//! Oklab is a perceptual color space designed for uniform color perception.
//! The codec measures palette distances in it.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::delta_e::ciede2000;
use super::linear_rgb::LinearRgb;
use super::rgb::Color;

/// A color in Oklab perceptual color space, double precision.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 1.0 = white)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness: 0.0 (black) to 1.0 (white)
    pub l: f64,
    /// Green-red axis: typically -0.5 to 0.5
    pub a: f64,
    /// Blue-yellow axis: typically -0.5 to 0.5
    pub b: f64,
}

impl Oklab {
    /// Create a new Oklab color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma magnitude `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// CIEDE2000 color difference taken over Oklab coordinates.
    ///
    /// See [`ciede2000`] for the exact formulation.
    #[inline]
    pub fn ciede2000(self, other: Oklab) -> f64 {
        ciede2000(self, other)
    }
}

/// Cube root that keeps the sign of its input.
///
/// Computed as `powf(1/3)` on the magnitude, not `cbrt`; quantization
/// decisions of existing encodings depend on the last bits.
#[inline]
fn signed_cube_root(value: f64) -> f64 {
    if value > 0.0 {
        value.powf(1.0 / 3.0)
    } else {
        -(-value).powf(1.0 / 3.0)
    }
}

impl From<LinearRgb> for Oklab {
    /// Convert from linear RGB to Oklab.
    ///
    /// Uses the updated 2021-01-25 matrices from Björn Ottosson.
    fn from(rgb: LinearRgb) -> Self {
        // Step 1: Linear sRGB to LMS (M1 matrix)
        let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
        let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
        let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

        // Step 2: Cube root (nonlinearity)
        let l_ = signed_cube_root(l);
        let m_ = signed_cube_root(m);
        let s_ = signed_cube_root(s);

        // Step 3: LMS to Lab (M2 matrix)
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

impl From<Color> for Oklab {
    #[inline]
    fn from(color: Color) -> Self {
        Oklab::from(LinearRgb::from(color))
    }
}
