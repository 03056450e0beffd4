//! CIEDE2000 color difference over Oklab coordinates.
//!
//! The formula is the standard CIEDE2000 (Sharma, Wu, Dalal 2005) with
//! kL = kC = kH = 1, but it is fed Oklab triples instead of CIELAB ones.
//! Oklab lightness lives in 0..1 rather than 0..100, so the lightness
//! weighting term is effectively constant. Existing encodings were produced
//! with exactly this formulation.

use std::f64::consts::PI;

use super::oklab::Oklab;

const K_L: f64 = 1.0;
const K_C: f64 = 1.0;
const K_H: f64 = 1.0;

/// 25^7, shared by the chroma compensation and rotation terms.
fn pow25_7() -> f64 {
    25.0f64.powf(7.0)
}

/// Hue angle in radians, normalized to 0..2π.
#[inline]
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    let h = b.atan2(a_prime);
    if h < 0.0 {
        h + 2.0 * PI
    } else {
        h
    }
}

/// CIEDE2000 difference between two Oklab colors.
///
/// Returns a non-negative scalar: 0.0 for identical inputs, larger for more
/// different colors. Symmetric in its arguments.
///
/// # Example
///
/// ```
/// use uv_codec::{ciede2000, Color, Oklab};
///
/// let red = Oklab::from(Color::new(255, 0, 0));
/// let orange = Oklab::from(Color::new(255, 128, 0));
///
/// assert_eq!(ciede2000(red, red), 0.0);
/// assert!(ciede2000(red, orange) > 0.0);
/// ```
pub fn ciede2000(lab1: Oklab, lab2: Oklab) -> f64 {
    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    let delta_l = l2 - l1;
    let l_bar = (l1 + l2) / 2.0;

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let c_bar = (c1 + c2) / 2.0;

    // Chroma compensation of the a axis
    let c_bar_7 = c_bar.powf(7.0);
    let g = 1.0 - (c_bar_7 / (c_bar_7 + pow25_7())).sqrt();
    let a1_prime = a1 + a1 / 2.0 * g;
    let a2_prime = a2 + a2 / 2.0 * g;

    let c1_prime = (a1_prime * a1_prime + b1 * b1).sqrt();
    let c2_prime = (a2_prime * a2_prime + b2 * b2).sqrt();
    let c_bar_prime = (c1_prime + c2_prime) / 2.0;
    let delta_c_prime = c2_prime - c1_prime;

    let h1_prime = hue_angle(b1, a1_prime);
    let h2_prime = hue_angle(b2, a2_prime);

    // Hue difference folded to the shortest arc
    let mut delta_h_prime = h2_prime - h1_prime;
    if delta_h_prime.abs() > PI {
        if h2_prime <= h1_prime {
            delta_h_prime += 2.0 * PI;
        } else {
            delta_h_prime -= 2.0 * PI;
        }
    }
    let delta_big_h_prime = 2.0 * (c1_prime * c2_prime).sqrt() * (delta_h_prime / 2.0).sin();

    let mut h_bar_prime = (h1_prime + h2_prime) / 2.0;
    if (h1_prime - h2_prime).abs() > PI {
        if h1_prime + h2_prime < 2.0 * PI {
            h_bar_prime += PI;
        } else {
            h_bar_prime -= PI;
        }
    }

    let t = 1.0 - 0.17 * (h_bar_prime - PI / 6.0).cos()
        + 0.24 * (2.0 * h_bar_prime).cos()
        + 0.32 * (3.0 * h_bar_prime + PI / 30.0).cos()
        - 0.20 * (4.0 * h_bar_prime - 63.0 * PI / 180.0).cos();

    let delta_theta =
        30.0 * PI / 180.0 * (-((180.0 / PI * h_bar_prime - 275.0) / 25.0).powf(2.0)).exp();
    let c_bar_prime_7 = c_bar_prime.powf(7.0);
    let r_c = 2.0 * (c_bar_prime_7 / (c_bar_prime_7 + pow25_7())).sqrt();

    let l_offset_sq = (l_bar - 50.0).powf(2.0);
    let s_l = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_prime;
    let s_h = 1.0 + 0.015 * c_bar_prime * t;
    let r_t = -(2.0 * delta_theta).sin() * r_c;

    let term_l = delta_l / (K_L * s_l);
    let term_c = delta_c_prime / (K_C * s_c);
    let term_h = delta_big_h_prime / (K_H * s_h);

    // Rounding can push a perfectly-degenerate sum a hair below zero
    (term_l * term_l + term_c * term_c + term_h * term_h + r_t * term_c * term_h)
        .max(0.0)
        .sqrt()
}
