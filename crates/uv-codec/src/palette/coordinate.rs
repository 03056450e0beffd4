//! Normalized palette coordinates with two-decimal precision.

use std::fmt;

use super::error::ParseCoordinateError;

/// Smallest value either axis may take, in hundredths.
pub const MIN_HUNDREDTHS: u8 = 1;

/// Largest value either axis may take, in hundredths.
pub const MAX_HUNDREDTHS: u8 = 99;

/// A normalized (u, v) position inside the palette image.
///
/// Both axes carry exactly two decimal places, so they are stored as integer
/// hundredths. Coordinates built by this crate always lie in
/// `0.01..=0.99` on both axes; the unit-square boundary is never produced.
///
/// `Display` renders the wire form `u:v` with two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    u: u8,
    v: u8,
}

/// Truncate `pos / extent` to two decimals and keep it off the boundary.
///
/// The division and scaling happen in `f64` so that positions whose exact
/// fraction is not representable truncate the same way previously produced
/// encodings did (for example 29/100 becomes 0.28).
#[inline]
fn truncate_axis(pos: u32, extent: u32) -> u8 {
    let hundredths = ((pos as f64 / extent as f64) * 100.0) as u32;
    hundredths.clamp(MIN_HUNDREDTHS as u32, MAX_HUNDREDTHS as u32) as u8
}

/// Convert a parsed fraction to hundredths, rejecting anything off the grid's range.
#[inline]
fn fraction_to_hundredths(value: f64) -> Result<u8, ParseCoordinateError> {
    if !value.is_finite() {
        return Err(ParseCoordinateError::OutOfRange { value });
    }
    let hundredths = (value * 100.0).round();
    if hundredths < MIN_HUNDREDTHS as f64 || hundredths > MAX_HUNDREDTHS as f64 {
        return Err(ParseCoordinateError::OutOfRange { value });
    }
    Ok(hundredths as u8)
}

impl Coordinate {
    /// Coordinate of pixel (x, y) in a palette of `width` x `height` pixels.
    ///
    /// Each axis is truncated (not rounded) to two decimals; an exact 0.00
    /// becomes 0.01 and an exact 1.00 becomes 0.99.
    ///
    /// # Example
    ///
    /// ```
    /// use uv_codec::Coordinate;
    ///
    /// let corner = Coordinate::from_position(0, 0, 10, 6);
    /// assert_eq!(corner.to_string(), "0.01:0.01");
    ///
    /// let inner = Coordinate::from_position(5, 3, 10, 6);
    /// assert_eq!(inner.to_string(), "0.50:0.50");
    /// ```
    pub fn from_position(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            u: truncate_axis(x, width),
            v: truncate_axis(y, height),
        }
    }

    /// Build a coordinate from integer hundredths.
    ///
    /// Returns `None` unless both values are in `1..=99`.
    pub fn from_hundredths(u: u8, v: u8) -> Option<Self> {
        let range = MIN_HUNDREDTHS..=MAX_HUNDREDTHS;
        (range.contains(&u) && range.contains(&v)).then_some(Self { u, v })
    }

    /// Build a coordinate from decimal fractions as read off the wire.
    ///
    /// Values are rounded to the nearest hundredth. Non-finite values and
    /// values that land on or beyond the boundary (0.00, 1.00) are rejected.
    pub fn from_fractions(u: f64, v: f64) -> Result<Self, ParseCoordinateError> {
        Ok(Self {
            u: fraction_to_hundredths(u)?,
            v: fraction_to_hundredths(v)?,
        })
    }

    /// Horizontal component as a fraction.
    #[inline]
    pub fn u(self) -> f64 {
        self.u as f64 / 100.0
    }

    /// Vertical component as a fraction.
    #[inline]
    pub fn v(self) -> f64 {
        self.v as f64 / 100.0
    }

    /// Horizontal component in hundredths.
    #[inline]
    pub fn u_hundredths(self) -> u8 {
        self.u
    }

    /// Vertical component in hundredths.
    #[inline]
    pub fn v_hundredths(self) -> u8 {
        self.v
    }

    /// Mirror the vertical axis: `v` becomes `1 - v`.
    ///
    /// The wire format stores flipped coordinates; flipping twice is the
    /// identity.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            u: self.u,
            v: 100 - self.v,
        }
    }

    /// Append the wire form `u:v,` to `out`.
    pub fn push_wire_entry(self, out: &mut String) {
        push_hundredths(out, self.u);
        out.push(':');
        push_hundredths(out, self.v);
        out.push(',');
    }
}

fn push_hundredths(out: &mut String, value: u8) {
    out.push(char::from(b'0' + value / 100));
    out.push('.');
    out.push(char::from(b'0' + (value / 10) % 10));
    out.push(char::from(b'0' + value % 10));
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}:{}.{:02}",
            self.u / 100,
            self.u % 100,
            self.v / 100,
            self.v % 100
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_instead_of_rounding() {
        // 2/3 = 0.666.. must become 0.66, not 0.67
        let c = Coordinate::from_position(2, 2, 3, 3);
        assert_eq!(c.u_hundredths(), 66);
        assert_eq!(c.v_hundredths(), 66);
    }

    #[test]
    fn test_truncation_follows_float_arithmetic() {
        // 29/100 * 100 evaluates to 28.999999999999996 in f64
        let c = Coordinate::from_position(29, 0, 100, 66);
        assert_eq!(c.u_hundredths(), 28);
    }

    #[test]
    fn test_zero_is_clamped_to_one_hundredth() {
        let c = Coordinate::from_position(0, 0, 100, 66);
        assert_eq!(c.u_hundredths(), 1);
        assert_eq!(c.v_hundredths(), 1);
    }

    #[test]
    fn test_max_position_stays_below_one() {
        for extent in [1u32, 2, 3, 7, 66, 100, 128, 1000, 65_535] {
            let c = Coordinate::from_position(extent - 1, extent - 1, extent, extent);
            assert!(c.u_hundredths() <= MAX_HUNDREDTHS, "extent {extent}");
            assert!(c.v_hundredths() <= MAX_HUNDREDTHS, "extent {extent}");
            assert!(c.u_hundredths() >= MIN_HUNDREDTHS, "extent {extent}");
        }
    }

    #[test]
    fn test_single_pixel_palette() {
        let c = Coordinate::from_position(0, 0, 1, 1);
        assert_eq!(c.to_string(), "0.01:0.01");
    }

    #[test]
    fn test_from_hundredths_bounds() {
        assert!(Coordinate::from_hundredths(1, 99).is_some());
        assert!(Coordinate::from_hundredths(0, 50).is_none());
        assert!(Coordinate::from_hundredths(50, 100).is_none());
    }

    #[test]
    fn test_from_fractions() {
        let c = Coordinate::from_fractions(0.23, 0.91).unwrap();
        assert_eq!((c.u_hundredths(), c.v_hundredths()), (23, 91));

        // Extra precision rounds to the nearest hundredth
        let c = Coordinate::from_fractions(0.234, 0.916).unwrap();
        assert_eq!((c.u_hundredths(), c.v_hundredths()), (23, 92));
    }

    #[test]
    fn test_from_fractions_rejects_edges() {
        for bad in [0.0, 1.0, -0.5, 1.5, 0.004, 0.996, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    Coordinate::from_fractions(bad, 0.5),
                    Err(ParseCoordinateError::OutOfRange { .. })
                ),
                "{bad} should be out of range"
            );
            assert!(Coordinate::from_fractions(0.5, bad).is_err());
        }
    }

    #[test]
    fn test_flip_is_an_involution() {
        let c = Coordinate::from_hundredths(12, 34).unwrap();
        assert_eq!(c.flipped().v_hundredths(), 66);
        assert_eq!(c.flipped().u_hundredths(), 12);
        assert_eq!(c.flipped().flipped(), c);
    }

    #[test]
    fn test_wire_entry_format() {
        let mut out = String::new();
        Coordinate::from_hundredths(23, 91)
            .unwrap()
            .push_wire_entry(&mut out);
        Coordinate::from_hundredths(1, 5)
            .unwrap()
            .push_wire_entry(&mut out);
        assert_eq!(out, "0.23:0.91,0.01:0.05,");
    }

    #[test]
    fn test_display_matches_wire_entry() {
        let c = Coordinate::from_hundredths(7, 99).unwrap();
        let mut out = String::new();
        c.push_wire_entry(&mut out);
        assert_eq!(format!("{c},"), out);
    }

    #[test]
    fn test_fraction_accessors() {
        let c = Coordinate::from_hundredths(50, 25).unwrap();
        assert_eq!(c.u(), 0.5);
        assert_eq!(c.v(), 0.25);
    }
}
