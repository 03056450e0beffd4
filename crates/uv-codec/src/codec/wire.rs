//! Parsing of the `u:v,u:v,...` wire format.
//!
//! Entries carry the flipped vertical coordinate; callers apply
//! [`Coordinate::flipped`] to get back to palette space.

use crate::palette::{Coordinate, ParseCoordinateError};

/// Non-empty, whitespace-trimmed entries of an encoded string.
///
/// Empty segments, including the one after the trailing comma, are skipped.
/// NUL bytes must already have been removed.
pub fn segments(encoded: &str) -> impl Iterator<Item = &str> {
    encoded
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Parse a single `u:v` entry as it appears on the wire.
///
/// # Example
///
/// ```
/// use uv_codec::codec::parse_entry;
///
/// let c = parse_entry(" 0.23 : 0.91 ").unwrap();
/// assert_eq!(c.to_string(), "0.23:0.91");
/// assert!(parse_entry("0.23").is_err());
/// assert!(parse_entry("1.00:0.50").is_err());
/// ```
pub fn parse_entry(entry: &str) -> Result<Coordinate, ParseCoordinateError> {
    let mut parts = entry.split(':');
    let (Some(u), Some(v), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseCoordinateError::WrongArity {
            parts: entry.split(':').count(),
        });
    };
    Coordinate::from_fractions(parse_value(u)?, parse_value(v)?)
}

fn parse_value(text: &str) -> Result<f64, ParseCoordinateError> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|source| ParseCoordinateError::InvalidNumber {
            value: text.to_string(),
            source,
        })
}
