//! Error types for palette operations
//!
//! This module provides error types for color parsing, coordinate parsing
//! and palette validation.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for a single `u:v` entry of an encoded string.
///
/// The decoder recovers from these locally: the affected pixel keeps its
/// default value and decoding continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseCoordinateError {
    /// The entry did not split into exactly two values on `:`
    #[error("expected `u:v`, found {parts} part(s)")]
    WrongArity {
        /// Number of `:`-separated parts found
        parts: usize,
    },
    /// One of the two values is not a decimal number
    #[error("invalid number {value:?}: {source}")]
    InvalidNumber {
        /// The offending text after trimming
        value: String,
        /// Underlying float parse error
        source: ParseFloatError,
    },
    /// The value is not finite or does not lie in 0.01..=0.99
    #[error("coordinate {value} is outside 0.01..=0.99")]
    OutOfRange {
        /// The parsed value
        value: f64,
    },
}

/// Error type for palette index construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// The palette raster has no pixels
    #[error("palette image has no pixels")]
    Empty,
    /// The palette raster is too large for two-decimal coordinates to address
    #[error("palette image {width}x{height} exceeds the supported size")]
    TooLarge {
        /// Palette width in pixels
        width: u32,
        /// Palette height in pixels
        height: u32,
    },
}
