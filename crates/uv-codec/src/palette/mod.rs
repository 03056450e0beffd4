//! Palette types and utilities
//!
//! This module provides the [`PaletteIndex`] built from the reference palette
//! image, the [`Coordinate`] values it records, the [`DistanceMetric`] used to
//! search it, and the error types for parsing and validation.

mod coordinate;
mod error;
mod index;
mod metric;

pub use coordinate::{Coordinate, MAX_HUNDREDTHS, MIN_HUNDREDTHS};
pub use error::{PaletteError, ParseColorError, ParseCoordinateError};
pub use index::{PaletteEntry, PaletteIndex, MAX_PALETTE_DIMENSION};
pub use metric::{rgb_squared, DistanceMetric, UnknownMetricError};
