//! Flag encoding and decoding.
//!
//! The [`Encoder`] maps every pixel of a 100x66 raster to its nearest palette
//! color and writes that color's coordinate; the [`Decoder`] reads the
//! coordinates back and looks the colors up again. Both borrow a shared
//! [`PaletteIndex`].

mod decoder;
mod encoder;
mod layout;
mod wire;

pub use decoder::{DecodedFlag, Decoder};
pub use encoder::{EncodedFlag, Encoder};
pub use layout::{slot_position, FLAG_HEIGHT, FLAG_PIXELS, FLAG_WIDTH};
pub use wire::{parse_entry, segments};

use crate::api::CodecError;
use crate::palette::{DistanceMetric, PaletteIndex};
use crate::raster::Raster;

/// Encode `raster` against `index` with the given metric.
///
/// Shorthand for `Encoder::new(index).metric(metric).encode(raster)` that
/// keeps only the string.
pub fn encode(
    raster: &Raster,
    index: &PaletteIndex,
    metric: DistanceMetric,
) -> Result<String, CodecError> {
    Encoder::new(index)
        .metric(metric)
        .encode(raster)
        .map(EncodedFlag::into_string)
}

/// Decode `encoded` against `index`.
///
/// Shorthand for `Decoder::new(index).decode(encoded)`.
pub fn decode(encoded: &str, index: &PaletteIndex) -> DecodedFlag {
    Decoder::new(index).decode(encoded)
}
