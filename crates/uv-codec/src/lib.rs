//! uv-codec: palette-coordinate encoding for small flag images
//!
//! This library turns a 100x66 image into a compact text string and back. Each
//! pixel is matched to the perceptually nearest color of a reference palette
//! image, and the string records where in that palette the color lives.
//!
//! # Quick Start
//!
//! ```
//! use uv_codec::{Color, Decoder, DistanceMetric, Encoder, PaletteIndex, Raster};
//!
//! // A tiny 2x2 palette
//! let palette = Raster::from_pixels(2, 2, vec![
//!     Color::BLACK,
//!     Color::WHITE,
//!     Color::new(255, 0, 0),
//!     Color::new(0, 0, 255),
//! ]).unwrap();
//! let index = PaletteIndex::new(&palette).unwrap();
//!
//! let flag = Raster::new(100, 66, Color::new(230, 20, 20));
//! let encoded = Encoder::new(&index)
//!     .metric(DistanceMetric::Ciede2000)
//!     .encode(&flag)
//!     .unwrap();
//!
//! let decoded = Decoder::new(&index).decode(encoded.as_str());
//! assert_eq!(decoded.get(42, 17), Some(Color::new(255, 0, 0)));
//! ```
//!
//! # Wire Format
//!
//! The encoded string is a run of `u:v,` entries, one per pixel, each value
//! printed with exactly two fractional digits (`0.23:0.91,`). Entries walk the
//! flag column by column from left to right and each column from the bottom
//! row up. `u` and `v` are the palette coordinates of the matched color, with
//! `v` mirrored (`1 - v`). A full encoding always holds 6600 entries.
//!
//! # Palette Coordinates
//!
//! Pixel (x, y) of a W x H palette has coordinate (x / W, y / H), truncated
//! (not rounded) to two decimals and kept strictly inside the unit square:
//! an exact 0.00 becomes 0.01 and an exact 1.00 becomes 0.99. When a color
//! occurs more than once in the palette, the last occurrence in row-major
//! order wins.
//!
//! # Color Matching
//!
//! [`DistanceMetric::Ciede2000`] (the default) converts both colors through
//! linear RGB into [`Oklab`] and takes the CIEDE2000 difference of the Oklab
//! triples. [`DistanceMetric::RgbSquared`] compares raw 8-bit channels. The
//! search is a full scan over the palette; the first palette color seen wins
//! ties.
//!
//! The Encoder matches pixels in parallel with `rayon`. The result is
//! byte-identical to a sequential run.

pub mod api;
pub mod codec;
pub mod color;
pub mod palette;
pub mod raster;


pub use api::CodecError;
pub use codec::{decode, encode, DecodedFlag, Decoder, EncodedFlag, Encoder, FLAG_HEIGHT, FLAG_WIDTH};
pub use color::{ciede2000, Color, LinearRgb, Oklab};
pub use palette::{
    Coordinate, DistanceMetric, PaletteError, PaletteIndex, ParseColorError, ParseCoordinateError,
};
pub use raster::Raster;
