//! Decoder: coordinate string -> 100x66 flag.
//!
//! Decoding never fails. Malformed entries leave their pixel unset and are
//! counted; the output is always a full 100x66 grid.

use std::borrow::Cow;

use super::layout::{slot_offset, FLAG_HEIGHT, FLAG_PIXELS, FLAG_WIDTH};
use super::wire::{parse_entry, segments};
use crate::color::Color;
use crate::palette::PaletteIndex;
use crate::raster::Raster;

/// A decoded flag.
///
/// Each pixel is `Some(color)` when its entry resolved to a palette color and
/// `None` when the entry was missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFlag {
    pixels: Vec<Option<Color>>,
    skipped: usize,
    ignored: usize,
}

impl DecodedFlag {
    fn empty() -> Self {
        Self {
            pixels: vec![None; FLAG_PIXELS],
            skipped: 0,
            ignored: 0,
        }
    }

    /// Always 100.
    #[inline]
    pub fn width(&self) -> u32 {
        FLAG_WIDTH
    }

    /// Always 66.
    #[inline]
    pub fn height(&self) -> u32 {
        FLAG_HEIGHT
    }

    /// Decoded color at (x, y); `None` if unset or outside the flag.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= FLAG_WIDTH || y >= FLAG_HEIGHT {
            return None;
        }
        self.pixels[y as usize * FLAG_WIDTH as usize + x as usize]
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[Option<Color>] {
        &self.pixels
    }

    /// Number of pixels that received a color.
    pub fn decoded(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Number of malformed entries that were skipped.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of entries beyond the last pixel that were ignored.
    #[inline]
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    /// Opaque raster with unset pixels painted `fill`.
    pub fn to_raster(&self, fill: Color) -> Raster {
        let pixels = self.pixels.iter().map(|p| p.unwrap_or(fill)).collect();
        Raster::from_pixels(FLAG_WIDTH, FLAG_HEIGHT, pixels)
            .unwrap_or_else(|| Raster::new(FLAG_WIDTH, FLAG_HEIGHT, fill))
    }

    /// Packed RGBA bytes; unset pixels are fully transparent black.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| match p {
                Some(color) => color.to_rgba(),
                None => [0, 0, 0, 0],
            })
            .collect()
    }
}

/// Flag decoder.
///
/// # Example
///
/// ```
/// use uv_codec::{Color, Decoder, PaletteIndex, Raster};
///
/// let palette = Raster::from_pixels(2, 1, vec![Color::BLACK, Color::WHITE]).unwrap();
/// let index = PaletteIndex::new(&palette).unwrap();
///
/// // One entry: bottom-left pixel, palette white (v flipped on the wire)
/// let flag = Decoder::new(&index).decode("0.50:0.99,");
/// assert_eq!(flag.get(0, 65), Some(Color::WHITE));
/// assert_eq!(flag.get(0, 64), None);
/// assert_eq!(flag.decoded(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    index: &'a PaletteIndex,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over `index`.
    pub fn new(index: &'a PaletteIndex) -> Self {
        Self { index }
    }

    /// Decode an encoded string.
    ///
    /// NUL bytes are removed first. Every non-empty `,`-separated segment
    /// takes the next pixel slot; malformed segments leave that pixel unset.
    /// Segments past the last pixel are ignored.
    pub fn decode(&self, encoded: &str) -> DecodedFlag {
        let cleaned: Cow<'_, str> = if encoded.contains('\0') {
            Cow::Owned(encoded.replace('\0', ""))
        } else {
            Cow::Borrowed(encoded)
        };

        let mut flag = DecodedFlag::empty();
        let mut approximate = 0usize;
        let mut slot = 0usize;

        for segment in segments(&cleaned) {
            if slot >= FLAG_PIXELS {
                flag.ignored += 1;
                continue;
            }
            match parse_entry(segment) {
                Ok(wire) => {
                    let coordinate = wire.flipped();
                    if !self.index.is_exact(coordinate) {
                        approximate += 1;
                    }
                    flag.pixels[slot_offset(slot)] = Some(self.index.color_at(coordinate));
                }
                Err(err) => {
                    flag.skipped += 1;
                    tracing::warn!(slot, entry = segment, error = %err, "Skipping malformed coordinate entry");
                }
            }
            slot += 1;
        }

        if flag.ignored > 0 {
            tracing::warn!(
                ignored = flag.ignored,
                "Encoded string has more entries than the flag has pixels"
            );
        }
        if approximate > 0 {
            tracing::warn!(
                approximate,
                "Coordinates not produced by this palette were resolved by sampling"
            );
        }
        tracing::debug!(
            entries = slot,
            decoded = flag.decoded(),
            skipped = flag.skipped,
            "Decoded flag"
        );

        flag
    }
}
