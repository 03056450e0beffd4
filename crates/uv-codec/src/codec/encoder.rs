//! Encoder: 100x66 raster -> coordinate string.

use std::fmt;

use rayon::prelude::*;

use super::layout::{slot_offset, FLAG_HEIGHT, FLAG_PIXELS, FLAG_WIDTH};
use crate::api::CodecError;
use crate::palette::{DistanceMetric, PaletteIndex};
use crate::raster::Raster;

/// Bytes per `0.uu:0.vv,` entry.
const ENTRY_LEN: usize = 10;

/// Result of encoding a flag.
///
/// Holds the encoded string and, when requested, a preview raster of the
/// palette colors each pixel was matched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFlag {
    encoded: String,
    preview: Option<Raster>,
}

impl EncodedFlag {
    /// The encoded `u:v,` string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Consume the result, keeping only the string.
    #[inline]
    pub fn into_string(self) -> String {
        self.encoded
    }

    /// Quantized preview, if the encoder was asked for one.
    #[inline]
    pub fn preview(&self) -> Option<&Raster> {
        self.preview.as_ref()
    }

    /// Number of entries in the encoded string.
    pub fn entry_count(&self) -> usize {
        self.encoded.bytes().filter(|&b| b == b',').count()
    }
}

impl fmt::Display for EncodedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// Flag encoder.
///
/// Borrows a [`PaletteIndex`] for the duration of the encode. Configuration
/// methods consume and return `self`; [`encode()`](Self::encode) takes
/// `&self`, so one encoder can be reused across flags.
///
/// # Example
///
/// ```
/// use uv_codec::{Color, DistanceMetric, Encoder, PaletteIndex, Raster};
///
/// let palette = Raster::from_pixels(2, 1, vec![Color::BLACK, Color::WHITE]).unwrap();
/// let index = PaletteIndex::new(&palette).unwrap();
///
/// let flag = Raster::new(100, 66, Color::new(250, 250, 250));
/// let encoded = Encoder::new(&index)
///     .metric(DistanceMetric::RgbSquared)
///     .preview(true)
///     .encode(&flag)
///     .unwrap();
///
/// assert!(encoded.as_str().starts_with("0.50:0.99,0.50:0.99,"));
/// assert_eq!(encoded.entry_count(), 6600);
/// assert_eq!(encoded.preview().unwrap().get(0, 0), Some(Color::WHITE));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    index: &'a PaletteIndex,
    metric: DistanceMetric,
    preview: bool,
}

impl<'a> Encoder<'a> {
    /// Create an encoder with the default metric and no preview.
    pub fn new(index: &'a PaletteIndex) -> Self {
        Self {
            index,
            metric: DistanceMetric::default(),
            preview: false,
        }
    }

    /// Set the distance metric used by the nearest-color search.
    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Also produce a raster of the matched palette colors.
    #[inline]
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Encode a 100x66 raster.
    ///
    /// # Errors
    ///
    /// [`CodecError::SizeMismatch`] if the raster is not exactly 100x66.
    /// Nothing is computed in that case.
    pub fn encode(&self, raster: &Raster) -> Result<EncodedFlag, CodecError> {
        let (width, height) = raster.dimensions();
        if (width, height) != (FLAG_WIDTH, FLAG_HEIGHT) {
            return Err(CodecError::SizeMismatch { width, height });
        }

        let matches = self.match_pixels(raster);

        let mut encoded = String::with_capacity(FLAG_PIXELS * ENTRY_LEN);
        for slot in 0..FLAG_PIXELS {
            self.index
                .coordinate(matches[slot_offset(slot)])
                .flipped()
                .push_wire_entry(&mut encoded);
        }

        let preview = self.preview.then(|| {
            let pixels = matches.iter().map(|&idx| self.index.color(idx)).collect();
            Raster::from_pixels(width, height, pixels)
        });

        tracing::debug!(
            metric = %self.metric,
            palette_colors = self.index.len(),
            bytes = encoded.len(),
            "Encoded flag"
        );

        Ok(EncodedFlag {
            encoded,
            preview: preview.flatten(),
        })
    }

    /// Nearest palette entry for every pixel, row-major.
    ///
    /// Rows are matched in parallel; each worker writes only its own row of
    /// the output buffer.
    fn match_pixels(&self, raster: &Raster) -> Vec<usize> {
        let width = raster.width() as usize;
        let mut matches = vec![0usize; raster.pixels().len()];

        matches
            .par_chunks_mut(width)
            .zip(raster.pixels().par_chunks(width))
            .for_each(|(out, row)| {
                for (slot, &pixel) in out.iter_mut().zip(row) {
                    *slot = self.index.find_nearest(pixel, self.metric).0;
                }
            });

        matches
    }
}
