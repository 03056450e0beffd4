//! Unified error type for the uv-codec public API.
//!
//! [`CodecError`] wraps every error the codec can return into a single enum
//! for convenient `?` propagation in application code. Malformed entries in
//! an encoded string are not among them: the Decoder recovers from those.

use std::fmt;

use crate::codec::{FLAG_HEIGHT, FLAG_WIDTH};
use crate::palette::PaletteError;

/// Unified error type for the uv-codec public API.
///
/// # Example
///
/// ```
/// use uv_codec::{CodecError, Color, Encoder, PaletteIndex, Raster};
///
/// let palette = Raster::new(4, 4, Color::WHITE);
/// let index = PaletteIndex::new(&palette).unwrap();
///
/// let err = Encoder::new(&index).encode(&Raster::new(10, 10, Color::BLACK)).unwrap_err();
/// assert!(matches!(err, CodecError::SizeMismatch { width: 10, height: 10 }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Input raster is not exactly 100x66
    SizeMismatch {
        /// Width of the rejected raster
        width: u32,
        /// Height of the rejected raster
        height: u32,
    },
    /// Palette raster rejected while building the index
    Palette(PaletteError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::SizeMismatch { width, height } => write!(
                f,
                "image is {}x{}, expected {}x{}",
                width, height, FLAG_WIDTH, FLAG_HEIGHT
            ),
            CodecError::Palette(err) => write!(f, "palette error: {}", err),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::SizeMismatch { .. } => None,
            CodecError::Palette(err) => Some(err),
        }
    }
}

impl From<PaletteError> for CodecError {
    fn from(err: PaletteError) -> Self {
        CodecError::Palette(err)
    }
}
