//! End-to-end flag encoding and decoding.
//!
//! [`FlagService`] loads the palette once, builds the [`PaletteIndex`] and
//! keeps it for the lifetime of the operation. Every encode and decode goes
//! through that single index.

use std::path::Path;

use uv_codec::{
    Color, DecodedFlag, Decoder, DistanceMetric, EncodedFlag, Encoder, PaletteIndex, Raster,
};

use super::raster_io;
use crate::assets::AssetLoader;
use crate::error::AppError;
use crate::models::AppConfig;

pub struct FlagService {
    index: PaletteIndex,
    metric: DistanceMetric,
    pool: Option<rayon::ThreadPool>,
}

impl FlagService {
    /// Load the palette through `loader` and apply `config`
    pub fn new(loader: &AssetLoader, config: &AppConfig) -> Result<Self, AppError> {
        let origin = loader.palette_origin();
        let palette_error = |reason: String| AppError::PaletteLoad {
            origin: origin.clone(),
            reason,
        };

        let bytes = loader
            .read_palette()
            .map_err(|e| palette_error(e.to_string()))?;
        let palette =
            raster_io::decode_raster(&bytes).map_err(|e| palette_error(e.to_string()))?;

        tracing::info!(
            palette = %origin,
            width = palette.width(),
            height = palette.height(),
            "Loaded palette"
        );

        Self::from_palette(&palette, config.metric, config.threads)
            .map_err(|e| match e {
                AppError::Codec(codec) => palette_error(codec.to_string()),
                other => other,
            })
    }

    /// Build the service from an already decoded palette
    ///
    /// `threads == 0` uses the global rayon pool.
    pub fn from_palette(
        palette: &Raster,
        metric: DistanceMetric,
        threads: usize,
    ) -> Result<Self, AppError> {
        let index = PaletteIndex::new(palette)?;

        let pool = if threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| AppError::ThreadPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            index,
            metric,
            pool,
        })
    }

    /// Override the distance metric
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn index(&self) -> &PaletteIndex {
        &self.index
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Encode a 100x66 raster
    pub fn encode_raster(&self, raster: &Raster, preview: bool) -> Result<EncodedFlag, AppError> {
        let encoder = Encoder::new(&self.index)
            .metric(self.metric)
            .preview(preview);

        let encoded = match self.pool {
            Some(ref pool) => pool.install(|| encoder.encode(raster))?,
            None => encoder.encode(raster)?,
        };

        tracing::info!(
            metric = %self.metric,
            entries = encoded.entry_count(),
            "Encoded flag"
        );
        Ok(encoded)
    }

    /// Load an image file and encode it
    pub fn encode_file(&self, path: &Path, preview: bool) -> Result<EncodedFlag, AppError> {
        let raster = raster_io::load_raster(path)?;
        self.encode_raster(&raster, preview)
    }

    /// Decode an encoded string; never fails
    pub fn decode(&self, encoded: &str) -> DecodedFlag {
        let flag = Decoder::new(&self.index).decode(encoded);
        if flag.skipped() > 0 {
            tracing::warn!(
                skipped = flag.skipped(),
                "Some entries were malformed and left blank"
            );
        }
        tracing::info!(decoded = flag.decoded(), "Decoded flag");
        flag
    }

    /// Decode raw bytes as read from a file or the registry
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so stray bytes only
    /// blank the entries they land in.
    pub fn decode_bytes(&self, bytes: &[u8]) -> DecodedFlag {
        self.decode(&String::from_utf8_lossy(bytes))
    }

    /// Read an encoded string from a file and decode it
    pub fn decode_file(&self, path: &Path) -> Result<DecodedFlag, AppError> {
        let bytes = std::fs::read(path)?;
        Ok(self.decode_bytes(&bytes))
    }

    /// PNG bytes of a decoded flag
    ///
    /// With a fill color the PNG is opaque RGB, otherwise unset pixels are
    /// transparent.
    pub fn decoded_png(&self, flag: &DecodedFlag, fill: Option<Color>) -> Result<Vec<u8>, AppError> {
        match fill {
            Some(fill) => raster_io::raster_to_png(&flag.to_raster(fill)),
            None => raster_io::rgba_to_png(flag.width(), flag.height(), &flag.to_rgba8()),
        }
    }

    /// PNG bytes of an encode preview, if one was produced
    pub fn preview_png(&self, encoded: &EncodedFlag) -> Result<Option<Vec<u8>>, AppError> {
        encoded.preview().map(raster_io::raster_to_png).transpose()
    }
}
