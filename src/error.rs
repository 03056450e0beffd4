use thiserror::Error;
use uv_codec::{CodecError, PaletteError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load palette {origin}: {reason}")]
    PaletteLoad { origin: String, reason: String },

    #[error("Failed to decode image {path}: {reason}")]
    AssetDecode { path: String, reason: String },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PaletteError> for AppError {
    fn from(e: PaletteError) -> Self {
        AppError::Codec(CodecError::Palette(e))
    }
}
