//! Conversion between image files and codec rasters.
//!
//! Decoding goes through the `image` crate so PNG and JPEG inputs both work;
//! output PNGs are written with the `png` encoder directly.

use std::io::Cursor;
use std::path::Path;

use uv_codec::Raster;

use crate::error::AppError;

/// Decode image bytes (PNG or JPEG) into a raster.
///
/// Translucent pixels are composited over black.
pub fn decode_raster(bytes: &[u8]) -> Result<Raster, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Raster::from_rgba8(width, height, rgba.as_raw())
        .unwrap_or_else(|| Raster::new(width, height, uv_codec::Color::BLACK)))
}

/// Load an image file into a raster.
pub fn load_raster(path: &Path) -> Result<Raster, AppError> {
    let bytes = std::fs::read(path)?;
    let raster = decode_raster(&bytes).map_err(|e| AppError::AssetDecode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "Loaded image"
    );
    Ok(raster)
}

/// Encode packed 8-bit pixel data as a PNG.
fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode an opaque raster as an RGB PNG.
pub fn raster_to_png(raster: &Raster) -> Result<Vec<u8>, AppError> {
    encode_png(
        raster.width(),
        raster.height(),
        png::ColorType::Rgb,
        &raster.to_rgb8(),
    )
}

/// Encode packed RGBA bytes as an RGBA PNG.
pub fn rgba_to_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, AppError> {
    encode_png(width, height, png::ColorType::Rgba, rgba)
}
