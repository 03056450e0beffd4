//! End-to-end flow tests: image file -> encoded string -> PNG.

mod common;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::{assert_full_encoding, assert_png, fixtures};
use flag_importer::assets::AssetLoader;
use flag_importer::error::AppError;
use flag_importer::models::AppConfig;
use flag_importer::services::{raster_io, FlagService};
use uv_codec::{CodecError, Color, DistanceMetric, FLAG_HEIGHT, FLAG_WIDTH};

fn embedded_service() -> FlagService {
    FlagService::new(&AssetLoader::default(), &AppConfig::default()).unwrap()
}

#[test]
fn test_encode_decode_flow_with_embedded_palette() {
    let dir = TempDir::new().unwrap();
    let image = fixtures::write_png(dir.path(), "flag.png", &fixtures::gradient_flag());
    let service = embedded_service();

    // Step 1: encode the image file
    let encoded = service.encode_file(&image, false).unwrap();
    assert_full_encoding(encoded.as_str());

    // Step 2: decode back into a PNG
    let flag = service.decode(encoded.as_str());
    assert_eq!(flag.decoded(), (FLAG_WIDTH * FLAG_HEIGHT) as usize);
    let png = service.decoded_png(&flag, None).unwrap();
    assert_png(&png);

    // Step 3: the decoded image encodes to the same string
    let decoded_path = dir.path().join("output.png");
    std::fs::write(&decoded_path, &png).unwrap();
    let again = service.encode_file(&decoded_path, false).unwrap();
    assert_eq!(encoded.as_str(), again.as_str());
}

#[test]
fn test_custom_palette_round_trips_exact_colors() {
    let dir = TempDir::new().unwrap();
    let palette = fixtures::small_palette();
    let palette_path = fixtures::write_png(dir.path(), "palette.png", &palette);
    let flag = fixtures::striped_flag(palette.pixels());
    let image = fixtures::write_png(dir.path(), "flag.png", &flag);

    let loader = AssetLoader::default().with_palette_file(palette_path);
    let service = FlagService::new(&loader, &AppConfig::default()).unwrap();
    assert_eq!(service.index().len(), 12);

    let encoded = service.encode_file(&image, true).unwrap();
    let preview = raster_io::decode_raster(&service.preview_png(&encoded).unwrap().unwrap()).unwrap();
    assert_eq!(preview, flag);

    let decoded = service.decode(encoded.as_str());
    assert_eq!(decoded.to_raster(Color::BLACK), flag);
}

#[test]
fn test_wrong_size_image_is_rejected() {
    let dir = TempDir::new().unwrap();
    let image = fixtures::write_png(dir.path(), "big.png", &uv_codec::Raster::new(200, 132, Color::WHITE));

    let err = embedded_service().encode_file(&image, false).unwrap_err();
    assert!(matches!(
        err,
        AppError::Codec(CodecError::SizeMismatch {
            width: 200,
            height: 132
        })
    ));
}

#[test]
fn test_undecodable_image_is_an_asset_error() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("flag.png");
    std::fs::write(&image, b"not a png at all").unwrap();

    let err = embedded_service().encode_file(&image, false).unwrap_err();
    assert!(matches!(err, AppError::AssetDecode { .. }));
}

#[test]
fn test_undecodable_palette_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let palette = dir.path().join("palette.png");
    std::fs::write(&palette, b"garbage").unwrap();

    let loader = AssetLoader::default().with_palette_file(palette);
    let err = FlagService::new(&loader, &AppConfig::default()).err().unwrap();
    assert!(matches!(err, AppError::PaletteLoad { .. }));
}

#[test]
fn test_damaged_string_still_decodes_to_full_flag() {
    let service = embedded_service();
    let encoded = service
        .encode_raster(&fixtures::gradient_flag(), false)
        .unwrap()
        .into_string();

    // Truncate mid-entry and sprinkle NULs, as a corrupted store would
    let damaged = format!("{}\0\0", &encoded[..encoded.len() / 2 + 3]);
    let flag = service.decode(&damaged);

    assert_eq!(flag.pixels().len(), (FLAG_WIDTH * FLAG_HEIGHT) as usize);
    assert_eq!(flag.skipped(), 1);
    assert_eq!(flag.decoded(), 3300);

    let png = service
        .decoded_png(&flag, Some(Color::new(1, 2, 3)))
        .unwrap();
    let raster = raster_io::decode_raster(&png).unwrap();
    assert_eq!(raster.dimensions(), (FLAG_WIDTH, FLAG_HEIGHT));
    assert_eq!(raster.get(99, 0), Some(Color::new(1, 2, 3)));
}

#[test]
fn test_config_file_selects_metric_and_threads() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "metric: rgb\nthreads: 2\n").unwrap();

    let loader = AssetLoader::new(None, Some(config_path));
    let config = AppConfig::load_from_assets(&loader);
    assert_eq!(config.metric, DistanceMetric::RgbSquared);
    assert_eq!(config.threads, 2);

    let service = FlagService::new(&loader, &config).unwrap();
    assert_eq!(service.metric(), DistanceMetric::RgbSquared);

    let encoded = service.encode_raster(&fixtures::gradient_flag(), false).unwrap();
    assert_full_encoding(encoded.as_str());
}

#[test]
fn test_encoded_file_with_invalid_utf8_still_decodes() {
    let dir = TempDir::new().unwrap();
    let service = embedded_service();
    let encoded = service
        .encode_raster(&fixtures::gradient_flag(), false)
        .unwrap()
        .into_string();

    // Replace entry 10 with bytes that are not UTF-8
    let mut bytes = Vec::new();
    for (i, entry) in encoded.split_terminator(',').enumerate() {
        if i == 10 {
            bytes.extend_from_slice(b"\xff\xfe\x00");
        } else {
            bytes.extend_from_slice(entry.as_bytes());
        }
        bytes.push(b',');
    }
    let path = dir.path().join("flag.txt");
    std::fs::write(&path, &bytes).unwrap();

    let flag = service.decode_file(&path).unwrap();
    assert_eq!(flag.skipped(), 1);
    assert_eq!(flag.decoded(), (FLAG_WIDTH * FLAG_HEIGHT) as usize - 1);
    // Slot 10 is column 0, ten rows up from the bottom
    assert_eq!(flag.get(0, 55), None);
    assert_png(&service.decoded_png(&flag, None).unwrap());
}

#[test]
fn test_missing_encoded_file_is_an_io_error() {
    let err = embedded_service()
        .decode_file(std::path::Path::new("/nonexistent/flag.txt"))
        .err()
        .unwrap();
    assert!(matches!(err, AppError::Io(_)));
}
