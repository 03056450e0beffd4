//! Test fixtures and constants.

use std::path::{Path, PathBuf};

use flag_importer::services::raster_io;
use uv_codec::{Color, Raster, FLAG_HEIGHT, FLAG_WIDTH};

/// 4x3 palette with twelve distinct, well separated colors.
pub fn small_palette() -> Raster {
    let colors = [
        (0, 0, 0),
        (255, 255, 255),
        (255, 0, 0),
        (0, 255, 0),
        (0, 0, 255),
        (255, 255, 0),
        (0, 255, 255),
        (255, 0, 255),
        (128, 128, 128),
        (128, 0, 0),
        (0, 128, 0),
        (0, 0, 128),
    ];
    let pixels = colors
        .iter()
        .map(|&(r, g, b)| Color::new(r, g, b))
        .collect();
    Raster::from_pixels(4, 3, pixels).unwrap()
}

/// 100x66 flag painted in vertical stripes of the given colors.
pub fn striped_flag(colors: &[Color]) -> Raster {
    let mut flag = Raster::new(FLAG_WIDTH, FLAG_HEIGHT, colors[0]);
    for y in 0..FLAG_HEIGHT {
        for x in 0..FLAG_WIDTH {
            flag.set(x, y, colors[(x as usize / 7 + y as usize / 11) % colors.len()]);
        }
    }
    flag
}

/// 100x66 flag with a smooth gradient, so most pixels are off-palette.
pub fn gradient_flag() -> Raster {
    let mut flag = Raster::new(FLAG_WIDTH, FLAG_HEIGHT, Color::BLACK);
    for y in 0..FLAG_HEIGHT {
        for x in 0..FLAG_WIDTH {
            flag.set(
                x,
                y,
                Color::new((x * 255 / 99) as u8, (y * 255 / 65) as u8, 96),
            );
        }
    }
    flag
}

/// Write `raster` as a PNG into `dir` and return the path.
pub fn write_png(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, raster_io::raster_to_png(raster).unwrap()).unwrap();
    path
}
