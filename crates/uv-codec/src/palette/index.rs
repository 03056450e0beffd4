//! Palette index: Color -> Coordinate mapping with nearest-color search.
//!
//! The index is built once from the reference palette raster and is read-only
//! afterwards, so a single instance can be shared by reference across the
//! Encoder's worker threads.

use std::collections::HashMap;

use super::coordinate::Coordinate;
use super::error::PaletteError;
use super::metric::{rgb_squared, DistanceMetric};
use crate::color::{Color, Oklab};
use crate::raster::Raster;

/// Largest palette width or height accepted.
pub const MAX_PALETTE_DIMENSION: u32 = 65_535;

/// One distinct palette color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    /// The palette color
    pub color: Color,
    /// Coordinate of the last pixel (row-major) carrying this color
    pub coordinate: Coordinate,
    /// Precomputed Oklab value used by [`DistanceMetric::Ciede2000`]
    pub oklab: Oklab,
}

/// Queryable view of a reference palette image.
///
/// Every distinct color of the palette maps to the normalized coordinate of
/// the *last* pixel carrying it in row-major scan order. Entries are kept in
/// first-seen order; the nearest-color search breaks ties in favor of the
/// earlier entry.
///
/// # Example
///
/// ```
/// use uv_codec::{Color, DistanceMetric, PaletteIndex, Raster};
///
/// let palette = Raster::from_pixels(
///     2,
///     1,
///     vec![Color::BLACK, Color::WHITE],
/// ).unwrap();
/// let index = PaletteIndex::new(&palette).unwrap();
///
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.coordinate_of(Color::WHITE).unwrap().to_string(), "0.50:0.01");
///
/// let dark_grey = Color::new(40, 40, 40);
/// assert_eq!(index.nearest_color(dark_grey, DistanceMetric::Ciede2000), Color::BLACK);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteIndex {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    entries: Vec<PaletteEntry>,
    lookup: HashMap<Color, usize>,
    by_coordinate: HashMap<Coordinate, Color>,
}

impl PaletteIndex {
    /// Build the index from a palette raster.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::Empty`] if the raster has no pixels
    /// - [`PaletteError::TooLarge`] if either side exceeds
    ///   [`MAX_PALETTE_DIMENSION`]
    pub fn new(palette: &Raster) -> Result<Self, PaletteError> {
        let (width, height) = palette.dimensions();
        if palette.is_empty() {
            return Err(PaletteError::Empty);
        }
        if width > MAX_PALETTE_DIMENSION || height > MAX_PALETTE_DIMENSION {
            return Err(PaletteError::TooLarge { width, height });
        }

        let mut entries: Vec<PaletteEntry> = Vec::new();
        let mut lookup: HashMap<Color, usize> = HashMap::new();

        for (x, y, color) in palette.enumerate_pixels() {
            let coordinate = Coordinate::from_position(x, y, width, height);
            match lookup.get(&color) {
                // Later pixels of an already-seen color move its coordinate
                Some(&idx) => entries[idx].coordinate = coordinate,
                None => {
                    lookup.insert(color, entries.len());
                    entries.push(PaletteEntry {
                        color,
                        coordinate,
                        oklab: Oklab::from(color),
                    });
                }
            }
        }

        // Second pass: for each coordinate bucket remember the last pixel whose
        // color finally landed in that bucket.
        let mut by_coordinate: HashMap<Coordinate, Color> = HashMap::new();
        for (x, y, color) in palette.enumerate_pixels() {
            let coordinate = Coordinate::from_position(x, y, width, height);
            if entries[lookup[&color]].coordinate == coordinate {
                by_coordinate.insert(coordinate, color);
            }
        }

        tracing::debug!(
            width,
            height,
            colors = entries.len(),
            buckets = by_coordinate.len(),
            "Built palette index"
        );

        let index = Self {
            width,
            height,
            pixels: palette.pixels().to_vec(),
            entries,
            lookup,
            by_coordinate,
        };

        let ambiguous = index.ambiguous_colors();
        if ambiguous > 0 {
            tracing::warn!(
                width,
                height,
                ambiguous,
                "Palette colors share coordinate buckets and will not decode to themselves"
            );
        }

        Ok(index)
    }

    /// Number of distinct colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Palette width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Palette height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Entry at `idx` in first-seen order.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn entry(&self, idx: usize) -> &PaletteEntry {
        &self.entries[idx]
    }

    /// Color of entry `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Color {
        self.entries[idx].color
    }

    /// Coordinate of entry `idx`.
    #[inline]
    pub fn coordinate(&self, idx: usize) -> Coordinate {
        self.entries[idx].coordinate
    }

    /// All entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Coordinate recorded for `color`, if it is a palette color.
    pub fn coordinate_of(&self, color: Color) -> Option<Coordinate> {
        self.lookup
            .get(&color)
            .map(|&idx| self.entries[idx].coordinate)
    }

    /// Resolve a coordinate back to a palette color.
    ///
    /// Coordinates produced by this index resolve to the last palette color
    /// recorded in that bucket, which is the color itself unless
    /// [`ambiguous_colors`](Self::ambiguous_colors) is non-zero. Anything
    /// else samples the palette pixel whose area
    /// contains `(u * width, v * height)`, clamped to the palette bounds.
    pub fn color_at(&self, coordinate: Coordinate) -> Color {
        match self.by_coordinate.get(&coordinate) {
            Some(&color) => color,
            None => self.sample(coordinate),
        }
    }

    /// True if `coordinate` is one this index records for some color.
    pub fn is_exact(&self, coordinate: Coordinate) -> bool {
        self.by_coordinate.contains_key(&coordinate)
    }

    /// Number of entries whose coordinate resolves to a different color.
    ///
    /// Two-decimal coordinates hold at most 99 buckets per axis, and pixel 0
    /// and pixel 1 share the 0.01 bucket on any axis wider than 50 pixels.
    /// Palettes that keep this at zero decode every color they encode.
    pub fn ambiguous_colors(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| self.by_coordinate.get(&entry.coordinate) != Some(&entry.color))
            .count()
    }

    /// Sample the palette pixel under `coordinate`.
    pub fn sample(&self, coordinate: Coordinate) -> Color {
        let x = scale_hundredths(coordinate.u_hundredths(), self.width);
        let y = scale_hundredths(coordinate.v_hundredths(), self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Find the entry closest to `target` under `metric`.
    ///
    /// Full scan over every entry with a strict `<` comparison, so the
    /// earliest entry wins ties. Returns `(entry index, distance)`.
    pub fn find_nearest(&self, target: Color, metric: DistanceMetric) -> (usize, f64) {
        let mut best_idx = 0;
        let mut best_dist = f64::MAX;

        match metric {
            DistanceMetric::Ciede2000 => {
                // Target converted once per search
                let target_lab = Oklab::from(target);
                for (i, entry) in self.entries.iter().enumerate() {
                    let dist = target_lab.ciede2000(entry.oklab);
                    if dist < best_dist {
                        best_dist = dist;
                        best_idx = i;
                    }
                }
            }
            DistanceMetric::RgbSquared => {
                for (i, entry) in self.entries.iter().enumerate() {
                    let dist = rgb_squared(target, entry.color);
                    if dist < best_dist {
                        best_dist = dist;
                        best_idx = i;
                    }
                }
            }
        }

        (best_idx, best_dist)
    }

    /// Palette color closest to `target`.
    #[inline]
    pub fn nearest_color(&self, target: Color, metric: DistanceMetric) -> Color {
        self.color(self.find_nearest(target, metric).0)
    }

    /// Coordinate of the palette color closest to `target`.
    #[inline]
    pub fn nearest_coordinate(&self, target: Color, metric: DistanceMetric) -> Coordinate {
        self.coordinate(self.find_nearest(target, metric).0)
    }
}

/// `floor(hundredths / 100 * extent)`, clamped to the last pixel.
#[inline]
fn scale_hundredths(hundredths: u8, extent: u32) -> u32 {
    (hundredths as u32 * extent / 100).min(extent - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Palette where every pixel has a distinct color.
    fn distinct(width: u32, height: u32) -> Raster {
        let pixels = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| Color::new((x * 25) as u8, (y * 40) as u8, ((x + y) * 7) as u8))
            })
            .collect();
        Raster::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_empty_palette_rejected() {
        let empty = Raster::new(0, 0, Color::BLACK);
        assert_eq!(PaletteIndex::new(&empty).unwrap_err(), PaletteError::Empty);

        let no_rows = Raster::new(10, 0, Color::BLACK);
        assert_eq!(PaletteIndex::new(&no_rows).unwrap_err(), PaletteError::Empty);
    }

    #[test]
    fn test_oversized_palette_rejected() {
        let wide = Raster::new(MAX_PALETTE_DIMENSION + 1, 1, Color::BLACK);
        assert_eq!(
            PaletteIndex::new(&wide).unwrap_err(),
            PaletteError::TooLarge {
                width: MAX_PALETTE_DIMENSION + 1,
                height: 1
            }
        );
    }

    #[test]
    fn test_coordinates_truncate_and_clamp() {
        let palette = distinct(10, 6);
        let index = PaletteIndex::new(&palette).unwrap();

        assert_eq!(index.len(), 60);
        let origin = index.coordinate_of(palette.get(0, 0).unwrap()).unwrap();
        assert_eq!(origin.to_string(), "0.01:0.01");

        let c = index.coordinate_of(palette.get(7, 4).unwrap()).unwrap();
        assert_eq!(c.to_string(), "0.70:0.66");
    }

    #[test]
    fn test_boundary_clamping_for_various_sizes() {
        for (w, h) in [(1, 1), (3, 3), (100, 66), (250, 7)] {
            let palette = distinct(w, h);
            let index = PaletteIndex::new(&palette).unwrap();
            for entry in index.iter() {
                let (u, v) = (entry.coordinate.u_hundredths(), entry.coordinate.v_hundredths());
                assert!((1..=99).contains(&u), "{w}x{h}: u={u}");
                assert!((1..=99).contains(&v), "{w}x{h}: v={v}");
            }
        }
    }

    #[test]
    fn test_duplicate_color_last_write_wins() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        // red at x=0 and x=2, blue at x=1 and x=3
        let palette = Raster::from_pixels(4, 1, vec![red, blue, red, blue]).unwrap();
        let index = PaletteIndex::new(&palette).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.coordinate_of(red).unwrap().u_hundredths(), 50);
        assert_eq!(index.coordinate_of(blue).unwrap().u_hundredths(), 75);
        // First-seen order is kept
        assert_eq!(index.color(0), red);
        assert_eq!(index.color(1), blue);
    }

    #[test]
    fn test_inverse_lookup_recovers_every_color() {
        for (w, h) in [(3, 3), (10, 6), (100, 66), (250, 7)] {
            let index = PaletteIndex::new(&distinct(w, h)).unwrap();
            for entry in index.iter() {
                let resolved = index.color_at(entry.coordinate);
                // Colors sharing a bucket are indistinguishable on the wire
                assert_eq!(
                    index.coordinate_of(resolved),
                    Some(entry.coordinate),
                    "{w}x{h}: {}",
                    entry.color
                );
                assert!(index.is_exact(entry.coordinate));
            }
        }
    }

    #[test]
    fn test_inverse_lookup_exact_when_buckets_are_unique() {
        for (w, h) in [(10, 6), (50, 30), (1, 1)] {
            let index = PaletteIndex::new(&distinct(w, h)).unwrap();
            assert_eq!(index.ambiguous_colors(), 0, "{w}x{h}");
            for entry in index.iter() {
                assert_eq!(index.color_at(entry.coordinate), entry.color, "{w}x{h}");
            }
        }
    }

    #[test]
    fn test_wide_palettes_have_ambiguous_colors() {
        // Pixels 0 and 1 of a 51 wide row both truncate into 0.01
        let index = PaletteIndex::new(&distinct(51, 1)).unwrap();
        assert_eq!(index.ambiguous_colors(), 1);
        assert_eq!(index.color_at(index.coordinate(0)), index.color(1));

        let index = PaletteIndex::new(&distinct(128, 4)).unwrap();
        assert!(index.ambiguous_colors() > 0);
    }

    #[test]
    fn test_unknown_coordinate_samples_palette() {
        let palette = distinct(10, 6);
        let index = PaletteIndex::new(&palette).unwrap();

        // 0.55 is between the 0.50 and 0.60 buckets: pixel 5 contains it
        let coordinate = Coordinate::from_hundredths(55, 99).unwrap();
        assert!(!index.is_exact(coordinate));
        assert_eq!(index.color_at(coordinate), palette.get(5, 5).unwrap());
    }

    #[test]
    fn test_sampling_stays_in_bounds() {
        let palette = distinct(1, 1);
        let index = PaletteIndex::new(&palette).unwrap();
        let far = Coordinate::from_hundredths(99, 99).unwrap();
        assert_eq!(index.sample(far), palette.get(0, 0).unwrap());
    }

    #[test]
    fn test_nearest_returns_exact_palette_color() {
        let palette = distinct(10, 6);
        let index = PaletteIndex::new(&palette).unwrap();
        for metric in [DistanceMetric::Ciede2000, DistanceMetric::RgbSquared] {
            for &color in palette.pixels() {
                let (idx, dist) = index.find_nearest(color, metric);
                assert_eq!(index.color(idx), color);
                assert_eq!(dist, 0.0);
            }
        }
    }

    #[test]
    fn test_nearest_ties_prefer_first_seen_entry() {
        let a = Color::new(10, 0, 0);
        let b = Color::new(30, 0, 0);
        let palette = Raster::from_pixels(2, 1, vec![b, a]).unwrap();
        let index = PaletteIndex::new(&palette).unwrap();

        // (20,0,0) is equidistant from both in raw RGB
        let (idx, dist) = index.find_nearest(Color::new(20, 0, 0), DistanceMetric::RgbSquared);
        assert_eq!(idx, 0);
        assert_eq!(index.color(idx), b);
        assert_eq!(dist, 100.0);
    }

    #[test]
    fn test_nearest_result_is_a_palette_key() {
        let index = PaletteIndex::new(&distinct(10, 6)).unwrap();
        for target in [Color::new(13, 200, 77), Color::WHITE, Color::new(128, 1, 250)] {
            let color = index.nearest_color(target, DistanceMetric::Ciede2000);
            assert!(index.coordinate_of(color).is_some());
            assert_eq!(
                index.nearest_coordinate(target, DistanceMetric::Ciede2000),
                index.coordinate_of(color).unwrap()
            );
        }
    }
}
