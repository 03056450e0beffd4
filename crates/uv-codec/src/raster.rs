//! Fixed-size grid of 8-bit colors.
//!
//! [`Raster`] is the in-memory image both ends of the codec work on: the
//! palette is passed in as one, the Encoder consumes one and the Decoder's
//! output converts to one. Pixels are stored row-major.

use crate::color::Color;

/// A width x height grid of [`Color`] values in row-major order.
///
/// # Example
///
/// ```
/// use uv_codec::{Color, Raster};
///
/// let mut raster = Raster::new(3, 2, Color::BLACK);
/// raster.set(2, 1, Color::WHITE);
///
/// assert_eq!(raster.dimensions(), (3, 2));
/// assert_eq!(raster.get(2, 1), Some(Color::WHITE));
/// assert_eq!(raster.get(3, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Raster {
    /// Create a raster with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a raster from packed RGBA bytes.
    ///
    /// Alpha is composited over black, which is how premultiplied readers
    /// see a translucent pixel. Returns `None` if the buffer length does not
    /// match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| Color::from_rgba_over_black([px[0], px[1], px[2], px[3]]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a raster from packed RGB bytes.
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> Option<Self> {
        if rgb.len() != width as usize * height as usize * 3 {
            return None;
        }
        let pixels = rgb
            .chunks_exact(3)
            .map(|px| Color::new(px[0], px[1], px[2]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True if the raster has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Color at (x, y), or `None` outside the raster.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Set the color at (x, y). Returns false (and does nothing) outside the raster.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Iterate `(x, y, color)` in row-major order.
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i as u32) % width, (i as u32) / width, c))
    }

    /// Packed opaque RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }

    /// Packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }
}
