//! Flag geometry and the slot order of the wire format.
//!
//! The encoded string walks the flag column by column, left to right, and
//! each column bottom to top. Slot `i` therefore sits in column `i / 66` and
//! row `65 - i % 66`.

/// Flag width in pixels.
pub const FLAG_WIDTH: u32 = 100;

/// Flag height in pixels.
pub const FLAG_HEIGHT: u32 = 66;

/// Number of pixels, and so of `u:v,` entries in a full encoding.
pub const FLAG_PIXELS: usize = FLAG_WIDTH as usize * FLAG_HEIGHT as usize;

/// `(x, y)` of wire slot `slot`.
///
/// # Panics
///
/// Debug-asserts `slot < FLAG_PIXELS`.
#[inline]
pub fn slot_position(slot: usize) -> (u32, u32) {
    debug_assert!(slot < FLAG_PIXELS, "slot {slot} outside the flag");
    let height = FLAG_HEIGHT as usize;
    let x = slot / height;
    let y = height - 1 - slot % height;
    (x as u32, y as u32)
}

/// Row-major pixel offset of wire slot `slot`.
#[inline]
pub fn slot_offset(slot: usize) -> usize {
    let (x, y) = slot_position(slot);
    y as usize * FLAG_WIDTH as usize + x as usize
}
