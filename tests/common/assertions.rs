//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

use uv_codec::{codec::segments, FLAG_HEIGHT, FLAG_WIDTH};

/// Assert `bytes` is a PNG
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert `encoded` is a complete encoding: one `0.uu:0.vv,` entry per pixel
pub fn assert_full_encoding(encoded: &str) {
    let entries: Vec<&str> = segments(encoded).collect();
    assert_eq!(
        entries.len(),
        (FLAG_WIDTH * FLAG_HEIGHT) as usize,
        "Expected one entry per pixel"
    );
    for entry in entries {
        assert_eq!(entry.len(), 9, "Malformed entry {entry:?}");
        assert!(entry.starts_with("0."), "Malformed entry {entry:?}");
    }
}
