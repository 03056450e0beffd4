//! Asset loading with embedded fallbacks
//!
//! This module provides a unified interface for loading the reference palette
//! and the config file with the following behavior:
//!
//! - If no external path is configured: use the embedded asset (no filesystem access)
//! - If an external config path is configured but missing: fall back to the embedded config
//! - If an external palette path is configured but missing: fail, never guess a palette
//!
//! The embedded `colorpicker.png` is a generated 50x50 hue/saturation/value
//! picker, not the game's own palette. Strings it produces only decode with
//! the same image; point `--palette` or `PALETTE_FILE` at the game's palette
//! to exchange flags with the game. At most 50 pixels per axis keep every
//! pixel in its own two-decimal coordinate bucket.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the embedded reference palette.
pub const PALETTE_ASSET: &str = "colorpicker.png";

/// File name of the embedded default config.
pub const CONFIG_ASSET: &str = "config.yaml";

/// Embedded reference palette
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.png"]
struct EmbeddedPalette;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Palette,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External palette image (from PALETTE_FILE, the config, or --palette)
    palette_file: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if an override was requested.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(palette_file: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            palette_file,
            config_file,
        }
    }

    /// Create a loader from the `PALETTE_FILE` and `CONFIG_FILE` env vars
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("PALETTE_FILE").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    /// Replace the palette override
    pub fn with_palette_file(mut self, path: PathBuf) -> Self {
        self.palette_file = Some(path);
        self
    }

    /// The configured palette override, if any
    pub fn palette_file(&self) -> Option<&Path> {
        self.palette_file.as_deref()
    }

    /// The configured config override, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Human-readable origin of the palette that [`read_palette`](Self::read_palette) returns
    pub fn palette_origin(&self) -> String {
        match self.palette_file {
            Some(ref path) => path.display().to_string(),
            None => format!("embedded {PALETTE_ASSET}"),
        }
    }

    /// Read the palette image bytes
    ///
    /// If an external path is configured it must exist; there is no fallback
    /// to the embedded palette.
    pub fn read_palette(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.palette_file {
            tracing::trace!(path = %path.display(), "Loading palette from filesystem");
            return Ok(Cow::Owned(fs::read(path)?));
        }

        EmbeddedPalette::get(PALETTE_ASSET)
            .map(|f| {
                tracing::trace!("Loading palette from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Embedded {PALETTE_ASSET} not found"),
                )
            })
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        // Try external first
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::debug!(path = %path.display(), "Config file not found, using embedded config");
        }

        // Fall back to embedded
        EmbeddedConfig::get(CONFIG_ASSET)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults in the working directory if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            let (path, data) = match category {
                AssetCategory::Palette => (
                    self.palette_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(format!("./{PALETTE_ASSET}"))),
                    EmbeddedPalette::get(PALETTE_ASSET).map(|f| f.data),
                ),
                AssetCategory::Config => (
                    self.config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(format!("./{CONFIG_ASSET}"))),
                    EmbeddedConfig::get(CONFIG_ASSET).map(|f| f.data),
                ),
            };

            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Some(data) = data {
                fs::write(&path, &*data)?;
                tracing::info!(path = %path.display(), "Extracted embedded asset");
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Palette => EmbeddedPalette::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Config => vec![CONFIG_ASSET.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_palette_is_a_png() {
        let loader = AssetLoader::default();
        let bytes = loader.read_palette().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(loader.palette_origin(), "embedded colorpicker.png");
    }

    #[test]
    fn test_missing_palette_override_is_an_error() {
        let loader = AssetLoader::default().with_palette_file(PathBuf::from("/nonexistent/palette.png"));
        let err = loader.read_palette().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_config_override_falls_back_to_embedded() {
        let loader = AssetLoader::new(None, Some(PathBuf::from("/nonexistent/config.yaml")));
        assert_eq!(loader.config_file(), Some(Path::new("/nonexistent/config.yaml")));
        let content = loader.read_config_string().unwrap();
        assert!(content.contains("metric:"));
    }

    #[test]
    fn test_list_embedded() {
        assert_eq!(
            AssetLoader::list_embedded(AssetCategory::Palette),
            vec![PALETTE_ASSET.to_string()]
        );
        assert_eq!(
            AssetLoader::list_embedded(AssetCategory::Config),
            vec![CONFIG_ASSET.to_string()]
        );
    }
}
