use crate::assets::AssetLoader;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use uv_codec::{Color, DistanceMetric};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Palette image overriding the embedded one
    #[serde(default)]
    pub palette: Option<PathBuf>,

    /// Distance metric for the nearest-color search
    #[serde(default, deserialize_with = "deserialize_metric")]
    pub metric: DistanceMetric,

    /// Write a quantized preview when encoding
    #[serde(default)]
    pub preview: bool,

    /// Color for undecodable pixels (transparent when unset)
    #[serde(default, deserialize_with = "deserialize_fill_color")]
    pub fill_color: Option<Color>,

    /// Default output file for `decode`
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Encoder worker threads (0 = rayon default)
    #[serde(default)]
    pub threads: usize,
}

fn default_output() -> PathBuf {
    PathBuf::from("output.png")
}

fn deserialize_metric<'de, D>(deserializer: D) -> Result<DistanceMetric, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

fn deserialize_fill_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let hex: Option<String> = Option::deserialize(deserializer)?;
    hex.map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::from_yaml(&content),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML, falling back to defaults on error
    pub fn from_yaml(content: &str) -> Self {
        // A file with nothing but comments is not a YAML mapping
        let has_content = content.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#') && line != "---"
        });
        if !has_content {
            return Self::default();
        }

        match serde_yaml::from_str::<Self>(content) {
            Ok(config) => {
                tracing::debug!(
                    metric = %config.metric,
                    preview = config.preview,
                    threads = config.threads,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: None,
            metric: DistanceMetric::Ciede2000,
            preview: false,
            fill_color: None,
            output: default_output(),
            threads: 0,
        }
    }
}
