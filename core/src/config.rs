use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::labels::Language;

pub const DEFAULT_SEED: u64 = 1337;
pub const DEFAULT_DPI: u32 = 150;
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 480;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

const MIN_DPI: u32 = 30;
const MAX_DPI: u32 = 600;

/// Load a JSON configuration from disk, creating it with the provided initializer if missing.
pub fn load_or_init<T, F>(path: &Path, initializer: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;
        Ok(value)
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let value = initializer();
        let serialized = serde_json::to_string_pretty(&value)?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(value)
    }
}

/// Persistent settings for one figure run.
///
/// Missing fields fall back to their defaults so older config files keep loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Seed for the learning-curve noise.
    pub seed: u64,
    pub language: Language,
    /// Pixels per inch; figure sizes are given in inches per chart.
    pub dpi: u32,
    /// Maximum width of the thumbnails embedded in `report.md`.
    pub thumbnail_width: u32,
    /// Font family handed to the plotting backend. Set this to a CJK-capable
    /// family (e.g. "Noto Sans CJK SC") when rendering Chinese labels.
    pub font_family: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            language: Language::default(),
            dpi: DEFAULT_DPI,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            bail!(
                "dpi must be between {} and {}, got {}",
                MIN_DPI,
                MAX_DPI,
                self.dpi
            );
        }
        if self.thumbnail_width == 0 {
            bail!("thumbnail_width must be positive");
        }
        if self.font_family.trim().is_empty() {
            bail!("font_family must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_config_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.json");

        let config: ReportConfig = load_or_init(&path, ReportConfig::default).unwrap();
        assert_eq!(config, ReportConfig::default());
        assert!(path.exists());

        let reloaded: ReportConfig = load_or_init(&path, || panic!("should not re-init")).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "seed": 7, "language": "en" }"#).unwrap();

        let config: ReportConfig = load_or_init(&path, ReportConfig::default).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.dpi, DEFAULT_DPI);
    }

    #[test]
    fn rejects_out_of_range_dpi() {
        let config = ReportConfig {
            dpi: 5,
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReportConfig {
            thumbnail_width: 0,
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());

        assert!(ReportConfig::default().validate().is_ok());
    }
}
