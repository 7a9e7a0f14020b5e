use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One rendered chart as listed in `manifest.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub slug: String,
    pub file_name: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderSummary {
    pub output_dir: PathBuf,
    pub charts: Vec<ChartRecord>,
}

impl RenderSummary {
    pub fn chart_path(&self, record: &ChartRecord) -> PathBuf {
        self.output_dir.join(&record.file_name)
    }
}

pub fn write_manifest(path: &Path, summary: &RenderSummary) -> Result<()> {
    let serialized = serde_json::to_string_pretty(&summary.charts)?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Vec<ChartRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest at {}", path.display()))
}
