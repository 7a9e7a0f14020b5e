use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::charts::{self, ChartKind, FigureContext};
use crate::config::ReportConfig;
use crate::labels::Language;
use crate::metrics::{ChartRecord, RenderSummary};
use crate::rng::seeded_rng;

/// Everything one render pass needs.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub output_dir: PathBuf,
    pub seed: u64,
    pub language: Language,
    pub dpi: u32,
    pub font_family: String,
    /// Charts to render; empty means all of them.
    pub selection: Vec<ChartKind>,
}

impl RenderOptions {
    pub fn from_config(config: &ReportConfig, output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            seed: config.seed,
            language: config.language,
            dpi: config.dpi,
            font_family: config.font_family.clone(),
            selection: Vec::new(),
        }
    }

    /// Selected charts in render order, without duplicates.
    pub fn charts(&self) -> Vec<ChartKind> {
        ChartKind::ALL
            .into_iter()
            .filter(|kind| self.selection.is_empty() || self.selection.contains(kind))
            .collect()
    }
}

/// Render the selected charts one after another into the output directory.
pub fn render_all(options: &RenderOptions) -> Result<RenderSummary> {
    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    let ctx = FigureContext {
        output_dir: &options.output_dir,
        labels: options.language.labels(),
        dpi: options.dpi,
        font_family: &options.font_family,
    };
    let mut rng = seeded_rng(options.seed);

    let mut records = Vec::new();
    for kind in options.charts() {
        let record = render_chart(&ctx, kind, &mut rng)
            .with_context(|| format!("failed to render {}", kind.file_name()))?;
        info!(
            "wrote {} ({}x{})",
            ctx.path(kind).display(),
            record.width,
            record.height
        );
        records.push(record);
    }

    Ok(RenderSummary {
        output_dir: options.output_dir.clone(),
        charts: records,
    })
}

fn render_chart(
    ctx: &FigureContext<'_>,
    kind: ChartKind,
    rng: &mut rand::rngs::StdRng,
) -> Result<ChartRecord> {
    match kind {
        ChartKind::LearningCurve => charts::learning_curve(ctx, rng),
        ChartKind::EpsilonDecay => charts::epsilon_decay(ctx),
        ChartKind::QValueHeatmap => charts::q_value_heatmap(ctx),
        ChartKind::ComparisonBar => charts::comparison_bar(ctx),
        ChartKind::FpsChart => charts::fps_chart(ctx),
        ChartKind::StateCoverage => charts::state_coverage(ctx),
        ChartKind::RewardComponents => charts::reward_components(ctx),
        ChartKind::MediapipeLatency => charts::mediapipe_latency(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_keeps_render_order() {
        let mut options = RenderOptions::from_config(&ReportConfig::default(), PathBuf::from("out"));
        assert_eq!(options.charts(), ChartKind::ALL.to_vec());

        options.selection = vec![
            ChartKind::MediapipeLatency,
            ChartKind::LearningCurve,
            ChartKind::LearningCurve,
        ];
        assert_eq!(
            options.charts(),
            vec![ChartKind::LearningCurve, ChartKind::MediapipeLatency]
        );
    }
}
