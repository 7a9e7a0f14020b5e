//! PNG chart renderers built on plotters' bitmap backend.
//!
//! Sizes are given in inches and typographic points and scaled by the
//! configured dpi, so a chart keeps its proportions at any resolution.

mod bars;
mod curves;
mod heatmap;
mod pie;

use std::array;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use plotters::element::DashedPathElement;
use plotters::prelude::DashedLineSeries;
use plotters::style::{FontDesc, IntoFont, RGBColor, ShapeStyle, TextStyle};

use crate::labels::Labels;
use crate::metrics::ChartRecord;

pub use bars::{comparison_bar, fps_chart, mediapipe_latency};
pub use curves::{epsilon_decay, learning_curve, state_coverage};
pub use heatmap::q_value_heatmap;
pub use pie::{pie_wedges, reward_components, Wedge};

pub(crate) const GRAY: RGBColor = RGBColor(128, 128, 128);
pub(crate) const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub(crate) const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);

/// Dash and gap length of reference lines, in points.
const DASH: f64 = 6.0;
const DASH_GAP: f64 = 4.0;
/// Width of a line sample in the legend, in points.
const LEGEND_SAMPLE: f64 = 20.0;

/// Every chart the report uses, in render order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChartKind {
    LearningCurve,
    EpsilonDecay,
    QValueHeatmap,
    ComparisonBar,
    FpsChart,
    StateCoverage,
    RewardComponents,
    MediapipeLatency,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        Self::LearningCurve,
        Self::EpsilonDecay,
        Self::QValueHeatmap,
        Self::ComparisonBar,
        Self::FpsChart,
        Self::StateCoverage,
        Self::RewardComponents,
        Self::MediapipeLatency,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::LearningCurve => "learning_curve",
            Self::EpsilonDecay => "epsilon_decay",
            Self::QValueHeatmap => "q_value_heatmap",
            Self::ComparisonBar => "comparison_bar",
            Self::FpsChart => "fps_chart",
            Self::StateCoverage => "state_coverage",
            Self::RewardComponents => "reward_components",
            Self::MediapipeLatency => "mediapipe_latency",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.slug())
    }

    pub fn from_slug(value: &str) -> Result<Self> {
        let value = value.strip_suffix(".png").unwrap_or(value);
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == value)
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(|kind| kind.slug()).collect();
                anyhow!("unknown chart: {} (expected one of {})", value, valid.join(", "))
            })
    }

    /// Figure size in inches.
    pub fn figure_size(&self) -> (f64, f64) {
        match self {
            Self::LearningCurve | Self::ComparisonBar => (12.0, 6.0),
            Self::QValueHeatmap => (12.0, 8.0),
            Self::RewardComponents => (14.0, 5.0),
            Self::EpsilonDecay | Self::FpsChart | Self::StateCoverage | Self::MediapipeLatency => {
                (10.0, 5.0)
            }
        }
    }

    pub fn title(&self, labels: &Labels) -> &'static str {
        match self {
            Self::LearningCurve => labels.learning_title,
            Self::EpsilonDecay => labels.epsilon_title,
            Self::QValueHeatmap => labels.heatmap_title,
            Self::ComparisonBar => labels.comparison_title,
            Self::FpsChart => labels.fps_title,
            Self::StateCoverage => labels.coverage_title,
            Self::RewardComponents => labels.reward_pie_title,
            Self::MediapipeLatency => labels.latency_title,
        }
    }
}

/// Shared drawing parameters for one run.
pub struct FigureContext<'a> {
    pub output_dir: &'a Path,
    pub labels: &'static Labels,
    pub dpi: u32,
    pub font_family: &'a str,
}

impl<'a> FigureContext<'a> {
    pub fn path(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }

    pub fn size(&self, kind: ChartKind) -> (u32, u32) {
        let (w, h) = kind.figure_size();
        let dpi = self.dpi as f64;
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    /// Convert typographic points to pixels.
    pub fn px(&self, points: f64) -> u32 {
        (points * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }

    pub fn font(&self, points: f64) -> FontDesc<'_> {
        (self.font_family, self.px(points) as f64).into_font()
    }

    pub fn text(&self, points: f64, color: &RGBColor) -> TextStyle<'_> {
        self.font(points).color(color)
    }

    pub(crate) fn dash(&self) -> Dash {
        Dash {
            len: self.px(DASH),
            gap: self.px(DASH_GAP),
            sample: self.px(LEGEND_SAMPLE) as i32,
        }
    }

    pub fn record(&self, kind: ChartKind) -> ChartRecord {
        let (width, height) = self.size(kind);
        ChartRecord {
            slug: kind.slug().to_string(),
            file_name: kind.file_name(),
            title: kind.title(self.labels).to_string(),
            width,
            height,
        }
    }
}

/// Dash pattern in pixels, shared by a dashed line and its legend entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Dash {
    pub len: u32,
    pub gap: u32,
    pub sample: i32,
}

impl Dash {
    /// Horizontal dashed line at `y` spanning `x`.
    pub fn hline(
        self,
        x: Range<f64>,
        y: f64,
        style: ShapeStyle,
    ) -> DashedLineSeries<array::IntoIter<(f64, f64), 2>, u32> {
        DashedLineSeries::new([(x.start, y), (x.end, y)], self.len, self.gap, style)
    }

    /// Legend sample drawn with the same dashes and stroke as the line.
    pub fn sample(
        self,
        (x, y): (i32, i32),
        style: ShapeStyle,
    ) -> DashedPathElement<array::IntoIter<(i32, i32), 2>, u32> {
        DashedPathElement::new([(x, y), (x + self.sample, y)], self.len, self.gap, style)
    }
}

/// Category name for a tick that lands on an integer position.
pub(crate) fn category_label<S: AsRef<str>>(categories: &[S], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .map(|name| name.as_ref().to_string())
        .unwrap_or_default()
}

/// Scratch context for rendering tests: English labels at a low dpi.
#[cfg(test)]
pub(crate) fn test_context(output_dir: &Path) -> FigureContext<'_> {
    FigureContext {
        output_dir,
        labels: crate::labels::Language::English.labels(),
        dpi: 40,
        font_family: "sans-serif",
    }
}

/// Smallest and largest value of a non-empty slice.
pub(crate) fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Language;

    #[test]
    fn slugs_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_slug(kind.slug()).unwrap(), kind);
            assert_eq!(ChartKind::from_slug(&kind.file_name()).unwrap(), kind);
        }
        let err = ChartKind::from_slug("pie").unwrap_err();
        assert!(err.to_string().contains("learning_curve"));
    }

    #[test]
    fn file_names_are_unique() {
        let mut names: Vec<_> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn pixel_size_follows_dpi() {
        let ctx = FigureContext {
            output_dir: Path::new("."),
            labels: Language::English.labels(),
            dpi: 150,
            font_family: "sans-serif",
        };
        assert_eq!(ctx.size(ChartKind::LearningCurve), (1800, 900));
        assert_eq!(ctx.size(ChartKind::RewardComponents), (2100, 750));
        assert_eq!(ctx.px(72.0), 150);
    }

    #[test]
    fn dashes_scale_with_dpi() {
        let ctx = FigureContext {
            output_dir: Path::new("."),
            labels: Language::English.labels(),
            dpi: 144,
            font_family: "sans-serif",
        };
        let dash = ctx.dash();
        assert_eq!((dash.len, dash.gap, dash.sample), (12, 8, 40));
    }

    #[test]
    fn category_labels_only_on_integers() {
        let names = ["a", "b"];
        assert_eq!(category_label(&names, 1.0), "b");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }
}
