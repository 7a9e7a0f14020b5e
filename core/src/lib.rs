pub mod charts;
pub mod config;
pub mod labels;
pub mod metrics;
pub mod render;
pub mod report;
pub mod rng;
pub mod series;
pub mod tables;
pub mod visualization;

pub use charts::ChartKind;
pub use config::{load_or_init, ReportConfig};
pub use labels::{Labels, Language};
pub use metrics::{read_manifest, write_manifest, ChartRecord, RenderSummary};
pub use render::{render_all, RenderOptions};
pub use report::{
    ensure_report_file, render_figures_section, update_sections, FigureEntry, ReportSection,
    DEFAULT_REPORT_TEMPLATE,
};
pub use rng::seeded_rng;
pub use visualization::png_thumbnail_data_url;
