//! Renders the illustrative figures for the Q-learning enemy AI report.
//!
//! ```bash
//! cargo run -p reportfig-qlearning-report -- [--out DIR] [--lang zh|en] [--only SLUG]...
//! ```

use std::{
    fmt::Write,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use reportfig_core::{
    ensure_report_file, load_or_init, png_thumbnail_data_url, render_all, render_figures_section,
    update_sections, write_manifest, ChartKind, FigureEntry, Language, RenderOptions,
    RenderSummary, ReportConfig, ReportSection, DEFAULT_REPORT_TEMPLATE,
};

/// Render the report figures (learning curves, heatmap, bar comparisons) as PNG files.
#[derive(Parser, Debug)]
#[command(name = "qlearning-report")]
#[command(version)]
#[command(about = "Render the Q-learning report figures", long_about = None)]
struct Cli {
    /// Output directory (defaults to the experiment's figures/ directory)
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Config file (created with defaults when missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Label language, overriding the config
    #[arg(long, value_parser = Language::from_code)]
    lang: Option<Language>,

    /// Render only this chart (repeatable), e.g. --only learning_curve
    #[arg(long, value_parser = ChartKind::from_slug)]
    only: Vec<ChartKind>,

    /// Seed for the synthetic learning-curve noise, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Skip writing report.md
    #[arg(long)]
    no_report: bool,
}

struct ExperimentPaths {
    config: PathBuf,
    figures: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let paths = initialize_paths()?;

    let config_path = cli.config.clone().unwrap_or(paths.config);
    let mut config: ReportConfig = load_or_init(&config_path, ReportConfig::default)?;
    if let Some(language) = cli.lang {
        config.language = language;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config
        .validate()
        .with_context(|| format!("invalid config {}", config_path.display()))?;

    let output_dir = cli.out.clone().unwrap_or(paths.figures);
    let mut options = RenderOptions::from_config(&config, output_dir);
    options.selection = cli.only.clone();

    println!("output directory: {}", options.output_dir.display());
    println!("{}", "-".repeat(50));

    let summary = render_all(&options)?;

    let manifest = summary.output_dir.join("manifest.json");
    write_manifest(&manifest, &summary)?;
    info!("wrote {}", manifest.display());

    if !cli.no_report {
        let report = summary.output_dir.join("report.md");
        write_report(&report, &config, &summary)?;
        info!("wrote {}", report.display());
    }

    println!("{}", "-".repeat(50));
    println!(
        "rendered {} chart(s) into {}",
        summary.charts.len(),
        summary.output_dir.display()
    );
    if config.language == Language::Chinese {
        println!(
            "check that Chinese labels render correctly; set font_family in {} if they show as boxes.",
            config_path.display()
        );
    }

    Ok(())
}

fn initialize_paths() -> Result<ExperimentPaths> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create experiment directory {}", dir.display()))?;

    Ok(ExperimentPaths {
        config: dir.join("config.json"),
        figures: dir.join("figures"),
    })
}

fn write_report(report_path: &Path, config: &ReportConfig, summary: &RenderSummary) -> Result<()> {
    ensure_report_file(report_path, DEFAULT_REPORT_TEMPLATE)?;

    let mut figures = Vec::with_capacity(summary.charts.len());
    for record in &summary.charts {
        let thumbnail =
            match png_thumbnail_data_url(&summary.chart_path(record), config.thumbnail_width) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!("no thumbnail for {}: {:#}", record.file_name, err);
                    None
                }
            };
        figures.push(FigureEntry {
            title: &record.title,
            file_name: &record.file_name,
            thumbnail,
        });
    }

    let sections = [
        ReportSection::new("configuration", render_configuration_section(config, summary)),
        ReportSection::new("figures", render_figures_section(&figures)),
    ];
    update_sections(report_path, &sections)
}

fn render_configuration_section(config: &ReportConfig, summary: &RenderSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(
        &mut output,
        "- Seed: {}\n- Language: {}\n- DPI: {}\n- Font family: {}\n- Charts rendered: {}",
        config.seed,
        config.language.code(),
        config.dpi,
        config.font_family,
        summary.charts.len()
    );
    output
}
