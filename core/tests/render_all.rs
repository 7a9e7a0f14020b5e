use std::{collections::BTreeSet, fs};

use reportfig_core::{
    read_manifest, render_all, write_manifest, ChartKind, Language, RenderOptions, ReportConfig,
};
use tempfile::TempDir;

fn small_options(tmp: &TempDir) -> RenderOptions {
    let config = ReportConfig {
        language: Language::English,
        dpi: 40,
        ..ReportConfig::default()
    };
    RenderOptions::from_config(&config, tmp.path().join("figures"))
}

fn png_files(dir: &std::path::Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect()
}

#[test]
fn renders_exactly_the_eight_charts() {
    let tmp = TempDir::new().unwrap();
    let options = small_options(&tmp);

    let summary = render_all(&options).unwrap();

    let expected: BTreeSet<String> = [
        "learning_curve.png",
        "epsilon_decay.png",
        "q_value_heatmap.png",
        "comparison_bar.png",
        "fps_chart.png",
        "state_coverage.png",
        "reward_components.png",
        "mediapipe_latency.png",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(png_files(&options.output_dir), expected);
    assert_eq!(summary.charts.len(), 8);

    for record in &summary.charts {
        let (w, h) = image::image_dimensions(summary.chart_path(record)).unwrap();
        assert_eq!((w, h), (record.width, record.height), "{}", record.file_name);
    }

    let heatmap = summary
        .charts
        .iter()
        .find(|r| r.slug == "q_value_heatmap")
        .unwrap();
    assert_eq!((heatmap.width, heatmap.height), (480, 320));
}

#[test]
fn selection_renders_only_requested_charts() {
    let tmp = TempDir::new().unwrap();
    let mut options = small_options(&tmp);
    options.selection = vec![ChartKind::RewardComponents, ChartKind::EpsilonDecay];

    let summary = render_all(&options).unwrap();

    let slugs: Vec<_> = summary.charts.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(slugs, ["epsilon_decay", "reward_components"]);
    assert_eq!(png_files(&options.output_dir).len(), 2);
}

#[test]
fn manifest_lists_rendered_charts() {
    let tmp = TempDir::new().unwrap();
    let mut options = small_options(&tmp);
    options.selection = vec![ChartKind::FpsChart];

    let summary = render_all(&options).unwrap();
    let manifest = options.output_dir.join("manifest.json");
    write_manifest(&manifest, &summary).unwrap();

    let records = read_manifest(&manifest).unwrap();
    assert_eq!(records, summary.charts);
    assert_eq!(records[0].title, "Frame rate under load");
}

#[test]
fn failures_name_the_chart_file() {
    let tmp = TempDir::new().unwrap();
    let mut options = small_options(&tmp);
    options.selection = vec![ChartKind::LearningCurve];
    // A directory where the PNG should go makes the final write fail.
    fs::create_dir_all(options.output_dir.join("learning_curve.png")).unwrap();

    let err = render_all(&options).unwrap_err();

    assert!(
        format!("{:#}", err).contains("failed to render learning_curve.png"),
        "{:#}",
        err
    );
}

#[test]
fn output_directory_errors_name_the_path() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("figures");
    fs::write(&blocker, b"not a directory").unwrap();

    let err = render_all(&small_options(&tmp)).unwrap_err();

    assert!(err.to_string().contains("failed to create output directory"));
    assert!(err.to_string().contains(&blocker.display().to_string()));
}
