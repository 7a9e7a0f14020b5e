use std::ops::Range;

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

use super::{bounds, category_label, ChartKind, FigureContext, DARK_GREEN, ORANGE};
use crate::metrics::ChartRecord;
use crate::tables::*;
use crate::visualization::parse_hex_color;

struct BarSeries<'s> {
    label: &'s str,
    values: &'s [f64],
    color: RGBColor,
}

struct ReferenceLine {
    y: f64,
    label: String,
    color: RGBAColor,
}

/// Two bar series side by side per category, optionally with dashed
/// reference lines, value labels above each bar and a note per group.
struct GroupedBars<'s> {
    kind: ChartKind,
    title: &'s str,
    x_desc: &'s str,
    y_desc: &'s str,
    categories: Vec<String>,
    series: [BarSeries<'s>; 2],
    references: Vec<ReferenceLine>,
    y_range: Range<f64>,
    value_label: Option<fn(f64) -> String>,
    legend: SeriesLabelPosition,
    notes: &'s [&'s str],
}

pub fn comparison_bar(ctx: &FigureContext<'_>) -> Result<ChartRecord> {
    let labels = ctx.labels;
    let all: Vec<f64> = RANDOM_AI.iter().chain(QLEARNING_AI.iter()).copied().collect();
    let (lo, hi) = bounds(&all);

    draw_grouped_bars(
        ctx,
        GroupedBars {
            kind: ChartKind::ComparisonBar,
            title: labels.comparison_title,
            x_desc: labels.comparison_metric_axis,
            y_desc: labels.comparison_value_axis,
            categories: labels.comparison_metrics.iter().map(|s| s.to_string()).collect(),
            series: [
                BarSeries {
                    label: labels.comparison_random,
                    values: &RANDOM_AI,
                    color: parse_hex_color(RANDOM_AI_COLOR)?,
                },
                BarSeries {
                    label: labels.comparison_qlearning,
                    values: &QLEARNING_AI,
                    color: parse_hex_color(QLEARNING_AI_COLOR)?,
                },
            ],
            references: Vec::new(),
            y_range: (lo.min(0.0) * 1.15)..(hi * 1.15 + 10.0),
            value_label: Some(plain_value),
            legend: SeriesLabelPosition::UpperRight,
            notes: &labels.comparison_improvements,
        },
    )
}

pub fn fps_chart(ctx: &FigureContext<'_>) -> Result<ChartRecord> {
    let labels = ctx.labels;

    draw_grouped_bars(
        ctx,
        GroupedBars {
            kind: ChartKind::FpsChart,
            title: labels.fps_title,
            x_desc: labels.fps_enemy_axis,
            y_desc: labels.fps_axis,
            categories: ENEMY_COUNTS.iter().map(|n| n.to_string()).collect(),
            series: [
                BarSeries {
                    label: labels.fps_average,
                    values: &AVG_FPS,
                    color: parse_hex_color(AVG_FPS_COLOR)?,
                },
                BarSeries {
                    label: labels.fps_minimum,
                    values: &MIN_FPS,
                    color: parse_hex_color(MIN_FPS_COLOR)?,
                },
            ],
            references: vec![
                ReferenceLine {
                    y: FPS_SMOOTH,
                    label: labels.fps_smooth.to_string(),
                    color: ORANGE.to_rgba(),
                },
                ReferenceLine {
                    y: FPS_TARGET,
                    label: labels.fps_target.to_string(),
                    color: DARK_GREEN.mix(0.5),
                },
            ],
            y_range: 0.0..FPS_Y_MAX,
            value_label: None,
            legend: SeriesLabelPosition::UpperRight,
            notes: &[],
        },
    )
}

pub fn mediapipe_latency(ctx: &FigureContext<'_>) -> Result<ChartRecord> {
    let labels = ctx.labels;

    draw_grouped_bars(
        ctx,
        GroupedBars {
            kind: ChartKind::MediapipeLatency,
            title: labels.latency_title,
            x_desc: labels.latency_stage_axis,
            y_desc: labels.latency_axis,
            categories: labels.latency_stages.iter().map(|s| s.to_string()).collect(),
            series: [
                BarSeries {
                    label: labels.latency_average,
                    values: &AVG_LATENCY_MS,
                    color: parse_hex_color(AVG_LATENCY_COLOR)?,
                },
                BarSeries {
                    label: labels.latency_p95,
                    values: &P95_LATENCY_MS,
                    color: parse_hex_color(P95_LATENCY_COLOR)?,
                },
            ],
            references: vec![ReferenceLine {
                y: LATENCY_INTERACTIVE_MS,
                label: labels.latency_threshold.to_string(),
                color: ORANGE.mix(0.7),
            }],
            y_range: 0.0..LATENCY_Y_MAX,
            value_label: Some(millis),
            legend: SeriesLabelPosition::UpperLeft,
            notes: &[],
        },
    )
}

fn plain_value(v: f64) -> String {
    format!("{}", v)
}

fn millis(v: f64) -> String {
    format!("{}ms", v)
}

/// Horizontal centre of bar `series_idx` within category `category`.
fn bar_center(category: usize, series_idx: usize) -> f64 {
    let offset = if series_idx == 0 { -BAR_WIDTH / 2.0 } else { BAR_WIDTH / 2.0 };
    category as f64 + offset
}

fn draw_grouped_bars(ctx: &FigureContext<'_>, layout: GroupedBars<'_>) -> Result<ChartRecord> {
    let n = layout.categories.len();
    let x_range = -0.6..(n as f64 - 0.4);
    let y_range = layout.y_range.clone();

    let path = ctx.path(layout.kind);
    let root = BitMapBackend::new(&path, ctx.size(layout.kind)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(layout.title, ctx.font(14.0))
        .margin(ctx.px(10.0))
        .x_label_area_size(ctx.px(34.0))
        .y_label_area_size(ctx.px(40.0))
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    let categories = &layout.categories;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.1))
        .light_line_style(BLACK.mix(0.03))
        .x_labels(n)
        .x_label_formatter(&|x| category_label(categories.as_slice(), *x))
        .x_desc(layout.x_desc)
        .y_desc(layout.y_desc)
        .axis_desc_style(ctx.font(12.0))
        .label_style(ctx.font(10.0))
        .draw()?;

    for (series_idx, series) in layout.series.iter().enumerate() {
        let color = series.color;
        chart
            .draw_series(series.values.iter().enumerate().map(|(i, &v)| {
                let center = bar_center(i, series_idx);
                Rectangle::new(
                    [(center - BAR_WIDTH / 2.0, 0.0), (center + BAR_WIDTH / 2.0, v)],
                    color.filled(),
                )
            }))?
            .label(series.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    if y_range.start < 0.0 {
        chart.draw_series(LineSeries::new(
            [(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.stroke_width(1),
        ))?;
    }

    let dash = ctx.dash();
    for reference in &layout.references {
        let style = reference.color.stroke_width(ctx.px(1.5));
        chart
            .draw_series(dash.hline(x_range.clone(), reference.y, style))?
            .label(reference.label.as_str())
            .legend(move |coord| dash.sample(coord, style));
    }

    if let Some(format_value) = layout.value_label {
        let gap = ctx.px(3.0) as i32;
        for (series_idx, series) in layout.series.iter().enumerate() {
            chart.draw_series(series.values.iter().enumerate().map(|(i, &v)| {
                let (dy, anchor) = if v >= 0.0 {
                    (-gap, VPos::Bottom)
                } else {
                    (gap, VPos::Top)
                };
                EmptyElement::at((bar_center(i, series_idx), v))
                    + Text::new(
                        format_value(v),
                        (0, dy),
                        ctx.text(9.0, &BLACK).pos(Pos::new(HPos::Center, anchor)),
                    )
            }))?;
        }
    }

    if !layout.notes.is_empty() {
        let note_style = ctx
            .font(9.0)
            .style(FontStyle::Bold)
            .color(&DARK_GREEN)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        let (first, second) = (&layout.series[0], &layout.series[1]);
        chart.draw_series(layout.notes.iter().enumerate().filter_map(|(i, &note)| {
            let a = first.values.get(i)?;
            let b = second.values.get(i)?;
            Some(Text::new(
                note.to_string(),
                (i as f64 + BAR_WIDTH / 2.0 + 0.1, a.max(*b) + 5.0),
                note_style.clone(),
            ))
        }))?;
    }

    chart
        .configure_series_labels()
        .position(layout.legend)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(ctx.font(9.0))
        .draw()?;

    root.present()?;
    Ok(ctx.record(layout.kind))
}
