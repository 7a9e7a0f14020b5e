use anyhow::Result;
use log::debug;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rand::rngs::StdRng;

use super::{bounds, ChartKind, FigureContext, DARK_GREEN, GRAY};
use crate::metrics::ChartRecord;
use crate::series::{
    self, COVERAGE_EPISODES, COVERAGE_MARKERS, COVERAGE_MAX_STATES, COVERAGE_RATE,
    EPSILON_DECAY, EPSILON_EPISODES, EPSILON_MARKERS, EPSILON_MIN, EPSILON_START,
    LEARNING_EPISODES, MOVING_AVERAGE_WINDOW,
};

/// Shaded training phases on the learning curve, in episodes.
const PHASE_BANDS: [(f64, f64); 3] = [(1.0, 20.0), (40.0, 60.0), (80.0, 100.0)];
/// Where the phase captions sit, in data coordinates.
const PHASE_CAPTIONS: [(f64, f64); 3] = [(10.0, -60.0), (50.0, 20.0), (90.0, 60.0)];

pub fn learning_curve(ctx: &FigureContext<'_>, rng: &mut StdRng) -> Result<ChartRecord> {
    let kind = ChartKind::LearningCurve;
    let labels = ctx.labels;

    let episodes = series::episodes(LEARNING_EPISODES);
    let rewards = series::learning_rewards(rng, LEARNING_EPISODES)?;
    let smoothed = series::moving_average(&rewards, MOVING_AVERAGE_WINDOW);
    let (lo, hi) = bounds(&rewards);
    debug!(
        "learning curve: rewards in [{:.1}, {:.1}], final moving average {:.1}",
        lo,
        hi,
        smoothed.last().copied().unwrap_or_default()
    );

    let y_min = lo.min(PHASE_CAPTIONS[0].1) - 10.0;
    let y_max = hi.max(PHASE_CAPTIONS[2].1) + 10.0;
    let x_max = LEARNING_EPISODES as f64 + 1.0;

    let path = ctx.path(kind);
    let root = BitMapBackend::new(&path, ctx.size(kind)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.learning_title, ctx.font(14.0))
        .margin(ctx.px(10.0))
        .x_label_area_size(ctx.px(30.0))
        .y_label_area_size(ctx.px(40.0))
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.1))
        .light_line_style(BLACK.mix(0.03))
        .x_desc(labels.episode_axis)
        .y_desc(labels.learning_reward_axis)
        .axis_desc_style(ctx.font(12.0))
        .label_style(ctx.font(10.0))
        .draw()?;

    for (&(start, end), color) in PHASE_BANDS.iter().zip([RED, YELLOW, GREEN]) {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(start, y_min), (end, y_max)],
            color.mix(0.1).filled(),
        )))?;
    }

    let dash = ctx.dash();
    chart.draw_series(dash.hline(0.0..x_max, 0.0, GRAY.mix(0.5).stroke_width(1)))?;

    chart
        .draw_series(LineSeries::new(
            episodes.iter().copied().zip(rewards.iter().copied()),
            BLUE.mix(0.3),
        ))?
        .label(labels.learning_per_episode)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + dash.sample, y)], BLUE.mix(0.3)));

    let thick = RED.stroke_width(ctx.px(2.0));
    chart
        .draw_series(LineSeries::new(
            episodes[MOVING_AVERAGE_WINDOW - 1..]
                .iter()
                .copied()
                .zip(smoothed.iter().copied()),
            thick,
        ))?
        .label(labels.moving_average(MOVING_AVERAGE_WINDOW))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + dash.sample, y)], thick));

    let caption_style = ctx
        .text(10.0, &BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(
        PHASE_CAPTIONS
            .iter()
            .zip(labels.learning_phases)
            .map(|(&coord, text)| Text::new(text, coord, caption_style.clone())),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(ctx.font(10.0))
        .draw()?;

    root.present()?;
    Ok(ctx.record(kind))
}

pub fn epsilon_decay(ctx: &FigureContext<'_>) -> Result<ChartRecord> {
    let kind = ChartKind::EpsilonDecay;
    let labels = ctx.labels;

    let episodes = series::episodes(EPSILON_EPISODES);
    let epsilon =
        series::epsilon_schedule(EPSILON_EPISODES, EPSILON_START, EPSILON_DECAY, EPSILON_MIN);
    let markers: Vec<(usize, f64)> = EPSILON_MARKERS
        .iter()
        .filter_map(|&ep| series::at_episode(&epsilon, ep).map(|eps| (ep, eps)))
        .collect();
    debug!("epsilon decay: markers {:?}", markers);

    let x_max = EPSILON_EPISODES as f64 + 5.0;
    let y_max = EPSILON_START * 1.07;

    let path = ctx.path(kind);
    let root = BitMapBackend::new(&path, ctx.size(kind)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.epsilon_title, ctx.font(14.0))
        .margin(ctx.px(10.0))
        .x_label_area_size(ctx.px(30.0))
        .y_label_area_size(ctx.px(45.0))
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.1))
        .light_line_style(BLACK.mix(0.03))
        .x_desc(labels.episode_axis)
        .y_desc(labels.epsilon_axis)
        .axis_desc_style(ctx.font(12.0))
        .label_style(ctx.font(10.0))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()?;

    chart.draw_series(LineSeries::new(
        episodes.iter().copied().zip(epsilon.iter().copied()),
        GREEN.stroke_width(ctx.px(2.0)),
    ))?;

    let dash = ctx.dash();
    let floor = RED.stroke_width(ctx.px(1.5));
    chart
        .draw_series(dash.hline(0.0..x_max, EPSILON_MIN, floor))?
        .label(labels.epsilon_floor(EPSILON_MIN))
        .legend(move |coord| dash.sample(coord, floor));

    chart.draw_series(
        markers
            .iter()
            .map(|&(ep, eps)| Circle::new((ep as f64, eps), ctx.px(3.5), BLUE.filled())),
    )?;

    // Annotation offsets mirror the report layout: +20 episodes right, a little above.
    let annotation_style = ctx.text(9.0, &BLACK).pos(Pos::new(HPos::Left, VPos::Bottom));
    let lifts = [0.03, 0.02];
    chart.draw_series(markers.iter().zip(lifts).map(|(&(ep, eps), lift)| {
        Text::new(
            labels.episode_marker(ep, eps),
            (ep as f64 + 20.0, eps + lift),
            annotation_style.clone(),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(ctx.font(10.0))
        .draw()?;

    root.present()?;
    Ok(ctx.record(kind))
}

pub fn state_coverage(ctx: &FigureContext<'_>) -> Result<ChartRecord> {
    let kind = ChartKind::StateCoverage;
    let labels = ctx.labels;

    let episodes = series::episodes(COVERAGE_EPISODES);
    let coverage = series::state_coverage(COVERAGE_EPISODES, COVERAGE_MAX_STATES, COVERAGE_RATE);
    let markers: Vec<(usize, f64)> = COVERAGE_MARKERS
        .iter()
        .filter_map(|&ep| series::at_episode(&coverage, ep).map(|c| (ep, c)))
        .collect();

    let x_max = COVERAGE_EPISODES as f64 + 12.0;
    let y_max = COVERAGE_MAX_STATES * 1.1;

    let path = ctx.path(kind);
    let root = BitMapBackend::new(&path, ctx.size(kind)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.coverage_title, ctx.font(14.0))
        .margin(ctx.px(10.0))
        .x_label_area_size(ctx.px(30.0))
        .y_label_area_size(ctx.px(40.0))
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.1))
        .light_line_style(BLACK.mix(0.03))
        .x_desc(labels.episode_axis)
        .y_desc(labels.coverage_axis)
        .axis_desc_style(ctx.font(12.0))
        .label_style(ctx.font(10.0))
        .draw()?;

    let dash = ctx.dash();
    let line = BLUE.stroke_width(ctx.px(2.0));
    chart
        .draw_series(LineSeries::new(
            episodes.iter().copied().zip(coverage.iter().copied()),
            line,
        ))?
        .label(labels.coverage_visited)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + dash.sample, y)], line));

    let ceiling = RED.stroke_width(ctx.px(1.5));
    chart
        .draw_series(dash.hline(0.0..x_max, COVERAGE_MAX_STATES, ceiling))?
        .label(labels.coverage_total(COVERAGE_MAX_STATES))
        .legend(move |coord| dash.sample(coord, ceiling));

    chart.draw_series(
        markers
            .iter()
            .map(|&(ep, c)| Circle::new((ep as f64, c), ctx.px(3.5), DARK_GREEN.filled())),
    )?;

    let annotation_style = ctx.text(9.0, &BLACK).pos(Pos::new(HPos::Left, VPos::Bottom));
    chart.draw_series(markers.iter().map(|&(ep, c)| {
        Text::new(
            format!("{:.1}%", series::coverage_percent(c, COVERAGE_MAX_STATES)),
            (ep as f64 + 5.0, c + 5.0),
            annotation_style.clone(),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(ctx.font(10.0))
        .draw()?;

    root.present()?;
    Ok(ctx.record(kind))
}
