use std::ops::Range;

use anyhow::Result;
use log::debug;
use plotters::coord::ranged1d::SegmentedCoord;
use plotters::coord::types::RangedCoordusize;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartKind, FigureContext};
use crate::metrics::ChartRecord;
use crate::tables::{q_value_bounds, Q_TEXT_CONTRAST, Q_VALUES};
use crate::visualization::{diverging_color, normalize};

const COLORBAR_STEPS: usize = 128;

/// One segment per cell. Integer ranges include their end value, so
/// `0..cells - 1` yields exactly `cells` segments.
fn cell_axis(cells: usize) -> SegmentedCoord<RangedCoordusize> {
    (0..cells - 1).into_segmented()
}

/// Row of the plot (counted from the bottom) that shows state `state`.
fn plot_row(state: usize, n_states: usize) -> usize {
    n_states - 1 - state
}

fn cell_text_color(value: f64) -> RGBColor {
    if value.abs() > Q_TEXT_CONTRAST {
        WHITE
    } else {
        BLACK
    }
}

pub fn q_value_heatmap(ctx: &FigureContext<'_>) -> Result<ChartRecord> {
    let (x, y) = draw_heatmap(ctx)?;
    debug!("value heatmap: cell grid spans x {:?}, y {:?}", x, y);
    Ok(ctx.record(ChartKind::QValueHeatmap))
}

/// Draws the chart and returns the pixel extent of the cell grid.
fn draw_heatmap(ctx: &FigureContext<'_>) -> Result<(Range<i32>, Range<i32>)> {
    let kind = ChartKind::QValueHeatmap;
    let labels = ctx.labels;
    let n_states = Q_VALUES.len();
    let n_actions = labels.actions.len();
    let (v_min, v_max) = q_value_bounds();

    let path = ctx.path(kind);
    let (width, _) = ctx.size(kind);
    let root = BitMapBackend::new(&path, ctx.size(kind)).into_drawing_area();
    root.fill(&WHITE)?;

    let colorbar_width = ctx.px(80.0);
    let (main, bar) = root.split_horizontally(width.saturating_sub(colorbar_width));

    let caption_size = ctx.px(14.0);
    let mut chart = ChartBuilder::on(&main)
        .caption(labels.heatmap_title, ctx.font(14.0))
        .margin(ctx.px(10.0))
        .x_label_area_size(ctx.px(34.0))
        .y_label_area_size(ctx.px(110.0))
        .build_cartesian_2d(cell_axis(n_actions), cell_axis(n_states))?;
    let grid = chart.plotting_area().get_pixel_range();

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n_actions)
        .y_labels(n_states)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(idx) if *idx < n_actions => labels.actions[*idx].to_string(),
            _ => String::new(),
        })
        .y_label_formatter(&|y| match y {
            SegmentValue::CenterOf(idx) if *idx < n_states => {
                labels.states[plot_row(*idx, n_states)].to_string()
            }
            _ => String::new(),
        })
        .x_desc(labels.heatmap_action_axis)
        .y_desc(labels.heatmap_state_axis)
        .axis_desc_style(ctx.font(12.0))
        .label_style(ctx.font(10.0))
        .draw()?;

    for (state, row) in Q_VALUES.iter().enumerate() {
        let y = plot_row(state, n_states);
        for (action, &value) in row.iter().enumerate() {
            let color = diverging_color(normalize(value, v_min, v_max));
            chart.draw_series(std::iter::once(Rectangle::new(
                [
                    (SegmentValue::Exact(action), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(action + 1), SegmentValue::Exact(y + 1)),
                ],
                color.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.1}", value),
                (SegmentValue::CenterOf(action), SegmentValue::CenterOf(y)),
                ctx.text(9.0, &cell_text_color(value))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )))?;
        }
    }

    // Colour bar, vertically aligned with the cell grid.
    let mut colorbar = ChartBuilder::on(&bar)
        .margin_top(ctx.px(10.0) + caption_size + ctx.px(8.0))
        .margin_bottom(ctx.px(10.0) + ctx.px(34.0))
        .margin_right(ctx.px(10.0))
        .right_y_label_area_size(ctx.px(50.0))
        .build_cartesian_2d(0f64..1f64, v_min..v_max)?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(labels.heatmap_value)
        .axis_desc_style(ctx.font(11.0))
        .label_style(ctx.font(9.0))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()?;

    let step = (v_max - v_min) / COLORBAR_STEPS as f64;
    colorbar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = v_min + step * i as f64;
        let color = diverging_color(normalize(lo + step / 2.0, v_min, v_max));
        Rectangle::new([(0.0, lo), (1.0, lo + step)], color.filled())
    }))?;

    root.present()?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_state_is_drawn_on_top() {
        assert_eq!(plot_row(0, 8), 7);
        assert_eq!(plot_row(7, 8), 0);
    }

    #[test]
    fn cells_span_the_whole_axis() {
        for cells in [5, 8] {
            let axis = cell_axis(cells);
            assert_eq!(axis.map(&SegmentValue::Exact(0), (0, 499)), 0);
            let end = axis.map(&SegmentValue::Exact(cells), (0, 499));
            assert!(499 - end <= 2, "{} cells end at {}", cells, end);
        }
    }

    #[test]
    fn grid_fills_plot_area() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = crate::charts::test_context(tmp.path());
        let (x, y) = draw_heatmap(&ctx).unwrap();
        let image = image::open(ctx.path(ChartKind::QValueHeatmap))
            .unwrap()
            .to_rgb8();

        let (lo, hi) = q_value_bounds();
        let expected = |value: f64| {
            let color = diverging_color(normalize(value, lo, hi));
            [color.0, color.1, color.2]
        };
        let last = Q_VALUES.len() - 1;
        let inset = 4;

        // First state sits in the top row, last action in the right column.
        let top_right = image.get_pixel((x.end - inset) as u32, (y.start + inset) as u32);
        assert_eq!(top_right.0, expected(Q_VALUES[0][4]));
        let bottom_left = image.get_pixel((x.start + inset) as u32, (y.end - inset) as u32);
        assert_eq!(bottom_left.0, expected(Q_VALUES[last][0]));
    }

    #[test]
    fn strong_values_get_light_text() {
        assert_eq!(cell_text_color(68.7), WHITE);
        assert_eq!(cell_text_color(-8.2), BLACK);
        assert_eq!(cell_text_color(30.0), BLACK);
    }
}
