use std::ops::Range;

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

use super::{bounds, category_label, ChartKind, FigureContext};
use crate::metrics::ChartRecord;
use crate::tables::{
    shares, EVENT_COLORS, EVENT_REWARDS, REWARD_COLORS, REWARD_EXPLODED, REWARD_EXPLODE_OFFSET,
    REWARD_START_ANGLE, REWARD_WEIGHTS,
};
use crate::visualization::parse_hex_color;

/// One pie slice. Angles are in degrees, counter-clockwise from the
/// positive x axis; `offset` is the explode distance as a fraction of the radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
    pub percent: f64,
    pub offset: f64,
}

impl Wedge {
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Lay out slices counter-clockwise from `start_angle`.
pub fn pie_wedges(weights: &[f64], start_angle: f64, exploded: usize, explode: f64) -> Vec<Wedge> {
    let mut angle = start_angle;
    shares(weights)
        .into_iter()
        .enumerate()
        .map(|(i, percent)| {
            let sweep = percent / 100.0 * 360.0;
            let wedge = Wedge {
                start: angle,
                end: angle + sweep,
                percent,
                offset: if i == exploded { explode } else { 0.0 },
            };
            angle += sweep;
            wedge
        })
        .collect()
}

/// Pixel position at `angle` degrees and `distance` pixels from `center`.
/// Screen y grows downwards, so the sine is subtracted.
fn polar(center: (f64, f64), angle: f64, distance: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (center.0 + distance * rad.cos(), center.1 - distance * rad.sin())
}

fn wedge_polygon(center: (f64, f64), radius: f64, wedge: &Wedge) -> Vec<(i32, i32)> {
    let origin = polar(center, wedge.mid(), wedge.offset * radius);
    let steps = ((wedge.end - wedge.start).abs().ceil() as usize).max(2);

    let mut points = Vec::with_capacity(steps + 2);
    points.push((origin.0.round() as i32, origin.1.round() as i32));
    for k in 0..=steps {
        let angle = wedge.start + (wedge.end - wedge.start) * k as f64 / steps as f64;
        let (x, y) = polar(origin, angle, radius);
        points.push((x.round() as i32, y.round() as i32));
    }
    points
}

/// Event rewards always show their sign.
fn signed_label(value: f64) -> String {
    format!("{:+}", value)
}

/// Value range for the event bars, with headroom above and below
/// the bars for their labels.
fn event_range(values: &[f64]) -> Range<f64> {
    let (lo, hi) = bounds(values);
    let (lo, hi) = (lo.min(0.0), hi.max(0.0));
    let pad = (hi - lo) * 0.2;
    (lo - pad)..(hi + pad)
}

pub fn reward_components(ctx: &FigureContext<'_>) -> Result<ChartRecord> {
    let kind = ChartKind::RewardComponents;
    let labels = ctx.labels;

    let path = ctx.path(kind);
    let (width, _) = ctx.size(kind);
    let root = BitMapBackend::new(&path, ctx.size(kind)).into_drawing_area();
    root.fill(&WHITE)?;

    let (left, right) = root.split_horizontally(width / 2);

    // Left panel: composition pie.
    let pie_area = left.titled(labels.reward_pie_title, ctx.font(14.0))?;
    let (pw, ph) = pie_area.dim_in_pixel();
    let center = (pw as f64 / 2.0, ph as f64 / 2.0);
    let radius = pw.min(ph) as f64 * 0.32;
    let shadow_shift = radius * 0.03;

    let colors = REWARD_COLORS
        .iter()
        .map(|c| parse_hex_color(c))
        .collect::<Result<Vec<_>>>()?;
    let wedges = pie_wedges(
        &REWARD_WEIGHTS,
        REWARD_START_ANGLE,
        REWARD_EXPLODED,
        REWARD_EXPLODE_OFFSET,
    );

    for wedge in &wedges {
        let shadow_center = (center.0 + shadow_shift, center.1 + shadow_shift);
        pie_area.draw(&Polygon::new(
            wedge_polygon(shadow_center, radius, wedge),
            BLACK.mix(0.25).filled(),
        ))?;
    }

    let name_size = 10.0;
    for ((wedge, color), (name, note)) in wedges.iter().zip(&colors).zip(labels.reward_parts) {
        pie_area.draw(&Polygon::new(
            wedge_polygon(center, radius, wedge),
            color.filled(),
        ))?;

        let origin = polar(center, wedge.mid(), wedge.offset * radius);
        let (px, py) = polar(origin, wedge.mid(), radius * 0.6);
        pie_area.draw(&Text::new(
            format!("{:.1}%", wedge.percent),
            (px.round() as i32, py.round() as i32),
            ctx.text(10.0, &BLACK).pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        let (lx, ly) = polar(origin, wedge.mid(), radius * 1.15);
        let cos = wedge.mid().to_radians().cos();
        let h = if cos > 0.1 {
            HPos::Left
        } else if cos < -0.1 {
            HPos::Right
        } else {
            HPos::Center
        };
        let anchor = (lx.round() as i32, ly.round() as i32);
        pie_area.draw(&Text::new(
            name,
            anchor,
            ctx.text(name_size, &BLACK).pos(Pos::new(h, VPos::Bottom)),
        ))?;
        pie_area.draw(&Text::new(
            note,
            anchor,
            ctx.text(name_size, &BLACK).pos(Pos::new(h, VPos::Top)),
        ))?;
    }

    // Right panel: reward per event.
    let event_colors = EVENT_COLORS
        .iter()
        .map(|c| parse_hex_color(c))
        .collect::<Result<Vec<_>>>()?;
    let n = EVENT_REWARDS.len();
    let x_range = -0.6..(n as f64 - 0.4);
    let y_range = event_range(&EVENT_REWARDS);

    let mut chart = ChartBuilder::on(&right)
        .caption(labels.reward_events_title, ctx.font(14.0))
        .margin(ctx.px(10.0))
        .x_label_area_size(ctx.px(30.0))
        .y_label_area_size(ctx.px(40.0))
        .build_cartesian_2d(x_range.clone(), y_range)?;

    let events = labels.reward_events;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.1))
        .light_line_style(BLACK.mix(0.03))
        .x_labels(n)
        .x_label_formatter(&|x| category_label(&events[..], *x))
        .y_desc(labels.reward_axis)
        .axis_desc_style(ctx.font(12.0))
        .label_style(ctx.font(10.0))
        .draw()?;

    chart.draw_series(
        EVENT_REWARDS
            .iter()
            .zip(&event_colors)
            .enumerate()
            .map(|(i, (&v, color))| {
                let x = i as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v)], color.filled())
            }),
    )?;

    chart.draw_series(LineSeries::new(
        [(x_range.start, 0.0), (x_range.end, 0.0)],
        BLACK.stroke_width(1),
    ))?;

    let gap = ctx.px(3.0) as i32;
    chart.draw_series(EVENT_REWARDS.iter().enumerate().map(|(i, &v)| {
        let (dy, anchor) = if v > 0.0 {
            (-gap, VPos::Bottom)
        } else {
            (gap, VPos::Top)
        };
        EmptyElement::at((i as f64, v))
            + Text::new(
                signed_label(v),
                (0, dy),
                ctx.font(11.0)
                    .style(FontStyle::Bold)
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, anchor)),
            )
    }))?;

    root.present()?;
    Ok(ctx.record(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedges_cover_full_circle() {
        let wedges = pie_wedges(&REWARD_WEIGHTS, 90.0, 0, 0.1);
        assert_eq!(wedges.len(), 5);
        assert_eq!(wedges[0].start, 90.0);
        assert!((wedges[4].end - 450.0).abs() < 1e-9);
        for pair in wedges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(wedges[0].offset, 0.1);
        assert!(wedges[1..].iter().all(|w| w.offset == 0.0));
    }

    #[test]
    fn event_labels_carry_sign() {
        let labels: Vec<_> = EVENT_REWARDS.iter().map(|&v| signed_label(v)).collect();
        assert_eq!(labels, ["+100", "-20", "-50"]);
    }

    #[test]
    fn event_range_leaves_room_for_labels() {
        let range = event_range(&EVENT_REWARDS);
        assert!((range.start - -80.0).abs() < 1e-9);
        assert!((range.end - 130.0).abs() < 1e-9);

        let positive = event_range(&[10.0, 20.0]);
        assert!(positive.start < 0.0);
    }

    #[test]
    fn polar_uses_screen_orientation() {
        let (x, y) = polar((100.0, 100.0), 90.0, 10.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn exploded_wedge_moves_away_from_center() {
        let wedge = Wedge {
            start: 0.0,
            end: 90.0,
            percent: 25.0,
            offset: 0.1,
        };
        let points = wedge_polygon((0.0, 0.0), 100.0, &wedge);
        // Apex sits 10px out along 45 degrees.
        assert_eq!(points[0], (7, -7));
        assert_eq!(points.len(), 90 + 2);
    }
}
