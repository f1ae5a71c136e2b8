//! Duration vs. character count chart with a quadratic trend and a marked maximum.

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;

use super::figure::{Figure, Scale};
use crate::analyzer::{Extremum, QuadraticFit, TabularRecord};
use crate::error::BenchError;

/// Figure size in inches.
pub const FIGURE_SIZE: (f64, f64) = (12.0, 8.0);

/// Number of points the trend curve is sampled at.
pub const TREND_SAMPLES: usize = 200;

/// Dash pattern of the trend curve, in sample segments drawn and skipped.
const DASH_ON: usize = 3;
const DASH_OFF: usize = 2;

/// Render the annotated trend chart.
///
/// `records` must already be in ascending `character_count` order so the raw
/// line does not cross itself; `maximum` is the point the annotation targets.
pub fn render_trend_chart(
    records: &[TabularRecord],
    fit: &QuadraticFit,
    maximum: Extremum,
    dpi: u32,
) -> Result<Figure, BenchError> {
    if records.is_empty() {
        return Err(BenchError::EmptyAggregate("trend chart"));
    }
    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.character_count as f64, r.duration_seconds))
        .collect();
    let trend = fit.sample(TREND_SAMPLES);
    let (x_range, y_range) = trend_ranges(&points, &trend);

    let mut figure = Figure::new(FIGURE_SIZE.0, FIGURE_SIZE.1, dpi);
    let scale = figure.scale();
    let swatch = legend_swatch(scale);
    {
        let root = figure.drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Benchmark Results: Duration vs Number of Characters",
                ("sans-serif", scale.px(14.0), FontStyle::Bold),
            )
            .margin(scale.px(10.0))
            .x_label_area_size(scale.px(36.0))
            .y_label_area_size(scale.px(64.0))
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Number of Characters")
            .y_desc("Duration (seconds)")
            .y_label_formatter(&|v| format!("{:.2e}", v))
            .label_style(("sans-serif", scale.px(9.0)))
            .axis_desc_style(("sans-serif", scale.px(12.0)))
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        let line_style = BLUE.mix(0.7).stroke_width(scale.px(2.0));
        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label("Duration")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + swatch.len, y)], line_style));

        let dot = scale.px(2.2);
        chart.draw_series(points.iter().map(|&p| Circle::new(p, dot, RED.mix(0.6).filled())))?;

        let trend_style = GREEN.mix(0.8).stroke_width(scale.px(1.0));
        chart
            .draw_series(
                dash_segments(&trend, DASH_ON, DASH_OFF)
                    .into_iter()
                    .map(|dash| PathElement::new(dash, trend_style)),
            )?
            .label("Trend")
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (swatch.dash, 0)], trend_style)
                    + PathElement::new(vec![(swatch.len - swatch.dash, 0), (swatch.len, 0)], trend_style)
            });

        draw_max_annotation(&mut chart, maximum, scale)?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", scale.px(10.0)))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()?;

        root.present()?;
    }
    Ok(figure)
}

/// Pixel lengths of a legend sample line and of one trend dash within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LegendSwatch {
    len: i32,
    dash: i32,
}

fn legend_swatch(scale: Scale) -> LegendSwatch {
    let len = scale.offset(20.0).max(3);
    LegendSwatch {
        len,
        dash: (len * 7 / 20).max(1),
    }
}

/// Arrow from a fixed up-left nudge down to the maximum point, with its label.
fn draw_max_annotation<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    maximum: Extremum,
    scale: Scale,
) -> Result<(), BenchError> {
    let label = annotation_label(maximum);
    let tail = (scale.offset(-40.0), scale.offset(-30.0));
    let [shaft, head_a, head_b] = arrow_paths(tail, scale.offset(6.0));
    let arrow_style = RED.mix(0.7).stroke_width(scale.px(1.0));
    let font = ("sans-serif", scale.px(10.0)).into_font().color(&BLACK);
    let text_pos = (tail.0 - scale.offset(60.0), tail.1 - scale.offset(14.0));

    chart.draw_series(std::iter::once(
        EmptyElement::at((maximum.x, maximum.y))
            + PathElement::new(shaft, arrow_style)
            + PathElement::new(head_a, arrow_style)
            + PathElement::new(head_b, arrow_style)
            + Text::new(label, text_pos, font),
    ))?;
    Ok(())
}

/// `Max: 0.009500s at 100 chars`
pub fn annotation_label(maximum: Extremum) -> String {
    format!("Max: {:.6}s at {} chars", maximum.y, maximum.x)
}

/// Shaft from `tail` to the origin plus two head strokes at the origin.
///
/// Coordinates are pixel offsets relative to the annotated point.
pub fn arrow_paths(tail: (i32, i32), head_len: i32) -> [Vec<(i32, i32)>; 3] {
    let (tx, ty) = (tail.0 as f64, tail.1 as f64);
    let len = (tx * tx + ty * ty).sqrt().max(1.0);
    let (ux, uy) = (tx / len, ty / len);
    let angle = 25f64.to_radians();
    let (sin, cos) = angle.sin_cos();
    let head = |s: f64| {
        let x = (ux * cos - uy * s) * head_len as f64;
        let y = (ux * s + uy * cos) * head_len as f64;
        vec![(0, 0), (x.round() as i32, y.round() as i32)]
    };
    [vec![tail, (0, 0)], head(sin), head(-sin)]
}

/// Split a sampled curve into dashes of `on` segments separated by `off` skipped segments.
pub fn dash_segments(points: &[(f64, f64)], on: usize, off: usize) -> Vec<Vec<(f64, f64)>> {
    let period = (on + off).max(1);
    let mut dashes = Vec::new();
    let mut start = 0;
    while start + 1 < points.len() {
        let end = (start + on.max(1)).min(points.len() - 1);
        dashes.push(points[start..=end].to_vec());
        start += period;
    }
    dashes
}

/// Axis ranges covering the data and the trend, with headroom above for the annotation.
pub fn trend_ranges(points: &[(f64, f64)], trend: &[(f64, f64)]) -> (Range<f64>, Range<f64>) {
    let (mut x_lo, mut x_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_lo, mut y_hi) = (0.0f64, 0.0f64);
    for &(x, y) in points.iter().chain(trend.iter()) {
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_lo = y_lo.min(y);
        y_hi = y_hi.max(y);
    }
    if x_lo > x_hi {
        return (0.0..1.0, 0.0..1.0);
    }
    let x_pad = if x_hi > x_lo { (x_hi - x_lo) * 0.02 } else { 1.0 };
    let y_span = if y_hi > y_lo { y_hi - y_lo } else { 1.0 };
    (x_lo - x_pad..x_hi + x_pad, y_lo - y_span * 0.02..y_hi + y_span * 0.15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_label_precision() {
        let label = annotation_label(Extremum { x: 100.0, y: 0.0095 });
        assert_eq!(label, "Max: 0.009500s at 100 chars");
    }

    #[test]
    fn test_arrow_ends_at_anchor() {
        let [shaft, head_a, head_b] = arrow_paths((-40, -30), 10);
        assert_eq!(shaft, vec![(-40, -30), (0, 0)]);
        for head in [&head_a, &head_b] {
            assert_eq!(head[0], (0, 0));
            let (x, y) = head[1];
            // Head strokes point back toward the tail.
            assert!(x * -40 + y * -30 > 0);
            let len = ((x * x + y * y) as f64).sqrt();
            assert!((len - 10.0).abs() <= 1.0);
        }
        assert_ne!(head_a[1], head_b[1]);
    }

    #[test]
    fn test_legend_swatch_scales_with_dpi() {
        assert_eq!(legend_swatch(Scale::new(72)), LegendSwatch { len: 20, dash: 7 });
        let hi = legend_swatch(Scale::new(288));
        assert_eq!(hi, LegendSwatch { len: 80, dash: 28 });
        // Two dashes with a visible gap between them.
        assert!(hi.len - 2 * hi.dash > 0);
    }

    #[test]
    fn test_dash_segments() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 0.0)).collect();
        let dashes = dash_segments(&points, 2, 1);
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[0].first(), Some(&(0.0, 0.0)));
        assert_eq!(dashes[0].last(), Some(&(2.0, 0.0)));
        assert_eq!(dashes[1][0], (3.0, 0.0));
        assert_eq!(dashes[2].last(), Some(&(8.0, 0.0)));
        assert!(dash_segments(&points[..1], 2, 1).is_empty());
    }

    #[test]
    fn test_ranges_include_maximum_with_headroom() {
        let points = [(10.0, 0.0001), (50.0, 0.0021), (100.0, 0.0095)];
        let (x, y) = trend_ranges(&points, &points);
        assert!(x.start < 10.0 && x.end > 100.0);
        assert!(y.start < 0.0);
        assert!(y.end > 0.0095 * 1.1);
    }

    #[test]
    fn test_render_empty_is_error() {
        let fit = QuadraticFit::fit(&[(1.0, 1.0), (2.0, 2.0), (3.0, 4.0)]).unwrap();
        let result = render_trend_chart(&[], &fit, Extremum { x: 0.0, y: 0.0 }, 50);
        assert!(matches!(result, Err(BenchError::EmptyAggregate(_))));
    }
}
