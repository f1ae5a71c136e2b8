//! Side-by-side linear and log-log charts of `from()` vs `from_old()` durations.

use plotters::coord::Shift;
use plotters::coord::ranged1d::Ranged;
use plotters::prelude::*;
use std::ops::Range;

use super::figure::{Figure, Scale};
use crate::analyzer::BenchmarkRecord;
use crate::analyzer::metrics::sort_by_state_count;
use crate::error::BenchError;

/// Figure size in inches.
pub const FIGURE_SIZE: (f64, f64) = (15.0, 6.0);

const PRIMARY_LABEL: &str = "from()";
const BASELINE_LABEL: &str = "from_old()";
const X_DESC: &str = "NFA States";
const Y_DESC: &str = "Time (seconds)";

/// Both duration series against state count, ascending in x.
#[derive(Debug, Clone, PartialEq)]
pub struct DualSeries {
    pub primary: Vec<(f64, f64)>,
    pub baseline: Vec<(f64, f64)>,
}

impl DualSeries {
    pub fn from_records(records: &[BenchmarkRecord]) -> Self {
        let records = sort_by_state_count(records);
        Self {
            primary: records
                .iter()
                .map(|r| (r.state_count as f64, r.primary_duration_seconds))
                .collect(),
            baseline: records
                .iter()
                .map(|r| (r.state_count as f64, r.baseline_duration_seconds))
                .collect(),
        }
    }

    fn all_points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.primary.iter().chain(self.baseline.iter())
    }
}

/// Render the two-panel comparison chart.
pub fn render_dual_scale(records: &[BenchmarkRecord], dpi: u32) -> Result<Figure, BenchError> {
    if records.is_empty() {
        return Err(BenchError::EmptyAggregate("dual-scale chart"));
    }
    let series = DualSeries::from_records(records);

    let mut figure = Figure::new(FIGURE_SIZE.0, FIGURE_SIZE.1, dpi);
    let scale = figure.scale();
    {
        let root = figure.drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, 2));
        draw_linear_panel(&panels[0], &series, scale)?;
        draw_log_panel(&panels[1], &series, scale)?;
        root.present()?;
    }
    Ok(figure)
}

fn draw_linear_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, series: &DualSeries, scale: Scale) -> Result<(), BenchError> {
    let (x_range, y_range) = linear_ranges(series);
    let mut chart = ChartBuilder::on(area)
        .caption("Powerset Construction Performance (Linear Scale)", ("sans-serif", scale.px(12.0)))
        .margin(scale.px(8.0))
        .x_label_area_size(scale.px(30.0))
        .y_label_area_size(scale.px(48.0))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .label_style(("sans-serif", scale.px(8.0)))
        .axis_desc_style(("sans-serif", scale.px(10.0)))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    draw_comparison(&mut chart, &series.primary, &series.baseline, scale)
}

fn draw_log_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, series: &DualSeries, scale: Scale) -> Result<(), BenchError> {
    let primary = positive_points(&series.primary);
    let baseline = positive_points(&series.baseline);
    let dropped = series.primary.len() + series.baseline.len() - primary.len() - baseline.len();
    if dropped > 0 {
        log::warn!("Omitting {} zero-duration points from the log-scale panel", dropped);
    }

    let (x_range, y_range) = log_ranges(primary.iter().chain(baseline.iter()))
        .ok_or_else(|| BenchError::Render("log-scale panel needs at least one positive duration".into()))?;

    let mut chart = ChartBuilder::on(area)
        .caption("Powerset Construction Performance (Log Scale)", ("sans-serif", scale.px(12.0)))
        .margin(scale.px(8.0))
        .x_label_area_size(scale.px(30.0))
        .y_label_area_size(scale.px(48.0))
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0e}", v))
        .label_style(("sans-serif", scale.px(8.0)))
        .axis_desc_style(("sans-serif", scale.px(10.0)))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    draw_comparison(&mut chart, &primary, &baseline, scale)
}

/// Blue line with circles for `from()`, red line with squares for `from_old()`, plus legend.
fn draw_comparison<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    primary: &[(f64, f64)],
    baseline: &[(f64, f64)],
    scale: Scale,
) -> Result<(), BenchError>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let line_width = scale.px(1.5);
    let marker = scale.px(2.0);
    let half = marker as i32;
    let legend_len = scale.offset(20.0);

    let primary_style = BLUE.stroke_width(line_width);
    chart
        .draw_series(LineSeries::new(primary.iter().copied(), primary_style))?
        .label(PRIMARY_LABEL)
        .legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (legend_len, 0)], primary_style)
                + Circle::new((legend_len / 2, 0), marker, BLUE.filled())
        });
    chart.draw_series(primary.iter().map(|&p| Circle::new(p, marker, BLUE.filled())))?;

    let baseline_style = RED.stroke_width(line_width);
    chart
        .draw_series(LineSeries::new(baseline.iter().copied(), baseline_style))?
        .label(BASELINE_LABEL)
        .legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (legend_len, 0)], baseline_style)
                + Rectangle::new(
                    [(legend_len / 2 - half, -half), (legend_len / 2 + half, half)],
                    RED.filled(),
                )
        });
    chart.draw_series(
        baseline
            .iter()
            .map(|&p| EmptyElement::at(p) + Rectangle::new([(-half, -half), (half, half)], RED.filled())),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", scale.px(9.0)))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()?;
    Ok(())
}

/// Axis ranges for the linear panel: x spans the state counts, y starts at zero.
pub fn linear_ranges(series: &DualSeries) -> (Range<f64>, Range<f64>) {
    let (mut x_lo, mut x_hi, mut y_hi) = (f64::INFINITY, f64::NEG_INFINITY, 0.0f64);
    for &(x, y) in series.all_points() {
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_hi = y_hi.max(y);
    }
    if x_lo > x_hi {
        return (0.0..1.0, 0.0..1.0);
    }
    if x_lo == x_hi {
        x_lo -= 1.0;
        x_hi += 1.0;
    }
    let y_hi = if y_hi > 0.0 { y_hi * 1.05 } else { 1.0 };
    (x_lo..x_hi, 0.0..y_hi)
}

/// Axis ranges for the log-log panel, padded by a constant factor; `None` without points.
pub fn log_ranges<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<(Range<f64>, Range<f64>)> {
    let mut bounds: Option<[f64; 4]> = None;
    for &(x, y) in points {
        let b = bounds.get_or_insert([x, x, y, y]);
        b[0] = b[0].min(x);
        b[1] = b[1].max(x);
        b[2] = b[2].min(y);
        b[3] = b[3].max(y);
    }
    let [x_lo, x_hi, y_lo, y_hi] = bounds?;
    Some((x_lo / 1.1..x_hi * 1.1, y_lo / 1.5..y_hi * 1.5))
}

/// Points that can be placed on log axes.
pub fn positive_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points.iter().copied().filter(|&(x, y)| x > 0.0 && y > 0.0).collect()
}
