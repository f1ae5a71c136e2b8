//! parse -> normalize -> derive -> render, once per input path.

use crate::analyzer::log_parser::parse_benchmark_log;
use crate::analyzer::metrics::{sort_by_character_count, speedups};
use crate::analyzer::{BenchmarkRecord, LogSummary, QuadraticFit, TabularRecord, TabularSummary};
use crate::error::BenchError;
use crate::render::{Figure, render_dual_scale, render_trend_chart};

/// Default artifact of the text-log path.
pub const LOG_OUTPUT: &str = "powerset_benchmark.png";
/// Default artifact of the tabular path.
pub const TABLE_OUTPUT: &str = "benchmark_plot.png";

/// Rows shown next to the chart in the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Everything a finished run hands to its sinks: image file, console and window.
pub struct PipelineOutput {
    pub title: &'static str,
    pub figure: Figure,
    pub summary: String,
    pub table: RecordTable,
}

/// Parse the log and derive every statistic; fails before anything is drawn.
pub fn prepare_log(text: &str) -> Result<(Vec<BenchmarkRecord>, LogSummary), BenchError> {
    let records = parse_benchmark_log(text)?;
    if records.is_empty() {
        return Err(BenchError::Parse("no benchmark trials found in input".into()));
    }
    log::info!("Parsed {} benchmark trials", records.len());
    let summary = LogSummary::from_records(&records)?;
    Ok((records, summary))
}

/// Text-log path: dual-scale comparison chart plus speedup summary.
pub fn run_log_pipeline(text: &str, dpi: u32) -> Result<PipelineOutput, BenchError> {
    let (records, summary) = prepare_log(text)?;
    let figure = render_dual_scale(&records, dpi)?;
    let rows = records
        .iter()
        .zip(speedups(&records)?)
        .map(|(r, s)| {
            vec![
                r.state_count.to_string(),
                format!("{:.6}", r.primary_duration_seconds),
                format!("{:.6}", r.baseline_duration_seconds),
                format!("{:.2}x", s),
            ]
        })
        .collect();

    Ok(PipelineOutput {
        title: "Powerset Construction Benchmark",
        figure,
        summary: summary.to_string(),
        table: RecordTable {
            headers: vec!["States", "from() (s)", "from_old() (s)", "Speedup"],
            rows,
        },
    })
}

/// Sort the rows, fit the trend and derive the statistics.
///
/// The maximum is looked up on the rows as given so ties resolve to the first input row.
pub fn prepare_tabular(records: &[TabularRecord]) -> Result<(Vec<TabularRecord>, QuadraticFit, TabularSummary), BenchError> {
    if records.is_empty() {
        return Err(BenchError::EmptyAggregate("tabular statistics"));
    }
    let sorted = sort_by_character_count(records).into_owned();
    let points: Vec<(f64, f64)> = sorted
        .iter()
        .map(|r| (r.character_count as f64, r.duration_seconds))
        .collect();
    let fit = QuadraticFit::fit(&points)?;
    let summary = TabularSummary::from_records(records, &fit)?;
    Ok((sorted, fit, summary))
}

/// Tabular path: annotated trend chart plus duration summary.
pub fn run_tabular_pipeline(records: &[TabularRecord], dpi: u32) -> Result<PipelineOutput, BenchError> {
    let (sorted, fit, summary) = prepare_tabular(records)?;
    let figure = render_trend_chart(&sorted, &fit, summary.maximum, dpi)?;
    let rows = sorted
        .iter()
        .map(|r| vec![r.character_count.to_string(), format!("{:.6}", r.duration_seconds)])
        .collect();

    Ok(PipelineOutput {
        title: "Benchmark Results",
        figure,
        summary: summary.to_string(),
        table: RecordTable {
            headers: vec!["Characters", "Duration (s)"],
            rows,
        },
    })
}
