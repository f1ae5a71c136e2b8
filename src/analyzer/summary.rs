//! Human-readable statistics printed after rendering.

use std::fmt;

use super::metrics::{extent, max_by_value, mean, mean_speedup};
use super::trend::QuadraticFit;
use super::types::{BenchmarkRecord, Extremum, TabularRecord};
use crate::error::BenchError;

/// Statistics for the text-log path.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSummary {
    pub record_count: usize,
    pub state_range: (u32, u32),
    pub primary_range: (f64, f64),
    pub baseline_range: (f64, f64),
    pub mean_primary: f64,
    pub mean_baseline: f64,
    /// Trial with the longest `from_old()` duration.
    pub slowest: Extremum,
    pub dfa_state_range: Option<(u64, u64)>,
    pub mean_speedup: f64,
}

impl LogSummary {
    pub fn from_records(records: &[BenchmarkRecord]) -> Result<Self, BenchError> {
        let primary: Vec<f64> = records.iter().map(|r| r.primary_duration_seconds).collect();
        let baseline: Vec<f64> = records.iter().map(|r| r.baseline_duration_seconds).collect();

        let (min_states, max_states) = extent(records.iter().map(|r| r.state_count as f64), "state range")?;
        let slowest = max_by_value(records, "maximum duration", |r| r.baseline_duration_seconds)?;

        let dfa_counts: Vec<u64> = records.iter().filter_map(|r| r.dfa_state_count).collect();
        let dfa_state_range = match (dfa_counts.iter().min(), dfa_counts.iter().max()) {
            (Some(&lo), Some(&hi)) => Some((lo, hi)),
            _ => None,
        };

        Ok(Self {
            record_count: records.len(),
            state_range: (min_states as u32, max_states as u32),
            primary_range: extent(primary.iter().copied(), "from() range")?,
            baseline_range: extent(baseline.iter().copied(), "from_old() range")?,
            mean_primary: mean(&primary, "mean from() duration")?,
            mean_baseline: mean(&baseline, "mean from_old() duration")?,
            slowest: Extremum {
                x: slowest.state_count as f64,
                y: slowest.baseline_duration_seconds,
            },
            dfa_state_range,
            mean_speedup: mean_speedup(records)?,
        })
    }
}

impl fmt::Display for LogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parsed {} benchmark results", self.record_count)?;
        writeln!(f, "NFA states range: {} to {}", self.state_range.0, self.state_range.1)?;
        if let Some((lo, hi)) = self.dfa_state_range {
            writeln!(f, "DFA states range: {} to {}", lo, hi)?;
        }
        writeln!(
            f,
            "from() duration range: {:.6}s - {:.6}s",
            self.primary_range.0, self.primary_range.1
        )?;
        writeln!(
            f,
            "from_old() duration range: {:.6}s - {:.6}s",
            self.baseline_range.0, self.baseline_range.1
        )?;
        writeln!(f, "Average from() duration: {:.6}s", self.mean_primary)?;
        writeln!(f, "Average from_old() duration: {:.6}s", self.mean_baseline)?;
        writeln!(f, "Slowest trial: {:.6}s at {} states", self.slowest.y, self.slowest.x)?;
        write!(f, "Average speedup: {:.2}x", self.mean_speedup)
    }
}

/// Statistics for the tabular path.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularSummary {
    pub record_count: usize,
    pub character_range: (u64, u64),
    pub duration_range: (f64, f64),
    pub mean_duration: f64,
    pub maximum: Extremum,
    pub trend: [f64; 3],
}

impl TabularSummary {
    pub fn from_records(records: &[TabularRecord], fit: &QuadraticFit) -> Result<Self, BenchError> {
        let durations: Vec<f64> = records.iter().map(|r| r.duration_seconds).collect();
        let (lo, hi) = extent(records.iter().map(|r| r.character_count as f64), "character range")?;

        Ok(Self {
            record_count: records.len(),
            character_range: (lo as u64, hi as u64),
            duration_range: extent(durations.iter().copied(), "duration range")?,
            mean_duration: mean(&durations, "mean duration")?,
            maximum: maximum_duration(records)?,
            trend: fit.coefficients(),
        })
    }
}

/// Point with the largest duration; ties go to the first row.
pub fn maximum_duration(records: &[TabularRecord]) -> Result<Extremum, BenchError> {
    let max = max_by_value(records, "maximum duration", |r| r.duration_seconds)?;
    Ok(Extremum {
        x: max.character_count as f64,
        y: max.duration_seconds,
    })
}

impl fmt::Display for TabularSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Benchmark Statistics:")?;
        writeln!(f, "Total data points: {}", self.record_count)?;
        writeln!(f, "Character range: {} - {}", self.character_range.0, self.character_range.1)?;
        writeln!(
            f,
            "Duration range: {:.6}s - {:.6}s",
            self.duration_range.0, self.duration_range.1
        )?;
        writeln!(f, "Average duration: {:.6}s", self.mean_duration)?;
        writeln!(f, "Max: {:.6}s at {} chars", self.maximum.y, self.maximum.x)?;
        let [c0, c1, c2] = self.trend;
        write!(f, "Trend: y = {:.3e}*x^2 + {:.3e}*x + {:.3e}", c2, c1, c0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::log_parser::parse_benchmark_log;

    #[test]
    fn test_log_summary_of_sample() {
        let records = parse_benchmark_log(include_str!("../../fixtures/powerset_benchmark.log")).unwrap();
        let summary = LogSummary::from_records(&records).unwrap();
        assert_eq!(summary.record_count, 18);
        assert_eq!(summary.state_range, (3, 20));
        assert_eq!(summary.dfa_state_range, Some((8, 1048576)));
        assert_eq!(summary.slowest, Extremum { x: 20.0, y: 94.541210537 });
        assert!(summary.mean_speedup > 1.2 && summary.mean_speedup < 1.4);

        let text = summary.to_string();
        assert!(text.starts_with("Parsed 18 benchmark results"));
        assert!(text.contains("NFA states range: 3 to 20"));
        assert!(text.contains("Slowest trial: 94.541211s at 20 states"));
    }

    #[test]
    fn test_log_summary_empty_signals() {
        assert!(matches!(LogSummary::from_records(&[]), Err(BenchError::EmptyAggregate(_))));
    }

    #[test]
    fn test_tabular_summary_targets_maximum() {
        let rows = vec![
            TabularRecord { character_count: 10, duration_seconds: 0.0001 },
            TabularRecord { character_count: 50, duration_seconds: 0.0021 },
            TabularRecord { character_count: 100, duration_seconds: 0.0095 },
        ];
        let points: Vec<(f64, f64)> = rows.iter().map(|r| (r.character_count as f64, r.duration_seconds)).collect();
        let fit = QuadraticFit::fit(&points).unwrap();
        let summary = TabularSummary::from_records(&rows, &fit).unwrap();

        assert_eq!(summary.maximum, Extremum { x: 100.0, y: 0.0095 });
        assert_eq!(summary.character_range, (10, 100));
        assert!(summary.to_string().contains("Max: 0.009500s at 100 chars"));
    }
}
