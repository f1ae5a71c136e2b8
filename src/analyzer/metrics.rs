//! Per-record and aggregate statistics over parsed benchmark records.

use std::borrow::Cow;

use super::types::{BenchmarkRecord, TabularRecord};
use crate::error::BenchError;

/// Speedup of `from()` over `from_old()`; values above 1 mean `from()` is faster.
pub fn speedup(record: &BenchmarkRecord) -> Result<f64, BenchError> {
    if record.primary_duration_seconds == 0.0 {
        return Err(BenchError::DivisionByZero {
            state_count: record.state_count,
        });
    }
    Ok(record.baseline_duration_seconds / record.primary_duration_seconds)
}

/// Speedup of every record, in record order.
pub fn speedups(records: &[BenchmarkRecord]) -> Result<Vec<f64>, BenchError> {
    records.iter().map(speedup).collect()
}

/// Arithmetic mean of all per-record speedups.
///
/// A single zero-duration trial fails the whole aggregate.
pub fn mean_speedup(records: &[BenchmarkRecord]) -> Result<f64, BenchError> {
    if records.is_empty() {
        return Err(BenchError::EmptyAggregate("mean speedup"));
    }
    mean(&speedups(records)?, "mean speedup")
}

/// Arithmetic mean; `what` names the quantity in the error.
pub fn mean(values: &[f64], what: &'static str) -> Result<f64, BenchError> {
    if values.is_empty() {
        return Err(BenchError::EmptyAggregate(what));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Smallest and largest value.
pub fn extent(values: impl IntoIterator<Item = f64>, what: &'static str) -> Result<(f64, f64), BenchError> {
    values
        .into_iter()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(BenchError::EmptyAggregate(what))
}

/// Item with the largest `value`; ties go to the first occurrence.
pub fn max_by_value<'a, T>(items: &'a [T], what: &'static str, value: impl Fn(&T) -> f64) -> Result<&'a T, BenchError> {
    let mut iter = items.iter();
    let mut best = iter.next().ok_or(BenchError::EmptyAggregate(what))?;
    let mut best_value = value(best);
    for item in iter {
        let v = value(item);
        if v > best_value {
            best = item;
            best_value = v;
        }
    }
    Ok(best)
}

/// Records in ascending `state_count` order, borrowing when they already are.
pub fn sort_by_state_count(records: &[BenchmarkRecord]) -> Cow<'_, [BenchmarkRecord]> {
    if records.is_sorted_by_key(|r| r.state_count) {
        return Cow::Borrowed(records);
    }
    log::warn!("Benchmark trials are not in ascending state order; sorting before rendering");
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.state_count);
    Cow::Owned(sorted)
}

/// Rows in ascending `character_count` order, borrowing when they already are.
pub fn sort_by_character_count(records: &[TabularRecord]) -> Cow<'_, [TabularRecord]> {
    if records.is_sorted_by_key(|r| r.character_count) {
        return Cow::Borrowed(records);
    }
    log::warn!("Tabular rows are not in ascending character order; sorting before fitting");
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.character_count);
    Cow::Owned(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state_count: u32, primary: f64, baseline: f64) -> BenchmarkRecord {
        BenchmarkRecord::new(state_count, primary, baseline)
    }

    #[test]
    fn test_speedup_ratio() {
        let r = record(3, 0.000174027, 0.000170972);
        let s = speedup(&r).unwrap();
        assert_eq!(s, 0.000170972 / 0.000174027);
        assert!((s - 0.9824).abs() < 1e-4);
    }

    #[test]
    fn test_speedup_zero_primary_signals() {
        let r = record(7, 0.0, 0.5);
        assert_eq!(speedup(&r), Err(BenchError::DivisionByZero { state_count: 7 }));
    }

    #[test]
    fn test_mean_speedup() {
        let records = vec![record(3, 1.0, 2.0), record(4, 2.0, 2.0)];
        assert_eq!(mean_speedup(&records).unwrap(), 1.5);
    }

    #[test]
    fn test_mean_speedup_empty_signals() {
        assert_eq!(mean_speedup(&[]), Err(BenchError::EmptyAggregate("mean speedup")));
    }

    #[test]
    fn test_mean_speedup_with_zero_duration_fails() {
        let records = vec![record(3, 1.0, 2.0), record(4, 0.0, 2.0)];
        assert_eq!(mean_speedup(&records), Err(BenchError::DivisionByZero { state_count: 4 }));
    }

    #[test]
    fn test_extent_and_mean() {
        assert_eq!(extent([3.0, 1.0, 2.0], "range").unwrap(), (1.0, 3.0));
        assert!(extent(Vec::<f64>::new(), "range").is_err());
        assert_eq!(mean(&[1.0, 2.0, 6.0], "mean").unwrap(), 3.0);
        assert_eq!(mean(&[], "mean duration"), Err(BenchError::EmptyAggregate("mean duration")));
    }

    #[test]
    fn test_max_by_value_first_occurrence_wins() {
        let rows = [
            TabularRecord { character_count: 1, duration_seconds: 0.2 },
            TabularRecord { character_count: 2, duration_seconds: 0.9 },
            TabularRecord { character_count: 3, duration_seconds: 0.9 },
        ];
        let best = max_by_value(&rows, "maximum duration", |r| r.duration_seconds).unwrap();
        assert_eq!(best.character_count, 2);

        let empty: [TabularRecord; 0] = [];
        assert!(max_by_value(&empty, "maximum duration", |r| r.duration_seconds).is_err());
    }

    #[test]
    fn test_max_by_value_borrows_from_items() {
        let records = vec![record(3, 1.0, 2.0), record(4, 1.0, 5.0), record(5, 1.0, 3.0)];
        let slowest = max_by_value(&records, "slowest trial", |r| r.baseline_duration_seconds).unwrap();
        assert!(std::ptr::eq(slowest, &records[1]));
        assert_eq!(slowest.state_count, 4);
    }

    #[test]
    fn test_sorting_borrows_sorted_input() {
        let sorted = vec![record(3, 1.0, 1.0), record(4, 1.0, 1.0)];
        assert!(matches!(sort_by_state_count(&sorted), Cow::Borrowed(_)));

        let unsorted = vec![record(5, 1.0, 1.0), record(3, 1.0, 1.0)];
        let fixed = sort_by_state_count(&unsorted);
        assert_eq!(fixed.iter().map(|r| r.state_count).collect::<Vec<_>>(), vec![3, 5]);

        let rows = [
            TabularRecord { character_count: 9, duration_seconds: 0.1 },
            TabularRecord { character_count: 2, duration_seconds: 0.3 },
        ];
        assert_eq!(sort_by_character_count(&rows)[0].character_count, 2);
    }
}
