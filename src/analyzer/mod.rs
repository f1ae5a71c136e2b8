//! Analyzer module for benchmark output parsing and statistics.
//!
//! Provides functionality for:
//! - Splitting powerset construction logs into trials and normalizing their durations
//! - Loading tabular character-count/duration rows
//! - Speedups, aggregates, extrema and the quadratic trend fit

pub mod log_loader;
pub mod log_parser;
pub mod metrics;
pub mod summary;
pub mod trend;
pub mod types;
pub mod units;

pub use summary::{LogSummary, TabularSummary};
pub use trend::QuadraticFit;
pub use types::{BenchmarkRecord, Extremum, TabularRecord};
