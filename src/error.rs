//! Error taxonomy shared by the parsing, metrics and rendering stages.

use plotters::drawing::DrawingAreaErrorKind;

/// Failure raised by one of the pipeline stages.
///
/// Every variant is a local input-validation failure. None of them is retryable;
/// the affected stage aborts and the message names what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum BenchError {
    /// No trial blocks found, or a duration literal that cannot be normalized.
    Parse(String),
    /// Speedup requested for a trial whose primary duration is exactly zero.
    DivisionByZero { state_count: u32 },
    /// Mean or extremum requested over zero records.
    EmptyAggregate(&'static str),
    /// Quadratic fit requested with too few distinct x values (or a singular system).
    IllPosedFit { distinct: usize },
    /// Drawing or image encoding failed.
    Render(String),
}

impl std::fmt::Display for BenchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchError::Parse(msg) => write!(f, "Parse error: {}", msg),
            BenchError::DivisionByZero { state_count } => {
                write!(f, "Speedup undefined: from() took zero time in the {}-state trial", state_count)
            }
            BenchError::EmptyAggregate(what) => write!(f, "Cannot compute {} over an empty record set", what),
            BenchError::IllPosedFit { distinct } => write!(
                f,
                "Insufficient distinct x-values for trend fit: need at least 3, found {}",
                distinct
            ),
            BenchError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for BenchError {}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for BenchError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        BenchError::Render(err.to_string())
    }
}
