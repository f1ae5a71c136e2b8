//! Normalize duration literals such as `174.027µs` or `1.509557299s` into seconds.

use crate::error::BenchError;

/// Unit prefix in front of the trailing `s` of a duration literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
}

impl TimeUnit {
    /// Map a unit prefix (`""`, `"m"`, `"µ"`) to its unit.
    pub fn from_suffix(suffix: &str) -> Result<Self, BenchError> {
        match suffix {
            "" => Ok(TimeUnit::Seconds),
            "m" => Ok(TimeUnit::Milliseconds),
            "µ" => Ok(TimeUnit::Microseconds),
            other => Err(BenchError::Parse(format!("unrecognized duration unit '{}s'", other))),
        }
    }

    /// Multiplier converting a value in this unit into seconds.
    pub fn multiplier(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1e-3,
            TimeUnit::Microseconds => 1e-6,
        }
    }
}

/// Convert a `(numeric literal, unit prefix)` pair into seconds.
pub fn normalize_duration(literal: &str, suffix: &str) -> Result<f64, BenchError> {
    let unit = TimeUnit::from_suffix(suffix)?;
    let value: f64 = literal
        .parse()
        .map_err(|_| BenchError::Parse(format!("invalid duration literal '{}'", literal)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(BenchError::Parse(format!("duration must be a non-negative number, got '{}'", literal)));
    }
    Ok(value * unit.multiplier())
}

/// Split a token like `840.02µs` into literal and unit prefix, then normalize it.
pub fn parse_duration_literal(token: &str) -> Result<f64, BenchError> {
    let token = token.trim();
    let body = token
        .strip_suffix('s')
        .ok_or_else(|| BenchError::Parse(format!("duration '{}' does not end in 's'", token)))?;

    let split = body
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(body.len());
    let (literal, suffix) = body.split_at(split);
    if literal.is_empty() {
        return Err(BenchError::Parse(format!("duration '{}' has no numeric value", token)));
    }

    normalize_duration(literal, suffix)
}
