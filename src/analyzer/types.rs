//! Record types produced by the parsers and consumed by metrics and renderers.

use serde::Deserialize;

/// One trial of the powerset construction benchmark.
///
/// Both durations are always in seconds, whatever unit the log used.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    /// Number of states requested for the generated NFA.
    pub state_count: u32,
    /// Duration of `from()`, the new implementation.
    pub primary_duration_seconds: f64,
    /// Duration of `from_old()`, the baseline implementation.
    pub baseline_duration_seconds: f64,
    /// `DFA states : N` line, when the trial reported one.
    pub dfa_state_count: Option<u64>,
    /// Transition count from the `Generated pathological NFA ...` line, when present.
    pub nfa_transition_count: Option<u64>,
}

impl BenchmarkRecord {
    pub fn new(state_count: u32, primary_duration_seconds: f64, baseline_duration_seconds: f64) -> Self {
        Self {
            state_count,
            primary_duration_seconds,
            baseline_duration_seconds,
            dfa_state_count: None,
            nfa_transition_count: None,
        }
    }
}

/// One row of tabular benchmark data (character count vs. duration).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TabularRecord {
    #[serde(rename = "number_of_characters")]
    pub character_count: u64,
    pub duration_seconds: f64,
}

/// Location of a maximum: the independent value paired with the maximal dependent value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub x: f64,
    pub y: f64,
}
