//! Extract `BenchmarkRecord`s from powerset construction benchmark output.
//!
//! The log is scanned in two stages. First it is cut into trial blocks, each
//! starting at a header line; then each block is searched for its labeled
//! result lines. Text outside a block is ignored.
//!
//! ```text
//! Benchmarking powerset construction with 3 states
//! Generated pathological NFA with 4 states and 9 transitions
//! Results:
//!   from()     : 174.027µs
//!   from_old() : 170.972µs
//!   Speedup    : 0.98x
//!   DFA states : 8
//! ```

use super::types::BenchmarkRecord;
use super::units::parse_duration_literal;
use crate::error::BenchError;

const HEADER_PREFIX: &str = "Benchmarking powerset construction with ";
const HEADER_SUFFIX: &str = " states";
const NFA_PREFIX: &str = "Generated pathological NFA with ";
const PRIMARY_LABEL: &str = "from()";
const BASELINE_LABEL: &str = "from_old()";
const DFA_STATES_LABEL: &str = "DFA states";

/// One trial block: the state count from its header and the text up to the next header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialBlock<'a> {
    pub state_count: u32,
    pub body: &'a str,
}

/// Parse every trial block in `text`, in text order.
///
/// Blocks missing either duration line are dropped. A labeled duration line whose
/// value cannot be normalized is an error. Input without any trial yields an empty
/// vector; deciding whether that is fatal is up to the caller.
pub fn parse_benchmark_log(text: &str) -> Result<Vec<BenchmarkRecord>, BenchError> {
    let mut records = Vec::new();
    for block in split_trial_blocks(text) {
        match parse_trial_block(&block)? {
            Some(record) => records.push(record),
            None => log::debug!("Dropping incomplete trial block for {} states", block.state_count),
        }
    }
    Ok(records)
}

/// Cut `text` into trial blocks bounded by header lines.
pub fn split_trial_blocks(text: &str) -> Vec<TrialBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<(u32, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if let Some(state_count) = parse_header(line) {
            if let Some((count, start)) = current.take() {
                blocks.push(TrialBlock {
                    state_count: count,
                    body: &text[start..offset],
                });
            }
            current = Some((state_count, offset + line.len()));
        }
        offset += line.len();
    }

    if let Some((count, start)) = current {
        blocks.push(TrialBlock {
            state_count: count,
            body: &text[start..],
        });
    }

    blocks
}

/// Extract a record from one block, or `None` when a duration line is missing.
pub fn parse_trial_block(block: &TrialBlock<'_>) -> Result<Option<BenchmarkRecord>, BenchError> {
    let (Some(primary), Some(baseline)) = (
        labeled_value(block.body, PRIMARY_LABEL),
        labeled_value(block.body, BASELINE_LABEL),
    ) else {
        return Ok(None);
    };

    let in_trial = |err: BenchError| match err {
        BenchError::Parse(msg) => BenchError::Parse(format!("{} (trial with {} states)", msg, block.state_count)),
        other => other,
    };

    let mut record = BenchmarkRecord::new(
        block.state_count,
        parse_duration_literal(primary).map_err(in_trial)?,
        parse_duration_literal(baseline).map_err(in_trial)?,
    );
    record.dfa_state_count = labeled_value(block.body, DFA_STATES_LABEL).and_then(|v| v.parse().ok());
    record.nfa_transition_count = extract_nfa_transitions(block.body);

    Ok(Some(record))
}

/// Parse `Benchmarking powerset construction with N states` anywhere in `line`.
///
/// Zero states is not a trial. A header whose count does not fit is logged and skipped.
fn parse_header(line: &str) -> Option<u32> {
    let start = line.find(HEADER_PREFIX)? + HEADER_PREFIX.len();
    let (count, _) = line[start..].split_once(HEADER_SUFFIX)?;
    match count.trim().parse::<u32>() {
        Ok(0) => {
            log::debug!("Ignoring trial header with zero states: {}", line.trim());
            None
        }
        Ok(count) => Some(count),
        Err(e) => {
            log::debug!("Ignoring trial header with unreadable state count ({}): {}", e, line.trim());
            None
        }
    }
}

/// Value after `label :` on the first line starting with `label`.
fn labeled_value<'a>(body: &'a str, label: &str) -> Option<&'a str> {
    body.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(label)?;
        let value = rest.trim_start().strip_prefix(':')?;
        Some(value.trim())
    })
}

/// Transition count from `Generated pathological NFA with S states and T transitions`.
fn extract_nfa_transitions(body: &str) -> Option<u64> {
    body.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(NFA_PREFIX)?;
        let (_, tail) = rest.split_once(" and ")?;
        tail.strip_suffix(" transitions")?.trim().parse().ok()
    })
}
