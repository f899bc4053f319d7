//! Step-bounded scan loop.
//!
//! Translators run on the thread that drives the host UI, so every scan gets a
//! hard step budget. The budget is enforced here rather than by counters
//! inside each scanner: a scanner only describes one step, and
//! [`run_bounded`] decides when to stop.

use std::ops::ControlFlow;

use serde::Serialize;

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Input was consumed completely.
    Completed,
    /// Nothing to scan after preprocessing.
    Empty,
    /// The step budget ran out with unprocessed input left.
    Halted { max_steps: usize },
    /// A step made no progress and the scanner gave up.
    Stuck,
}

impl Termination {
    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }
}

/// One resumable scan.
pub trait Scan {
    /// Advance by one step. `Break` ends the scan early with the given outcome.
    fn step(&mut self) -> ControlFlow<Termination>;

    /// Whether non-blank input remains.
    fn has_pending(&self) -> bool;
}

/// Run `scan` for at most `max_steps` steps.
pub fn run_bounded<S: Scan>(scan: &mut S, max_steps: usize) -> Termination {
    for _ in 0..max_steps {
        if let ControlFlow::Break(termination) = scan.step() {
            return termination;
        }
    }

    if scan.has_pending() {
        tracing::warn!(max_steps, "scan halted at step budget");
        Termination::Halted { max_steps }
    } else {
        Termination::Completed
    }
}

/// Step budget for an input: `max(floor, input_chars * per_input_char)`.
pub fn step_budget(floor: usize, per_input_char: usize, input_chars: usize) -> usize {
    floor.max(input_chars.saturating_mul(per_input_char))
}
