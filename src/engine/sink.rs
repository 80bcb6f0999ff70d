//! Result sink
//!
//! Two shapes depending on mode: an append-only collection of matched
//! paths, or - in first-match mode - a single winner slot claimed by one
//! atomic compare-and-set. The claim is a single CAS, not a flag-then-write
//! pair, so two workers can never both believe they won.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Outcome of recording one match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Appended to the collection (default mode)
    Recorded,

    /// Won the first-match race; the caller must set the cancellation
    /// signal and stop scanning
    Won,

    /// Lost the first-match race; the match is discarded. Not an error.
    Lost,
}

enum Slot {
    /// Unordered collection of every match
    Collect(Mutex<Vec<PathBuf>>),

    /// Single-winner cell; `set` is the atomic claim-once operation
    First(OnceLock<PathBuf>),
}

/// Thread-safe destination for matched paths
pub struct ResultSink {
    slot: Slot,
}

impl ResultSink {
    /// Sink that collects every match
    pub fn collecting() -> Self {
        Self {
            slot: Slot::Collect(Mutex::new(Vec::new())),
        }
    }

    /// Sink that holds at most one match for the whole run
    pub fn first_match() -> Self {
        Self {
            slot: Slot::First(OnceLock::new()),
        }
    }

    /// Record a match; safe for concurrent callers
    pub fn record(&self, path: PathBuf) -> RecordOutcome {
        match &self.slot {
            Slot::Collect(matches) => {
                matches.lock().expect("result sink lock poisoned").push(path);
                RecordOutcome::Recorded
            }
            Slot::First(winner) => {
                if winner.set(path).is_ok() {
                    RecordOutcome::Won
                } else {
                    RecordOutcome::Lost
                }
            }
        }
    }

    /// True once a first-match winner has been claimed
    pub fn has_winner(&self) -> bool {
        matches!(&self.slot, Slot::First(winner) if winner.get().is_some())
    }

    /// Drain the results (called once, after all workers stop)
    pub fn take_matches(&self) -> Vec<PathBuf> {
        match &self.slot {
            Slot::Collect(matches) => {
                std::mem::take(&mut *matches.lock().expect("result sink lock poisoned"))
            }
            Slot::First(winner) => winner.get().cloned().into_iter().collect(),
        }
    }
}
