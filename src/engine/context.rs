//! Per-traversal shared state
//!
//! Everything workers share lives in one explicitly constructed
//! `TraversalContext` created per search invocation. Nothing here is
//! process-global, so concurrent or repeated invocations cannot interfere.

use crate::config::SearchConfig;
use crate::engine::frontier::Frontier;
use crate::engine::sink::ResultSink;
use crate::error::{ScanError, SkipRecord};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Cooperative cancellation signal
///
/// Write-once-wins and monotonic for the run: once set it is never cleared.
/// Workers observe it between directory open/read calls, so worst-case
/// cancellation latency is one OS call, not instantaneous.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signal. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check the signal
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Cancel after a duration, from a detached timer thread
    ///
    /// The engine itself has no timeout; any time bound is the caller's,
    /// applied at the boundary with this helper.
    pub fn cancel_after(&self, duration: Duration) {
        let token = self.clone();
        thread::Builder::new()
            .name("seeker-timeout".to_string())
            .spawn(move || {
                thread::sleep(duration);
                token.cancel();
            })
            .expect("Failed to spawn timeout thread");
    }
}

/// Live counters shared by all workers
#[derive(Debug, Default)]
pub struct SearchCounters {
    /// Directories successfully opened and scanned
    pub dirs_scanned: AtomicU64,

    /// Entries examined by the match predicate
    pub entries_examined: AtomicU64,

    /// Matches recorded (first-match race losses not included)
    pub matches_found: AtomicU64,

    /// Open/read failures
    pub errors: AtomicU64,

    /// Directories dropped by depth limit or exclude patterns
    pub filtered: AtomicU64,
}

impl SearchCounters {
    pub fn record_dir(&self) {
        self.dirs_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entry(&self) {
        self.entries_examined.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_match(&self) {
        self.matches_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }
}

/// Groups the frontier, sink, cancellation signal, counters, skip log, and
/// configuration for one traversal invocation
///
/// Created fresh per call, shared via `Arc` with the workers, discarded when
/// the invocation returns.
pub struct TraversalContext {
    /// Immutable search configuration
    pub config: Arc<SearchConfig>,

    /// Pending-directory pool
    pub frontier: Frontier,

    /// Match collection (or single-winner slot)
    pub sink: ResultSink,

    /// Cooperative cancellation signal
    pub cancel: CancelToken,

    /// Live shared counters
    pub counters: SearchCounters,

    /// Skipped-path diagnostics side channel
    skips: Mutex<Vec<SkipRecord>>,
}

impl TraversalContext {
    pub fn new(config: SearchConfig) -> Self {
        let sink = if config.first_match_only {
            ResultSink::first_match()
        } else {
            ResultSink::collecting()
        };

        Self {
            config: Arc::new(config),
            frontier: Frontier::new(),
            sink,
            cancel: CancelToken::new(),
            counters: SearchCounters::default(),
            skips: Mutex::new(Vec::new()),
        }
    }

    /// Record a skipped directory
    pub fn record_skip(&self, path: PathBuf, error: ScanError) {
        self.counters.record_error();
        self.skips
            .lock()
            .expect("skip log lock poisoned")
            .push(SkipRecord::new(path, error));
    }

    /// Drain the skip log (called once, after all workers stop)
    pub fn take_skips(&self) -> Vec<SkipRecord> {
        std::mem::take(&mut *self.skips.lock().expect("skip log lock poisoned"))
    }
}
