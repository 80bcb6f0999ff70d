//! Search coordinator - orchestrates the parallel traversal
//!
//! The coordinator is responsible for:
//! - Validating configuration and seeding the frontier with the root
//! - Spawning and joining the worker pool
//! - Exposing the external cancel hook and live progress snapshots
//! - Assembling the final outcome once every worker has stopped

use crate::config::SearchConfig;
use crate::engine::context::{CancelToken, TraversalContext};
use crate::engine::frontier::DirectoryTask;
use crate::engine::worker::Worker;
use crate::error::{ConfigError, Result, SearchError, SkipRecord};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of a completed search
#[derive(Debug)]
pub struct SearchOutcome {
    /// Matched absolute paths; in first-match mode this holds zero or one
    pub matches: Vec<PathBuf>,

    /// Directories that could not be (fully) scanned
    pub skipped: Vec<SkipRecord>,

    /// Final traversal statistics
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// The single winner in first-match mode (or an arbitrary match)
    pub fn first(&self) -> Option<&PathBuf> {
        self.matches.first()
    }
}

/// Final statistics for one traversal
#[derive(Debug, Clone)]
pub struct SearchStats {
    /// Directories successfully scanned
    pub dirs_scanned: u64,

    /// Entries examined by the predicate
    pub entries_examined: u64,

    /// Matches recorded
    pub matches_found: u64,

    /// Open/read failures (equals the skip log length)
    pub errors: u64,

    /// Directories dropped by depth limit or exclusions
    pub filtered: u64,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Whether the traversal ran to frontier exhaustion
    ///
    /// A first-match win counts as completed; only an external cancellation
    /// leaves this false.
    pub completed: bool,
}

/// Live progress snapshot for display by the caller
#[derive(Debug, Clone)]
pub struct SearchProgress {
    /// Directories scanned so far
    pub dirs_scanned: u64,

    /// Entries examined so far
    pub entries_examined: u64,

    /// Matches recorded so far
    pub matches_found: u64,

    /// Errors so far
    pub errors: u64,

    /// Directories currently queued in the frontier
    pub frontier_len: usize,

    /// Total workers in the pool
    pub total_workers: usize,

    /// Elapsed time
    pub elapsed: Duration,
}

impl SearchProgress {
    /// Directories scanned per second
    pub fn dirs_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.dirs_scanned as f64 / secs
        } else {
            0.0
        }
    }

    /// Entries examined per second
    pub fn entries_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.entries_examined as f64 / secs
        } else {
            0.0
        }
    }
}

/// Coordinates one parallel search invocation
pub struct SearchCoordinator {
    ctx: Arc<TraversalContext>,
    root: PathBuf,
    start: Instant,
}

impl SearchCoordinator {
    /// Create a coordinator from a validated configuration
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        // Results are reported as absolute paths regardless of how the
        // root was spelled
        let root = config.root.canonicalize().map_err(|e| {
            SearchError::Config(ConfigError::InvalidRoot {
                path: config.root.clone(),
                reason: e.to_string(),
            })
        })?;

        Ok(Self {
            ctx: Arc::new(TraversalContext::new(config)),
            root,
            start: Instant::now(),
        })
    }

    /// Get the external cancel hook
    ///
    /// The surrounding UI layer uses this to cancel a stale query when a
    /// newer one supersedes it; this is its only way into a live traversal.
    pub fn cancel_token(&self) -> CancelToken {
        self.ctx.cancel.clone()
    }

    /// Take a live progress snapshot
    pub fn progress(&self) -> SearchProgress {
        let counters = &self.ctx.counters;
        SearchProgress {
            dirs_scanned: counters.dirs_scanned.load(Ordering::Relaxed),
            entries_examined: counters.entries_examined.load(Ordering::Relaxed),
            matches_found: counters.matches_found.load(Ordering::Relaxed),
            errors: counters.errors.load(Ordering::Relaxed),
            frontier_len: self.ctx.frontier.len(),
            total_workers: self.ctx.config.worker_count,
            elapsed: self.start.elapsed(),
        }
    }

    /// Run the search, blocking until every worker has stopped
    pub fn run(self) -> Result<SearchOutcome> {
        let ctx = Arc::clone(&self.ctx);
        let config = Arc::clone(&ctx.config);

        info!(
            root = %self.root.display(),
            pattern = %config.pattern,
            workers = config.worker_count,
            first_match_only = config.first_match_only,
            "Starting search"
        );

        // Seed the frontier with exactly the root
        ctx.frontier.push(DirectoryTask::root(self.root.clone()));

        // Spawn workers
        let mut workers = Vec::with_capacity(config.worker_count);
        for id in 0..config.worker_count {
            workers.push(Worker::spawn(id, Arc::clone(&ctx))?);
        }

        // The run is terminal when every worker reaches its stopped state
        for worker in workers {
            if let Err(e) = worker.join() {
                warn!(error = %e, "Worker failed to join cleanly");
            }
        }

        let duration = self.start.elapsed();
        let outcome = assemble_outcome(&ctx, duration);

        info!(
            dirs = outcome.stats.dirs_scanned,
            entries = outcome.stats.entries_examined,
            matches = outcome.stats.matches_found,
            errors = outcome.stats.errors,
            duration_ms = duration.as_millis() as u64,
            completed = outcome.stats.completed,
            "Search finished"
        );

        Ok(outcome)
    }

    /// Run the search while periodically reporting progress snapshots
    ///
    /// The callback receives progress data only; rendering belongs to the
    /// caller.
    pub fn run_with_progress<F>(self, interval: Duration, callback: F) -> Result<SearchOutcome>
    where
        F: Fn(SearchProgress) + Send + 'static,
    {
        let ctx = Arc::clone(&self.ctx);
        let start = self.start;
        let done = Arc::new(AtomicBool::new(false));
        let done_flag = Arc::clone(&done);

        let sampler = thread::Builder::new()
            .name("seeker-progress".to_string())
            .spawn(move || {
                // Emits at least one snapshot, and a final one after the
                // run completes
                loop {
                    let counters = &ctx.counters;
                    callback(SearchProgress {
                        dirs_scanned: counters.dirs_scanned.load(Ordering::Relaxed),
                        entries_examined: counters.entries_examined.load(Ordering::Relaxed),
                        matches_found: counters.matches_found.load(Ordering::Relaxed),
                        errors: counters.errors.load(Ordering::Relaxed),
                        frontier_len: ctx.frontier.len(),
                        total_workers: ctx.config.worker_count,
                        elapsed: start.elapsed(),
                    });
                    if done_flag.load(Ordering::Relaxed) {
                        break;
                    }
                    thread::sleep(interval);
                }
            })
            .map_err(|e| {
                SearchError::Worker(crate::error::WorkerError::SpawnFailed {
                    id: usize::MAX,
                    reason: e.to_string(),
                })
            })?;

        let result = self.run();

        done.store(true, Ordering::SeqCst);
        let _ = sampler.join();

        result
    }
}

/// One-shot search with the default coordinator
///
/// Synchronous from the caller's point of view but internally parallel;
/// callers with a responsiveness path run it on a background task.
pub fn search(config: SearchConfig) -> Result<SearchOutcome> {
    SearchCoordinator::new(config)?.run()
}

fn assemble_outcome(ctx: &TraversalContext, duration: Duration) -> SearchOutcome {
    let counters = &ctx.counters;
    let cancelled = ctx.cancel.is_cancelled();

    // A win in first-match mode cancels by design; that still counts as a
    // completed run.
    let completed = !cancelled || (ctx.config.first_match_only && ctx.sink.has_winner());

    SearchOutcome {
        matches: ctx.sink.take_matches(),
        skipped: ctx.take_skips(),
        stats: SearchStats {
            dirs_scanned: counters.dirs_scanned.load(Ordering::Relaxed),
            entries_examined: counters.entries_examined.load(Ordering::Relaxed),
            matches_found: counters.matches_found.load(Ordering::Relaxed),
            errors: counters.errors.load(Ordering::Relaxed),
            filtered: counters.filtered.load(Ordering::Relaxed),
            duration,
            completed,
        },
    }
}
