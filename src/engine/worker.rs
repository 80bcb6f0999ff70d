//! Worker thread logic for the parallel traversal
//!
//! Each worker:
//! - Pops a directory task from the shared frontier
//! - Drives an owned directory handle over its entries
//! - Applies the match predicate and records matches in the sink
//! - Pushes discovered subdirectories back onto the frontier
//! - Stops when the frontier is idle or the cancellation signal is set
//!
//! The cancellation signal is re-checked before every entry read, so the
//! worst-case shutdown latency is a single open/read call.

use crate::engine::context::TraversalContext;
use crate::engine::frontier::DirectoryTask;
use crate::engine::sink::RecordOutcome;
use crate::error::WorkerError;
use crate::fs::DirHandle;
use crate::matcher;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Spins before an idle worker sleeps
const MAX_IDLE_SPINS: u32 = 1000;

/// Outcome of scanning one claimed directory
#[derive(Debug)]
enum ScanOutcome {
    /// Directory scanned to end of stream
    Scanned { entries: usize, subdirs: usize },

    /// Directory skipped (open/read failure, depth limit, or exclusion)
    Skipped,

    /// Scan broke off early: cancellation observed or first-match won
    Halted,
}

/// A worker thread processing directory tasks
pub struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(id: usize, ctx: Arc<TraversalContext>) -> Result<Self, WorkerError> {
        let handle = thread::Builder::new()
            .name(format!("seeker-{}", id))
            .spawn(move || worker_loop(id, ctx))
            .map_err(|e| WorkerError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked { id: self.id })
        } else {
            Ok(())
        }
    }
}

/// Main worker loop
///
/// Idle -> Scanning on a successful pop; back to Idle on end of stream or
/// read error; Stopped when the frontier is idle or cancellation fires.
fn worker_loop(id: usize, ctx: Arc<TraversalContext>) {
    debug!(worker = id, "Worker starting");

    let mut idle_spins = 0u32;

    loop {
        if ctx.cancel.is_cancelled() {
            break;
        }

        let task = match ctx.frontier.try_pop() {
            Some(task) => {
                idle_spins = 0;
                task
            }
            None => {
                // Nothing queued. Terminal only once every claimed task has
                // also finished - another worker may still push children.
                if ctx.frontier.is_idle() {
                    break;
                }

                idle_spins += 1;
                if idle_spins > MAX_IDLE_SPINS {
                    thread::sleep(Duration::from_micros(100));
                    idle_spins = 0;
                }
                continue;
            }
        };

        let outcome = scan_directory(id, &task, &ctx);
        ctx.frontier.task_done();

        match outcome {
            ScanOutcome::Scanned { entries, subdirs } => {
                trace!(
                    worker = id,
                    path = %task.path.display(),
                    entries = entries,
                    subdirs = subdirs,
                    "Directory scanned"
                );
            }
            ScanOutcome::Skipped => {
                trace!(worker = id, path = %task.path.display(), "Directory skipped");
            }
            ScanOutcome::Halted => break,
        }
    }

    debug!(worker = id, "Worker stopped");
}

/// Scan one claimed directory
///
/// The directory handle is owned by this function; every return path -
/// exhaustion, read error, cancellation, first-match win - releases it
/// exactly once when the handle goes out of scope.
fn scan_directory(worker_id: usize, task: &DirectoryTask, ctx: &TraversalContext) -> ScanOutcome {
    let config = &ctx.config;

    // Depth limit
    if let Some(max_depth) = config.max_depth {
        if task.depth as usize > max_depth {
            ctx.counters.record_filtered();
            return ScanOutcome::Skipped;
        }
    }

    // Exclusions
    if config.is_excluded(&task.path) {
        ctx.counters.record_filtered();
        debug!(worker = worker_id, path = %task.path.display(), "Excluded directory");
        return ScanOutcome::Skipped;
    }

    let mut handle = match DirHandle::open(&task.path) {
        Ok(handle) => handle,
        Err(e) => {
            // Not-found is routine on live filesystems; keep it quiet
            if e.is_not_found() {
                debug!(worker = worker_id, path = %task.path.display(), error = %e, "Open failed");
            } else {
                warn!(worker = worker_id, path = %task.path.display(), error = %e, "Open failed");
            }
            ctx.record_skip(task.path.clone(), e);
            return ScanOutcome::Skipped;
        }
    };

    ctx.counters.record_dir();

    let mut entry_count = 0;
    let mut subdir_count = 0;

    loop {
        // Re-check before each read; a cancelled worker closes the handle
        // and stops without touching further entries.
        if ctx.cancel.is_cancelled() {
            return ScanOutcome::Halted;
        }

        let entry = match handle.next_entry() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(e)) => {
                // Entries already processed remain valid; the rest of this
                // directory is abandoned.
                warn!(worker = worker_id, path = %task.path.display(), error = %e, "Read failed");
                ctx.record_skip(task.path.clone(), e);
                break;
            }
        };

        entry_count += 1;
        ctx.counters.record_entry();

        if matcher::matches(&entry, config) {
            let matched_path = handle.child_path(&entry.name);
            match ctx.sink.record(matched_path) {
                RecordOutcome::Recorded => {
                    ctx.counters.record_match();
                }
                RecordOutcome::Won => {
                    // Drain: claim the win, signal everyone, close up
                    ctx.counters.record_match();
                    info!(worker = worker_id, "First match claimed");
                    ctx.cancel.cancel();
                    return ScanOutcome::Halted;
                }
                RecordOutcome::Lost => {
                    // Another worker already claimed the winner slot; a
                    // lost race is discarded, not an error
                    trace!(worker = worker_id, "Match discarded after race loss");
                }
            }
        }

        // Recursion is independent of the match outcome: matching
        // directories are reported above and still descended here.
        if entry.kind.is_dir() {
            subdir_count += 1;
            let child = handle.child_path(&entry.name);
            let child_depth = task.depth + 1;

            let within_depth = config
                .max_depth
                .map(|max| child_depth as usize <= max)
                .unwrap_or(true);

            if within_depth && !config.is_excluded(&child) {
                ctx.frontier.push(DirectoryTask::new(child, child_depth));
            } else {
                ctx.counters.record_filtered();
            }
        }
    }

    ScanOutcome::Scanned {
        entries: entry_count,
        subdirs: subdir_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use std::fs;

    fn context(config: SearchConfig) -> Arc<TraversalContext> {
        Arc::new(TraversalContext::new(config))
    }

    #[test]
    fn test_scan_directory_records_matches_and_queues_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("target.txt"), b"").unwrap();
        fs::write(dir.path().join("other.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let config = SearchConfig::new(dir.path(), "target.txt")
            .unwrap()
            .match_mode(crate::config::MatchMode::Exact);
        let ctx = context(config);

        let task = DirectoryTask::root(dir.path().to_path_buf());
        let outcome = scan_directory(0, &task, &ctx);

        assert!(matches!(
            outcome,
            ScanOutcome::Scanned {
                entries: 3,
                subdirs: 1
            }
        ));
        assert_eq!(ctx.sink.take_matches(), vec![dir.path().join("target.txt")]);

        let queued = ctx.frontier.try_pop().unwrap();
        assert_eq!(queued.path, dir.path().join("sub"));
        assert_eq!(queued.depth, 1);
    }

    #[test]
    fn test_scan_missing_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = SearchConfig::new(dir.path(), "x").unwrap();
        let ctx = context(config);

        let task = DirectoryTask::new(dir.path().join("gone"), 1);
        let outcome = scan_directory(0, &task, &ctx);

        assert!(matches!(outcome, ScanOutcome::Skipped));
        let skips = ctx.take_skips();
        assert_eq!(skips.len(), 1);
        assert!(skips[0].error.is_not_found());
    }

    #[test]
    fn test_cancelled_scan_halts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), b"").unwrap();

        let config = SearchConfig::new(dir.path(), "a").unwrap();
        let ctx = context(config);
        ctx.cancel.cancel();

        let task = DirectoryTask::root(dir.path().to_path_buf());
        let outcome = scan_directory(0, &task, &ctx);
        assert!(matches!(outcome, ScanOutcome::Halted));
        assert!(ctx.sink.take_matches().is_empty());
    }

    #[test]
    fn test_first_match_win_halts_and_cancels() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hit.txt"), b"").unwrap();
        fs::write(dir.path().join("hit2.txt"), b"").unwrap();

        let config = SearchConfig::new(dir.path(), "hit")
            .unwrap()
            .first_match_only(true);
        let ctx = context(config);

        let task = DirectoryTask::root(dir.path().to_path_buf());
        let outcome = scan_directory(0, &task, &ctx);

        assert!(matches!(outcome, ScanOutcome::Halted));
        assert!(ctx.cancel.is_cancelled());
        assert_eq!(ctx.sink.take_matches().len(), 1);
    }

    #[test]
    fn test_depth_limit_stops_queueing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let config = SearchConfig::new(dir.path(), "x").unwrap().max_depth(0);
        let ctx = context(config);

        let task = DirectoryTask::root(dir.path().to_path_buf());
        scan_directory(0, &task, &ctx);

        // Child at depth 1 exceeds max_depth 0, never queued
        assert!(ctx.frontier.try_pop().is_none());
    }
}
