//! Shared frontier of pending directories
//!
//! An unordered, lock-free pool that all workers push to and pop from.
//! Traversal order is not a correctness property - only completeness is -
//! so the pool makes no ordering promise across workers.
//!
//! Termination uses the pending-task counter pattern: `push` increments it,
//! `task_done` decrements it after a claimed directory has been fully
//! processed (children already pushed). The frontier is idle only when the
//! counter hits zero, which cannot happen while any worker still holds a
//! claimed task, so an empty pop never causes a premature exit.

use crossbeam_deque::{Injector, Steal};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// One directory still to be scanned
///
/// Owned by the frontier until a worker claims it; ownership transfers to
/// that worker for the duration of the scan.
#[derive(Debug, Clone)]
pub struct DirectoryTask {
    /// Full path to the directory
    pub path: PathBuf,

    /// Depth from root (0 = root)
    pub depth: u32,
}

impl DirectoryTask {
    pub fn new(path: PathBuf, depth: u32) -> Self {
        Self { path, depth }
    }

    /// Create the root task
    pub fn root(path: PathBuf) -> Self {
        Self { path, depth: 0 }
    }
}

/// Frontier statistics
#[derive(Debug, Default)]
pub struct FrontierStats {
    /// Total tasks pushed
    pub pushed: AtomicU64,

    /// Total tasks popped
    pub popped: AtomicU64,
}

/// Thread-safe pool of pending directory tasks
pub struct Frontier {
    injector: Injector<DirectoryTask>,
    pending: AtomicUsize,
    stats: FrontierStats,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            injector: Injector::new(),
            pending: AtomicUsize::new(0),
            stats: FrontierStats::default(),
        }
    }

    /// Push a directory task, safe from any worker
    pub fn push(&self, task: DirectoryTask) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.stats.pushed.fetch_add(1, Ordering::Relaxed);
        self.injector.push(task);
    }

    /// Try to claim a task without blocking
    ///
    /// Each pushed task is claimed by at most one worker.
    pub fn try_pop(&self) -> Option<DirectoryTask> {
        loop {
            match self.injector.steal() {
                Steal::Success(task) => {
                    self.stats.popped.fetch_add(1, Ordering::Relaxed);
                    return Some(task);
                }
                Steal::Empty => return None,
                Steal::Retry => continue,
            }
        }
    }

    /// Mark a claimed task as fully processed
    ///
    /// Must be called exactly once per successful `try_pop`, after any
    /// child tasks have been pushed.
    pub fn task_done(&self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }

    /// True when every pushed task has been fully processed
    pub fn is_idle(&self) -> bool {
        self.pending.load(Ordering::SeqCst) == 0
    }

    /// Tasks currently queued (claimed-but-unfinished tasks not included)
    pub fn len(&self) -> usize {
        self.injector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.injector.is_empty()
    }

    /// Frontier statistics
    pub fn stats(&self) -> &FrontierStats {
        &self.stats
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
