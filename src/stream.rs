//! Lazy sequential match stream
//!
//! A single-producer alternative to the parallel engine: one thread walks
//! the tree depth-first with an explicit stack and feeds matches through a
//! bounded channel. The consumer pulls matches lazily via `Iterator`; the
//! stream is finite, single-consumer, and not restartable.
//!
//! Dropping the stream stops the producer promptly - first-match semantics
//! fall out of taking one item and dropping the rest.

use crate::config::SearchConfig;
use crate::engine::{CancelToken, DirectoryTask};
use crate::error::{ConfigError, Result, SearchError};
use crate::fs::DirHandle;
use crate::matcher;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Buffered matches between producer and consumer
const STREAM_BUFFER: usize = 64;

/// A lazy, finite sequence of matched paths
pub struct MatchStream {
    rx: Receiver<PathBuf>,
    cancel: CancelToken,
    producer: Option<JoinHandle<()>>,
}

impl MatchStream {
    /// Start a sequential search, returning matches as they are found
    pub fn spawn(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let root = config.root.canonicalize().map_err(|e| {
            SearchError::Config(ConfigError::InvalidRoot {
                path: config.root.clone(),
                reason: e.to_string(),
            })
        })?;

        let (tx, rx) = bounded(STREAM_BUFFER);
        let cancel = CancelToken::new();
        let producer_cancel = cancel.clone();

        let producer = thread::Builder::new()
            .name("seeker-stream".to_string())
            .spawn(move || produce(config, root, tx, producer_cancel))
            .map_err(|e| {
                SearchError::Worker(crate::error::WorkerError::SpawnFailed {
                    id: 0,
                    reason: e.to_string(),
                })
            })?;

        Ok(Self {
            rx,
            cancel,
            producer: Some(producer),
        })
    }
}

impl Iterator for MatchStream {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        self.rx.recv().ok()
    }
}

impl Drop for MatchStream {
    fn drop(&mut self) {
        self.cancel.cancel();
        // Unblock a producer waiting on a full buffer; it observes the
        // cancellation on its next iteration.
        while self.rx.try_recv().is_ok() {}
        if let Some(handle) = self.producer.take() {
            let _ = handle.join();
        }
    }
}

/// Depth-first producer loop
fn produce(config: SearchConfig, root: PathBuf, tx: Sender<PathBuf>, cancel: CancelToken) {
    let mut stack = vec![DirectoryTask::root(root)];

    while let Some(task) = stack.pop() {
        if cancel.is_cancelled() {
            break;
        }

        if let Some(max_depth) = config.max_depth {
            if task.depth as usize > max_depth {
                continue;
            }
        }
        if config.is_excluded(&task.path) {
            continue;
        }

        let mut handle = match DirHandle::open(&task.path) {
            Ok(handle) => handle,
            Err(e) => {
                if e.is_not_found() {
                    debug!(path = %task.path.display(), error = %e, "Open failed");
                } else {
                    warn!(path = %task.path.display(), error = %e, "Open failed");
                }
                continue;
            }
        };

        loop {
            if cancel.is_cancelled() {
                return;
            }

            let entry = match handle.next_entry() {
                None => break,
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    warn!(path = %task.path.display(), error = %e, "Read failed");
                    break;
                }
            };

            if matcher::matches(&entry, &config) {
                // A disconnected send means the consumer is gone; stop.
                if tx.send(handle.child_path(&entry.name)).is_err() {
                    return;
                }
            }

            if entry.kind.is_dir() {
                stack.push(DirectoryTask::new(
                    handle.child_path(&entry.name),
                    task.depth + 1,
                ));
            }
        }
    }
}
