//! Error types for dirseek
//!
//! This module defines the error hierarchy for the search engine:
//! - Per-directory scan errors (open/read failures)
//! - Configuration errors
//! - Worker thread errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Per-directory failures are recoverable: the directory is skipped
//!   and the traversal continues
//! - Nothing inside a running traversal escalates to aborting the search

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the dirseek library
#[derive(Error, Debug)]
pub enum SearchError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// Per-directory scan errors
///
/// These cover the open and read failures a worker can hit on a single
/// directory. All of them are skip-and-continue: the directory is recorded
/// in the skip log and the worker moves on to the next frontier item.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Permission denied opening or reading the directory (EACCES)
    #[error("Permission denied: '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Directory disappeared between discovery and open (ENOENT)
    #[error("Path not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Path exists but is not a directory (ENOTDIR)
    #[error("Not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    /// Process or system file descriptor limit reached (EMFILE/ENFILE)
    #[error("Too many open files while opening '{path}'")]
    TooManyOpenFiles { path: PathBuf },

    /// Read failed partway through the directory; entries already yielded
    /// remain valid, the remainder is abandoned
    #[error("Failed to read directory '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure on open
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an open failure by its OS error
    pub fn from_open(path: PathBuf, err: io::Error) -> Self {
        if let Some(code) = err.raw_os_error() {
            if code == libc::EMFILE || code == libc::ENFILE {
                return ScanError::TooManyOpenFiles { path };
            }
        }
        match err.kind() {
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            io::ErrorKind::NotFound => ScanError::NotFound { path },
            io::ErrorKind::NotADirectory => ScanError::NotADirectory { path },
            _ => ScanError::Io { path, source: err },
        }
    }

    /// Check if this error is recoverable (directory can be skipped)
    ///
    /// Every enumerated scan failure is recoverable; the traversal has no
    /// fatal error path in normal operation.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// The path this error was raised for
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::PermissionDenied { path }
            | ScanError::NotFound { path }
            | ScanError::NotADirectory { path }
            | ScanError::TooManyOpenFiles { path }
            | ScanError::ReadFailed { path, .. }
            | ScanError::Io { path, .. } => path,
        }
    }

    /// True for the ENOENT case, which is common on live filesystems and
    /// logged quieter than other skips
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScanError::NotFound { .. })
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Empty search pattern
    #[error("Search pattern must not be empty")]
    EmptyPattern,

    /// Root path error
    #[error("Invalid search root '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    /// Invalid exclude pattern
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern { pattern: String, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// Worker initialization failed
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },
}

/// Result type alias for SearchError
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for ScanError
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// A directory that was skipped during traversal, with the reason
///
/// Skips are a diagnostics side channel: the engine records them and the
/// caller decides whether "zero results" meant "nothing matched" or "parts
/// of the tree were unreadable".
#[derive(Debug)]
pub struct SkipRecord {
    /// Directory that was not (fully) scanned
    pub path: PathBuf,

    /// Why it was skipped
    pub error: ScanError,
}

impl SkipRecord {
    pub fn new(path: PathBuf, error: ScanError) -> Self {
        Self { path, error }
    }
}
