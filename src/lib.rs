//! dirseek - Concurrent Directory-Tree Name Search
//!
//! A library for searching a directory subtree by entry name. Given a root
//! path and a pattern, dirseek enumerates the subtree with a pool of worker
//! threads and returns the paths whose final component matches the pattern
//! under configurable filters.
//!
//! # Features
//!
//! - **Parallel Traversal**: Worker threads pull pending directories from a
//!   shared lock-free frontier; discovered subdirectories go back onto it.
//!
//! - **Match Filters**: Exact or substring name matching, optionally
//!   restricted to directories or to application files
//!   (.exe/.app/.sh/.desktop).
//!
//! - **First-Match Mode**: An atomic winner slot guarantees at most one
//!   result; the winning worker cancels the rest of the pool.
//!
//! - **Graceful Cancellation**: A shared write-once signal stops every
//!   worker within one directory open/read call, with no leaked handles.
//!
//! - **Skip Diagnostics**: Unreadable directories are skipped, never fatal,
//!   and reported on a side channel so callers can tell "no match" from
//!   "tree partially unreadable".
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       SearchCoordinator                         │
//! │   seed root ──► Frontier ◄── push subdirs ──┐                   │
//! │                    │                        │                   │
//! │                    ▼ pop                    │                   │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐             │
//! │  │Worker 0 │  │Worker 1 │  │Worker 2 │  │Worker N │             │
//! │  │ readdir │  │ readdir │  │ readdir │  │ readdir │             │
//! │  └────┬────┘  └────┬────┘  └────┬────┘  └────┬────┘             │
//! │       │ matches    │            │            │                  │
//! │       └────────────┴─────┬──────┴────────────┘                  │
//! │                          ▼                                      │
//! │            ┌──────────────────────────┐                         │
//! │            │       ResultSink         │                         │
//! │            │  all matches, or a CAS   │                         │
//! │            │  single-winner slot      │                         │
//! │            └──────────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dirseek::{search, MatchMode, SearchConfig};
//!
//! let config = SearchConfig::new("/home", "notes.txt")
//!     .unwrap()
//!     .match_mode(MatchMode::Exact);
//!
//! let outcome = search(config).unwrap();
//! for path in &outcome.matches {
//!     println!("{}", path.display());
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod matcher;
pub mod stream;

pub use config::{FilterMode, MatchMode, SearchConfig};
pub use engine::{
    search, CancelToken, SearchCoordinator, SearchOutcome, SearchProgress, SearchStats,
};
pub use error::{ConfigError, Result, ScanError, SearchError, SkipRecord, WorkerError};
pub use stream::MatchStream;
