//! Parallel traversal engine
//!
//! # Architecture
//!
//! ```text
//!                   ┌───────────────────────────┐
//!                   │     SearchCoordinator     │
//!                   │  - seeds frontier w/ root │
//!                   │  - spawns / joins workers │
//!                   └─────────────┬─────────────┘
//!                                 │
//!        ┌────────────────────────┼────────────────────────┐
//!        │                        │                        │
//!  ┌─────▼─────┐            ┌─────▼─────┐            ┌─────▼─────┐
//!  │ Worker 0  │            │ Worker 1  │            │ Worker N  │
//!  │ pop dir   │            │ pop dir   │            │ pop dir   │
//!  │ read+match│            │ read+match│            │ read+match│
//!  │ push subs │            │ push subs │            │ push subs │
//!  └─────┬─────┘            └─────┬─────┘            └─────┬─────┘
//!        │                        │                        │
//!        └───────────┬────────────┴───────────┬────────────┘
//!                    │                        │
//!         ┌──────────▼──────────┐  ┌──────────▼──────────┐
//!         │      Frontier       │  │     ResultSink      │
//!         │ (unordered pool +   │  │ (collection, or     │
//!         │  pending counter)   │  │  CAS winner slot)   │
//!         └─────────────────────┘  └─────────────────────┘
//! ```
//!
//! Workers stop when the frontier is idle (normal completion) or when the
//! shared cancellation signal fires - set externally by the caller, or
//! internally by whichever worker wins the first-match race.

pub mod context;
pub mod coordinator;
pub mod frontier;
pub mod sink;
pub mod worker;

pub use context::{CancelToken, SearchCounters, TraversalContext};
pub use coordinator::{search, SearchCoordinator, SearchOutcome, SearchProgress, SearchStats};
pub use frontier::{DirectoryTask, Frontier};
pub use sink::{RecordOutcome, ResultSink};
