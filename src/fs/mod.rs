//! Directory entry reading
//!
//! Wraps the OS open-directory / read-entry / close-directory calls behind
//! an owned handle type. The handle is released exactly once on every exit
//! path (normal exhaustion, read error, or an early break), which is what
//! keeps descriptor usage bounded during a parallel traversal.

pub mod reader;
pub mod types;

pub use reader::DirHandle;
pub use types::{Entry, EntryKind};
