//! Owned directory handle
//!
//! `DirHandle` is the scoped-acquisition wrapper around the OS directory
//! stream. Opening classifies failures into the skip-and-continue taxonomy
//! (`ENOENT`, `EACCES`, `ENOTDIR`, `EMFILE` and friends); iteration yields
//! `Entry` values until exhaustion or a read error. The underlying stream
//! is closed when the handle is dropped, so every control-flow exit from a
//! scan - including cancellation and the first-match shortcut - releases
//! the descriptor exactly once.

use crate::error::{ScanError, ScanResult};
use crate::fs::types::{Entry, EntryKind};
use std::fs::ReadDir;
use std::path::{Path, PathBuf};
use tracing::trace;

/// An open directory being iterated
///
/// The `.` and `..` entries are never yielded by the underlying OS
/// abstraction, so nothing special-cases them downstream.
pub struct DirHandle {
    path: PathBuf,
    inner: ReadDir,
}

impl DirHandle {
    /// Open a directory for entry reading
    ///
    /// Failures are classified per-errno; all of them are recoverable from
    /// the traversal's point of view.
    pub fn open(path: &Path) -> ScanResult<Self> {
        match std::fs::read_dir(path) {
            Ok(inner) => {
                trace!(path = %path.display(), "Directory opened");
                Ok(Self {
                    path: path.to_path_buf(),
                    inner,
                })
            }
            Err(e) => Err(ScanError::from_open(path.to_path_buf(), e)),
        }
    }

    /// The directory this handle reads
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next entry
    ///
    /// Returns `None` at end of stream. A read error terminates iteration
    /// of this directory only; entries already yielded remain valid.
    pub fn next_entry(&mut self) -> Option<ScanResult<Entry>> {
        let dirent = match self.inner.next()? {
            Ok(d) => d,
            Err(e) => {
                return Some(Err(ScanError::ReadFailed {
                    path: self.path.clone(),
                    source: e,
                }));
            }
        };

        // The kind comes from the entry's inline type tag; a failure here
        // (racing unlink, exotic filesystem) degrades to Other rather than
        // aborting the directory.
        let kind = dirent
            .file_type()
            .map(EntryKind::from_file_type)
            .unwrap_or(EntryKind::Other);

        let name = dirent.file_name().to_string_lossy().into_owned();

        Some(Ok(Entry::new(name, kind)))
    }

    /// Full path of a child entry of this directory
    pub fn child_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl std::fmt::Debug for DirHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirHandle")
            .field("path", &self.path)
            .finish()
    }
}
