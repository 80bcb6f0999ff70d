//! Filesystem entry types
//!
//! These types represent one directory member as reported by the OS read
//! call. They are transient: produced by the reader, consumed by the match
//! predicate, never stored beyond that.

use std::fs::FileType;

/// Kind of filesystem entry
///
/// The engine only distinguishes what it acts on: directories are descended
/// into, everything else is match-only. Symlinks are deliberately `Other` -
/// they are never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symlink, socket, device, fifo, or unknown
    Other,
}

impl EntryKind {
    /// Classify from the type tag the OS read call reports inline
    ///
    /// `FileType` comes from the directory entry itself (d_type where the
    /// filesystem provides it), so no extra metadata call is made per entry.
    /// It does not follow symlinks.
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        *self == EntryKind::Directory
    }
}

/// One directory member with its name and kind tag
#[derive(Debug, Clone)]
pub struct Entry {
    /// Final path component, lossily converted to UTF-8
    pub name: String,

    /// Entry kind from the inline type tag
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(name: String, kind: EntryKind) -> Self {
        Self { name, kind }
    }
}
