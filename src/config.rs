//! Configuration types for dirseek
//!
//! This module defines:
//! - The immutable per-traversal `SearchConfig`
//! - Match and filter mode enums
//! - Validation of worker counts, patterns, and exclusions

use crate::error::ConfigError;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// How the pattern is compared against an entry name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Name must be byte-equal to the pattern
    Exact,
    /// Pattern must occur as an ordinal, case-sensitive substring of the name
    #[default]
    Substring,
}

/// Which entry kinds are eligible to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Any entry kind
    #[default]
    Any,
    /// Only directories
    DirectoriesOnly,
    /// Only non-directories with an application extension
    /// (.exe, .app, .sh, .desktop - compared case-insensitively)
    ApplicationsOnly,
}

/// Validated, immutable configuration for one traversal
///
/// A `SearchConfig` is created once per search invocation and shared
/// read-only across all workers. No configuration state survives the
/// invocation.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Root directory to search from
    pub root: PathBuf,

    /// Name pattern to match against entry names
    pub pattern: String,

    /// How the pattern is compared
    pub match_mode: MatchMode,

    /// Which entry kinds are eligible
    pub filter_mode: FilterMode,

    /// Stop the whole pool as soon as any one match is claimed
    pub first_match_only: bool,

    /// Number of worker threads
    pub worker_count: usize,

    /// Maximum traversal depth (root children are depth 1)
    pub max_depth: Option<usize>,

    /// Compiled exclude patterns; matching directories are not scanned
    pub exclude_patterns: Vec<Regex>,
}

impl SearchConfig {
    /// Create a validated configuration with default modes
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Result<Self, ConfigError> {
        let root = root.into();
        let pattern = pattern.into();

        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }

        Ok(Self {
            root,
            pattern,
            match_mode: MatchMode::default(),
            filter_mode: FilterMode::default(),
            first_match_only: false,
            worker_count: default_workers(),
            max_depth: None,
            exclude_patterns: Vec::new(),
        })
    }

    /// Set the match mode
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the filter mode
    pub fn filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    /// Stop after the first claimed match
    pub fn first_match_only(mut self, enabled: bool) -> Self {
        self.first_match_only = enabled;
        self
    }

    /// Set the worker count (validated by [`SearchConfig::validate`])
    pub fn worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Limit traversal depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Add an exclude pattern (regex matched against full directory paths)
    pub fn exclude(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let re = Regex::new(pattern).map_err(|e| ConfigError::InvalidExcludePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.exclude_patterns.push(re);
        Ok(self)
    }

    /// Validate the configuration before a traversal starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }

        if self.worker_count == 0 || self.worker_count > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: self.worker_count,
                max: MAX_WORKERS,
            });
        }

        if !self.root.is_dir() {
            return Err(ConfigError::InvalidRoot {
                path: self.root.clone(),
                reason: "not an existing directory".into(),
            });
        }

        Ok(())
    }

    /// Check if a directory path should be excluded from scanning
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude_patterns.is_empty() {
            return false;
        }
        let path = path.to_string_lossy();
        self.exclude_patterns.iter().any(|re| re.is_match(&path))
    }
}

fn default_workers() -> usize {
    // Directory reads are I/O bound but short; one worker per core is enough
    num_cpus::get().max(1)
}
