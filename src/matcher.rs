//! Match predicate
//!
//! The pure decision of whether one directory entry satisfies the active
//! query. Filter-mode gates run first, then the name test. Note the
//! deliberate asymmetry: name matching is byte-exact / ordinal
//! case-sensitive, while the application extension check is ASCII
//! case-insensitive. Directory recursion is decided elsewhere and is
//! independent of the match outcome.

use crate::config::{FilterMode, MatchMode, SearchConfig};
use crate::fs::Entry;

/// Extensions recognized as applications (compared case-insensitively)
const APP_EXTENSIONS: &[&str] = &["exe", "app", "sh", "desktop"];

/// Decide whether an entry satisfies the query
pub fn matches(entry: &Entry, config: &SearchConfig) -> bool {
    match config.filter_mode {
        FilterMode::Any => {}
        FilterMode::DirectoriesOnly => {
            if !entry.kind.is_dir() {
                return false;
            }
        }
        FilterMode::ApplicationsOnly => {
            if entry.kind.is_dir() || !has_app_extension(&entry.name) {
                return false;
            }
        }
    }

    match config.match_mode {
        MatchMode::Exact => entry.name == config.pattern,
        MatchMode::Substring => entry.name.contains(&config.pattern),
    }
}

/// Check if a name ends in one of the application extensions
fn has_app_extension(name: &str) -> bool {
    let Some(idx) = name.rfind('.') else {
        return false;
    };
    let ext = &name[idx + 1..];
    APP_EXTENSIONS.iter().any(|app| ext.eq_ignore_ascii_case(app))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::EntryKind;

    fn config(pattern: &str, match_mode: MatchMode, filter_mode: FilterMode) -> SearchConfig {
        SearchConfig::new("/tmp", pattern)
            .unwrap()
            .match_mode(match_mode)
            .filter_mode(filter_mode)
    }

    fn file(name: &str) -> Entry {
        Entry::new(name.into(), EntryKind::File)
    }

    fn dir(name: &str) -> Entry {
        Entry::new(name.into(), EntryKind::Directory)
    }

    #[test]
    fn test_exact_match() {
        let cfg = config("target.txt", MatchMode::Exact, FilterMode::Any);
        assert!(matches(&file("target.txt"), &cfg));
        assert!(!matches(&file("target.txt.bak"), &cfg));
        assert!(!matches(&file("Target.txt"), &cfg));
    }

    #[test]
    fn test_substring_match_is_case_sensitive() {
        let cfg = config("arg", MatchMode::Substring, FilterMode::Any);
        assert!(matches(&file("target.txt"), &cfg));
        assert!(!matches(&file("TARGET.TXT"), &cfg));
    }

    #[test]
    fn test_directories_only() {
        let cfg = config("bin", MatchMode::Exact, FilterMode::DirectoriesOnly);
        assert!(matches(&dir("bin"), &cfg));
        assert!(!matches(&file("bin"), &cfg));
        assert!(!matches(&Entry::new("bin".into(), EntryKind::Other), &cfg));
    }

    #[test]
    fn test_applications_only() {
        let cfg = config("run", MatchMode::Substring, FilterMode::ApplicationsOnly);
        assert!(matches(&file("run.sh"), &cfg));
        assert!(matches(&file("run.SH"), &cfg));
        assert!(matches(&file("runner.desktop"), &cfg));
        assert!(!matches(&file("run.txt"), &cfg));
        assert!(!matches(&file("run"), &cfg));
        assert!(!matches(&dir("run.sh"), &cfg));
    }

    #[test]
    fn test_application_extension_set() {
        assert!(has_app_extension("setup.exe"));
        assert!(has_app_extension("Setup.EXE"));
        assert!(has_app_extension("Finder.app"));
        assert!(has_app_extension("launcher.desktop"));
        assert!(!has_app_extension("notes.txt"));
        assert!(!has_app_extension("no-extension"));
        assert!(!has_app_extension("archive.tar.gz"));
    }

    #[test]
    fn test_matching_directory_under_any() {
        // Directories are reported as matches and descended independently
        let cfg = config("src", MatchMode::Exact, FilterMode::Any);
        assert!(matches(&dir("src"), &cfg));
    }
}
