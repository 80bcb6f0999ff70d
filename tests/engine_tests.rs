//! Integration tests for the dirseek engine
//!
//! All tests build real directory trees in a tempdir and run full searches
//! against them, across several worker counts where ordering could matter.

use dirseek::{
    search, FilterMode, MatchMode, SearchConfig, SearchCoordinator,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build the reference tree used by several tests:
///
/// ```text
/// root/
///   a/target.txt
///   b/sub/target.txt
///   b/notes.txt
///   bin/            (directory)
///   x/bin           (file)
///   run.sh
/// ```
fn build_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("b/sub")).unwrap();
    fs::create_dir_all(root.join("bin")).unwrap();
    fs::create_dir_all(root.join("x")).unwrap();

    fs::write(root.join("a/target.txt"), b"").unwrap();
    fs::write(root.join("b/sub/target.txt"), b"").unwrap();
    fs::write(root.join("b/notes.txt"), b"").unwrap();
    fs::write(root.join("x/bin"), b"").unwrap();
    fs::write(root.join("run.sh"), b"").unwrap();

    dir
}

fn config(root: &Path, pattern: &str) -> SearchConfig {
    SearchConfig::new(root, pattern).unwrap()
}

fn match_set(outcome: &dirseek::SearchOutcome) -> HashSet<PathBuf> {
    outcome.matches.iter().cloned().collect()
}

#[test]
fn exact_mode_returns_all_byte_equal_names() {
    let dir = build_tree();
    let root = dir.path().canonicalize().unwrap();

    let outcome = search(config(dir.path(), "target.txt").match_mode(MatchMode::Exact)).unwrap();

    let expected: HashSet<_> = [root.join("a/target.txt"), root.join("b/sub/target.txt")]
        .into_iter()
        .collect();
    assert_eq!(match_set(&outcome), expected);
    assert!(outcome.stats.completed);
}

#[test]
fn substring_mode_is_ordinal_and_case_sensitive() {
    let dir = build_tree();
    let root = dir.path().canonicalize().unwrap();

    let outcome =
        search(config(dir.path(), "target").match_mode(MatchMode::Substring)).unwrap();
    let expected: HashSet<_> = [root.join("a/target.txt"), root.join("b/sub/target.txt")]
        .into_iter()
        .collect();
    assert_eq!(match_set(&outcome), expected);

    // Different case does not match
    let outcome =
        search(config(dir.path(), "TARGET").match_mode(MatchMode::Substring)).unwrap();
    assert!(outcome.matches.is_empty());
}

#[test]
fn directories_only_filter_excludes_files_with_matching_names() {
    let dir = build_tree();
    let root = dir.path().canonicalize().unwrap();

    // Both a directory "bin" and a file "x/bin" exist; only the directory
    // may be returned
    let outcome = search(
        config(dir.path(), "bin")
            .match_mode(MatchMode::Exact)
            .filter_mode(FilterMode::DirectoriesOnly),
    )
    .unwrap();

    assert_eq!(match_set(&outcome), HashSet::from([root.join("bin")]));
}

#[test]
fn applications_only_filter_requires_app_extension() {
    let dir = build_tree();
    let root = dir.path().canonicalize().unwrap();

    let outcome = search(
        config(dir.path(), "run")
            .match_mode(MatchMode::Substring)
            .filter_mode(FilterMode::ApplicationsOnly),
    )
    .unwrap();

    assert_eq!(match_set(&outcome), HashSet::from([root.join("run.sh")]));
}

#[test]
fn application_extension_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Setup.EXE"), b"").unwrap();
    fs::write(dir.path().join("Setup.txt"), b"").unwrap();
    let root = dir.path().canonicalize().unwrap();

    let outcome = search(
        config(dir.path(), "Setup")
            .match_mode(MatchMode::Substring)
            .filter_mode(FilterMode::ApplicationsOnly),
    )
    .unwrap();

    assert_eq!(match_set(&outcome), HashSet::from([root.join("Setup.EXE")]));
}

#[test]
fn matching_directories_are_reported_and_descended() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/src")).unwrap();
    fs::write(dir.path().join("src/src/inner.txt"), b"").unwrap();
    let root = dir.path().canonicalize().unwrap();

    let outcome = search(config(dir.path(), "src").match_mode(MatchMode::Exact)).unwrap();

    // Both the matching directory and its matching child are found, which
    // proves the matched directory was still descended into
    let expected: HashSet<_> = [root.join("src"), root.join("src/src")]
        .into_iter()
        .collect();
    assert_eq!(match_set(&outcome), expected);
}

#[test]
fn first_match_mode_returns_exactly_one_of_the_candidates() {
    let dir = build_tree();
    let root = dir.path().canonicalize().unwrap();

    let outcome = search(
        config(dir.path(), "target.txt")
            .match_mode(MatchMode::Exact)
            .first_match_only(true)
            .worker_count(4),
    )
    .unwrap();

    assert_eq!(outcome.matches.len(), 1);
    let winner = outcome.first().unwrap();
    assert!(
        *winner == root.join("a/target.txt") || *winner == root.join("b/sub/target.txt"),
        "unexpected winner: {}",
        winner.display()
    );
    // A first-match win still counts as a completed run
    assert!(outcome.stats.completed);
}

#[test]
fn first_match_mode_with_no_candidates_returns_none() {
    let dir = build_tree();

    let outcome = search(
        config(dir.path(), "no-such-name")
            .match_mode(MatchMode::Exact)
            .first_match_only(true),
    )
    .unwrap();

    assert!(outcome.first().is_none());
    assert!(outcome.stats.completed);
}

#[test]
fn result_set_is_identical_across_worker_counts() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    // A wider tree so several workers actually interleave
    for i in 0..8 {
        let branch = root.join(format!("branch-{i}"));
        fs::create_dir_all(branch.join("deep/deeper")).unwrap();
        fs::write(branch.join("hit.log"), b"").unwrap();
        fs::write(branch.join("deep/hit.log"), b"").unwrap();
        fs::write(branch.join("deep/deeper/hit.log"), b"").unwrap();
        fs::write(branch.join("deep/miss.txt"), b"").unwrap();
    }

    let baseline = match_set(
        &search(config(root, "hit.log").match_mode(MatchMode::Exact).worker_count(1)).unwrap(),
    );
    assert_eq!(baseline.len(), 24);

    for workers in [2, num_cpus::get().max(2)] {
        let outcome = search(
            config(root, "hit.log")
                .match_mode(MatchMode::Exact)
                .worker_count(workers),
        )
        .unwrap();
        assert_eq!(match_set(&outcome), baseline, "workers = {workers}");
    }
}

#[test]
fn completeness_every_reachable_directory_is_scanned_once() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let mut dir_count = 1u64; // the root itself
    for i in 0..5 {
        for j in 0..4 {
            fs::create_dir_all(root.join(format!("d{i}/s{j}"))).unwrap();
        }
        dir_count += 5; // d{i} plus its four children
    }

    let outcome = search(config(root, "nothing-matches").worker_count(4)).unwrap();

    assert!(outcome.matches.is_empty());
    assert!(outcome.skipped.is_empty());
    // dirs_scanned counts successful opens; at-most-once per directory and
    // completeness together pin it to exactly the reachable count
    assert_eq!(outcome.stats.dirs_scanned, dir_count);
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_skipped_not_fatal() {
    use std::os::unix::fs::PermissionsExt;

    // Mode bits do not restrict root
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir(root.join("locked")).unwrap();
    fs::create_dir(root.join("open")).unwrap();
    fs::write(root.join("open/file.txt"), b"").unwrap();
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

    let outcome = search(config(root, "file.txt").match_mode(MatchMode::Exact)).unwrap();

    // Restore permissions so the tempdir can be cleaned up
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

    let canon = root.canonicalize().unwrap();
    assert_eq!(match_set(&outcome), HashSet::from([canon.join("open/file.txt")]));
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, canon.join("locked"));
    assert_eq!(outcome.stats.errors, 1);
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir(root.join("real")).unwrap();
    fs::write(root.join("real/inside.txt"), b"").unwrap();
    std::os::unix::fs::symlink(root.join("real"), root.join("alias")).unwrap();

    let outcome = search(config(root, "inside.txt").match_mode(MatchMode::Exact)).unwrap();

    // Found once through the real directory, never through the symlink
    assert_eq!(outcome.matches.len(), 1);
}

#[test]
fn external_cancellation_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("hit.txt"), b"").unwrap();

    let coordinator = SearchCoordinator::new(config(dir.path(), "hit")).unwrap();
    let token = coordinator.cancel_token();
    token.cancel();

    let outcome = coordinator.run().unwrap();
    assert!(!outcome.stats.completed);
}

#[test]
fn max_depth_bounds_the_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("l1/l2/l3")).unwrap();
    fs::write(root.join("hit.txt"), b"").unwrap();
    fs::write(root.join("l1/hit.txt"), b"").unwrap();
    fs::write(root.join("l1/l2/hit.txt"), b"").unwrap();
    fs::write(root.join("l1/l2/l3/hit.txt"), b"").unwrap();

    let outcome = search(
        config(root, "hit.txt")
            .match_mode(MatchMode::Exact)
            .max_depth(1),
    )
    .unwrap();

    // Root (depth 0) and l1 (depth 1) are scanned; l2 is not
    let canon = root.canonicalize().unwrap();
    let expected: HashSet<_> = [canon.join("hit.txt"), canon.join("l1/hit.txt")]
        .into_iter()
        .collect();
    assert_eq!(match_set(&outcome), expected);
}

#[test]
fn exclude_patterns_prune_subtrees() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("keep")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("keep/hit.txt"), b"").unwrap();
    fs::write(root.join("node_modules/pkg/hit.txt"), b"").unwrap();

    let outcome = search(
        config(root, "hit.txt")
            .match_mode(MatchMode::Exact)
            .exclude("node_modules")
            .unwrap(),
    )
    .unwrap();

    let canon = root.canonicalize().unwrap();
    assert_eq!(match_set(&outcome), HashSet::from([canon.join("keep/hit.txt")]));
}

#[test]
fn skipped_diagnostics_distinguish_empty_from_unreadable() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = search(config(dir.path(), "anything")).unwrap();
    // Nothing matched and nothing was skipped: a genuine empty result
    assert!(outcome.matches.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn results_are_absolute_paths() {
    let dir = build_tree();

    let outcome = search(config(dir.path(), "notes.txt").match_mode(MatchMode::Exact)).unwrap();
    assert_eq!(outcome.matches.len(), 1);
    assert!(outcome.matches[0].is_absolute());
}
