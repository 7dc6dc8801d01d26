use path_clean::PathClean;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use super::graph::ReachableSet;
use super::scanner::FileScanner;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UsageReport {
    pub used_files: Vec<PathBuf>,
    pub unused_files: Vec<PathBuf>,
    pub used_dirs: Vec<PathBuf>,
    /// Only the outermost unused directories
    pub unused_dirs: Vec<PathBuf>,
}

/// Splits every file and directory under `root` into used and unused.
///
/// A directory is unused when no file beneath it, at any depth, is reachable.
pub fn classify_usage(root: &Path, reachable: &ReachableSet) -> UsageReport {
    let scanner = FileScanner::new();
    let mut report = UsageReport::default();

    for file in scanner.list_files(root) {
        if reachable.contains(&file) {
            report.used_files.push(file);
        } else {
            report.unused_files.push(file);
        }
    }

    let mut unused_dirs = Vec::new();
    for dir in scanner.list_directories(root) {
        if dir_is_unused(&dir, reachable) {
            unused_dirs.push(dir);
        } else {
            report.used_dirs.push(dir);
        }
    }
    report.unused_dirs = remove_contained_directories(unused_dirs);

    report
}

pub fn dir_is_unused(dir: &Path, reachable: &ReachableSet) -> bool {
    !reachable.iter().any(|file| file.starts_with(dir))
}

/// Keeps only directories that are not nested inside another directory of the list
pub fn remove_contained_directories(directories: Vec<PathBuf>) -> Vec<PathBuf> {
    directories
        .iter()
        .filter(|dir| {
            !directories
                .iter()
                .any(|other| other != *dir && dir.starts_with(other))
        })
        .cloned()
        .collect()
}

/// Files under `root/relative_dir` whose usage matches `used`.
///
/// Returns None, after reporting an error, when the directory does not exist.
pub fn files_in_directory(
    root: &Path,
    relative_dir: &str,
    reachable: &ReachableSet,
    used: bool,
    sink: &impl DiagnosticSink,
) -> Option<(PathBuf, Vec<PathBuf>)> {
    let dir = root.join(relative_dir).clean();
    if !dir.is_dir() {
        sink.emit(
            Diagnostic::error(
                DiagnosticKind::MissingDirectory,
                format!("Directory path doesn't exist: {}", dir.display()),
            )
            .with_path(&dir),
        );
        return None;
    }

    let files = FileScanner::new()
        .list_files(&dir)
        .into_iter()
        .filter(|file| reachable.contains(file) == used)
        .collect();
    Some((dir, files))
}
