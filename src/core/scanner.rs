use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::config::extension_of;

/// Filesystem walks shared by the resolver and the reports.
pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Every file beneath `root`, symlinked files included, in walk order
    pub fn list_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }

    /// Every directory strictly beneath `root`
    pub fn list_directories(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| entry.into_path())
            .collect()
    }

    /// Extensions (without the dot) of all files under `root`. Extensionless files are skipped.
    pub fn collect_extensions(&self, root: &Path) -> BTreeSet<String> {
        self.list_files(root)
            .iter()
            .filter_map(|path| extension_of(path))
            .map(str::to_string)
            .collect()
    }

    pub fn file_size_kb(&self, path: &Path) -> f64 {
        fs::metadata(path)
            .map(|metadata| metadata.len() as f64 / 1024.0)
            .unwrap_or(0.0)
    }

    pub fn directory_size_kb(&self, dir: &Path) -> f64 {
        self.list_files(dir)
            .par_iter()
            .map(|path| self.file_size_kb(path))
            .sum()
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
