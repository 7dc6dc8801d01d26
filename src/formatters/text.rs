use rayon::prelude::*;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::config::extension_of;
use crate::core::{FileScanner, UsageReport};

const SIZE_UNITS: [&str; 4] = ["kb", "mb", "gb", "tb"];

/// Renders a size given in kilobytes, e.g. `1.50 mb`.
pub fn size_to_string(size_kb: f64) -> String {
    let mut size = size_kb;
    let mut unit = 0;
    while size > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, SIZE_UNITS[unit])
}

/// Plain-text reports for a terminal
pub struct TextFormatter {
    file_scanner: FileScanner,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            file_scanner: FileScanner::new(),
        }
    }

    /// Unused files, largest first, down to `threshold_kb`.
    /// Files with an extension in `exclude_extensions` are counted but not listed.
    pub fn write_unused_files(
        &self,
        out: &mut impl Write,
        root: &Path,
        usage: &UsageReport,
        threshold_kb: f64,
        exclude_extensions: &BTreeSet<String>,
    ) -> io::Result<()> {
        let sized = self.sorted_by_size(&usage.unused_files, |path| {
            self.file_scanner.file_size_kb(path)
        });
        let unused_kb: f64 = sized.iter().map(|(size, _)| size).sum();
        let project_kb = self.file_scanner.directory_size_kb(root);

        writeln!(
            out,
            "Size of unused files: {} (out of {})",
            size_to_string(unused_kb),
            size_to_string(project_kb)
        )?;
        writeln!(
            out,
            "Showing list of unused files above {}:",
            size_to_string(threshold_kb)
        )?;

        for (size, file) in &sized {
            if *size < threshold_kb {
                break;
            }
            if extension_of(file).is_some_and(|ext| exclude_extensions.contains(ext)) {
                continue;
            }
            writeln!(out, "{}: {}", size_to_string(*size), file.display())?;
        }
        Ok(())
    }

    pub fn write_unused_directories(
        &self,
        out: &mut impl Write,
        usage: &UsageReport,
    ) -> io::Result<()> {
        writeln!(out, "Unused directories:")?;
        let sized = self.sorted_by_size(&usage.unused_dirs, |dir| {
            self.file_scanner.directory_size_kb(dir)
        });
        for (size, dir) in &sized {
            writeln!(out, "{}: {}", size_to_string(*size), dir.display())?;
        }
        Ok(())
    }

    pub fn write_directory_files(
        &self,
        out: &mut impl Write,
        dir: &Path,
        files: &[PathBuf],
        used: bool,
    ) -> io::Result<()> {
        let label = if used { "Used" } else { "Unused" };
        if files.is_empty() {
            let what = if used { "dependency files" } else { "unused files" };
            return writeln!(out, "The directory {} doesn't contain {}.", dir.display(), what);
        }

        writeln!(out, "{} files in {}:", label, dir.display())?;
        for file in files {
            writeln!(out, "{}", file.display())?;
        }
        Ok(())
    }

    fn sorted_by_size<F>(&self, paths: &[PathBuf], size_of: F) -> Vec<(f64, PathBuf)>
    where
        F: Fn(&Path) -> f64 + Sync,
    {
        let mut sized: Vec<(f64, PathBuf)> = paths
            .par_iter()
            .map(|path| (size_of(path.as_path()), path.clone()))
            .collect();
        sized.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        sized
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}
