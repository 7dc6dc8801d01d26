use anyhow::{Context, Result};
use petgraph::visit::EdgeRef;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{DependencyClosure, Diagnostic, FileScanner, UsageReport};

/// Machine-readable report with root-relative, slash-separated paths
pub struct JsonCompactFormatter {
    file_scanner: FileScanner,
    /// Include the reference edges and diagnostics, not just the file lists
    include_details: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self {
            file_scanner: FileScanner::new(),
            include_details: true,
        }
    }

    pub fn with_details(mut self, include_details: bool) -> Self {
        self.include_details = include_details;
        self
    }

    pub fn format_to_file(
        &self,
        root: &Path,
        closure: &DependencyClosure,
        usage: &UsageReport,
        diagnostics: &[Diagnostic],
        output_path: &Path,
    ) -> Result<()> {
        let json_content = self.format_report(root, closure, usage, diagnostics)?;
        fs::write(output_path, json_content)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_report(
        &self,
        root: &Path,
        closure: &DependencyClosure,
        usage: &UsageReport,
        diagnostics: &[Diagnostic],
    ) -> Result<String> {
        let unused_kb: f64 = usage
            .unused_files
            .iter()
            .map(|file| self.file_scanner.file_size_kb(file))
            .sum();
        let project_kb = self.file_scanner.directory_size_kb(root);

        let mut output = json!({
            "meta": {
                "root": root.to_string_lossy(),
                "files": usage.used_files.len() + usage.unused_files.len(),
                "used": usage.used_files.len(),
                "unused": usage.unused_files.len(),
                "projectKb": round2(project_kb),
                "unusedKb": round2(unused_kb),
            },
            "usedFiles": relative_slash_paths(root, &usage.used_files),
            "unusedFiles": relative_slash_paths(root, &usage.unused_files),
            "unusedDirs": relative_slash_paths(root, &usage.unused_dirs),
        });

        if self.include_details {
            let graph = &closure.graph;
            let mut edges: Vec<(String, String)> = graph
                .edge_references()
                .map(|edge| {
                    (
                        relative_slash_path(root, &graph[edge.source()].path),
                        relative_slash_path(root, &graph[edge.target()].path),
                    )
                })
                .collect();
            edges.sort();

            output["edges"] = json!(edges
                .into_iter()
                .map(|(source, target)| json!([source, target]))
                .collect::<Vec<_>>());
            output["diagnostics"] = serde_json::to_value(diagnostics)?;
        }

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let shown = path.strip_prefix(root).unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}

fn relative_slash_paths(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| relative_slash_path(root, path))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
