use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::config::{extension_of, ResolverConfig};
use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use super::graph::{GraphBuilder, ReachableSet, ReferenceGraph};
use super::resolver::PathResolver;
use super::scanner::FileScanner;
use crate::parsers::common::{read_source, ReferencePattern};
use crate::parsers::ExtractorFactory;

/// Everything a single resolve run produces
#[derive(Debug, Clone)]
pub struct DependencyClosure {
    pub reachable: ReachableSet,
    pub graph: ReferenceGraph,
    /// Files whose contents were scanned, in scan order
    pub scanned: Vec<PathBuf>,
}

impl DependencyClosure {
    pub fn is_used(&self, path: &Path) -> bool {
        self.reachable.contains(path)
    }
}

pub struct DependencyAnalyzer {
    config: ResolverConfig,
    file_scanner: FileScanner,
}

impl DependencyAnalyzer {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            file_scanner: FileScanner::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Computes the set of files reachable from the configured entry points.
    /// Never fails; every anomaly goes to `sink`.
    pub fn analyze(&self, sink: &impl DiagnosticSink) -> DependencyClosure {
        let mut run = ResolveRun::new(&self.config, &self.file_scanner, sink);
        for entry in &self.config.entry_points {
            run.process_entry_point(entry);
        }
        run.finish()
    }

    /// Outgoing references of one file, resolved but not yet checked for existence
    pub fn scan_file(&self, path: &Path, sink: &impl DiagnosticSink) -> BTreeSet<PathBuf> {
        let run = ResolveRun::new(&self.config, &self.file_scanner, sink);
        run.scan_file(path)
            .into_iter()
            .map(|(_, target)| target)
            .collect()
    }
}

/// One-shot form of [`DependencyAnalyzer::analyze`] returning only the reachable set
pub fn resolve<E, X, T>(
    root: &Path,
    entry_points: E,
    extensions: X,
    sink: &impl DiagnosticSink,
) -> ReachableSet
where
    E: IntoIterator,
    E::Item: Into<String>,
    X: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let config = ResolverConfig::new(root)
        .with_entry_points(entry_points)
        .with_extensions(extensions);
    DependencyAnalyzer::new(config).analyze(sink).reachable
}

/// Per-run state. Created at the start of `analyze` and consumed by `finish`.
struct ResolveRun<'a, S: DiagnosticSink> {
    config: &'a ResolverConfig,
    file_scanner: &'a FileScanner,
    sink: &'a S,
    path_resolver: PathResolver,
    extractors: ExtractorFactory,
    visited: HashSet<PathBuf>,
    reachable: ReachableSet,
    graph: GraphBuilder,
    scanned: Vec<PathBuf>,
}

impl<'a, S: DiagnosticSink> ResolveRun<'a, S> {
    fn new(config: &'a ResolverConfig, file_scanner: &'a FileScanner, sink: &'a S) -> Self {
        let extensions_present = file_scanner.collect_extensions(&config.root);
        let pattern = ReferencePattern::from_extensions(&extensions_present);

        Self {
            config,
            file_scanner,
            sink,
            path_resolver: PathResolver::new(config.root.clone()),
            extractors: ExtractorFactory::new(pattern),
            visited: HashSet::new(),
            reachable: ReachableSet::new(),
            graph: GraphBuilder::new(),
            scanned: Vec::new(),
        }
    }

    fn process_entry_point(&mut self, entry: &str) {
        let path = self.config.root.join(entry).clean();

        if path.is_dir() {
            for file in self.file_scanner.list_files(&path) {
                self.reachable.insert(file.clone());
                self.graph.mark_entry(&file);
                if self.config.is_trackable(&file) {
                    self.process_file(file);
                }
            }
        } else if path.is_file() && self.config.is_trackable(&path) {
            self.graph.mark_entry(&path);
            self.process_file(path);
        } else {
            let message = if path.is_file() {
                format!(
                    "direct dependency has an untracked extension: {}",
                    path.display()
                )
            } else {
                format!("direct dependency does not exist: {}", path.display())
            };
            self.sink.emit(
                Diagnostic::warning(DiagnosticKind::MissingEntryPoint, message).with_path(&path),
            );
        }
    }

    /// Scans `start` and everything trackable it leads to. Each path is scanned once.
    fn process_file(&mut self, start: PathBuf) {
        let mut pending = vec![start];

        while let Some(path) = pending.pop() {
            if !self.visited.insert(path.clone()) {
                continue;
            }
            self.reachable.insert(path.clone());
            self.scanned.push(path.clone());

            for (literal, target) in self.scan_file(&path) {
                if !target.is_file() {
                    self.sink.emit(
                        Diagnostic::warning(
                            DiagnosticKind::MissingDependency,
                            format!(
                                "file dependency does not exist: {} (referenced in {})",
                                target.display(),
                                path.display()
                            ),
                        )
                        .with_path(&target)
                        .with_referenced_from(&path),
                    );
                    continue;
                }

                self.reachable.insert(target.clone());
                self.graph.add_reference(&path, &target, &literal);
                if self.config.is_trackable(&target) && !self.visited.contains(&target) {
                    pending.push(target);
                }
            }
        }
    }

    /// (literal, resolved path) pairs for every non-discarded reference in `path`
    fn scan_file(&self, path: &Path) -> Vec<(String, PathBuf)> {
        let extension = match extension_of(path) {
            Some(ext) if self.config.extensions.contains(ext) => ext,
            _ => {
                self.sink.emit(
                    Diagnostic::warning(
                        DiagnosticKind::UnrecognizedExtension,
                        format!(
                            "Extension {} is not included: {}",
                            extension_of(path).unwrap_or(""),
                            path.display()
                        ),
                    )
                    .with_path(path),
                );
                return Vec::new();
            }
        };

        let source = match read_source(path) {
            Ok(source) => source,
            Err(err) => {
                self.sink.emit(
                    Diagnostic::warning(DiagnosticKind::ReadFailure, format!("{err:#}"))
                        .with_path(path),
                );
                return Vec::new();
            }
        };

        self.extractors
            .get_extractor(extension)
            .extract(&source)
            .into_iter()
            .filter_map(|literal| {
                let target = self
                    .path_resolver
                    .resolve(path, &literal, self.sink)
                    .into_path()?;
                Some((literal, target))
            })
            .collect()
    }

    fn finish(self) -> DependencyClosure {
        DependencyClosure {
            reachable: self.reachable,
            graph: self.graph.build(),
            scanned: self.scanned,
        }
    }
}
