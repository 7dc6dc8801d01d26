use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};

/// Outcome of turning a quoted literal into a filesystem path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An existing file
    Found(PathBuf),
    /// No strategy hit a file; this is the root-relative guess the caller should validate
    BestEffort(PathBuf),
    /// Not a filesystem dependency (URL)
    Discarded,
}

impl Resolution {
    pub fn is_discarded(&self) -> bool {
        matches!(self, Resolution::Discarded)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Resolution::Found(path) | Resolution::BestEffort(path) => Some(path),
            Resolution::Discarded => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Resolution::Found(path) | Resolution::BestEffort(path) => Some(path),
            Resolution::Discarded => None,
        }
    }
}

/// Maps literals found in a file to paths under a project root.
///
/// Strategies, first hit wins:
/// 1. the literal joined onto the referencing file's directory
/// 2. the literal's directory part matched as a suffix of one of the
///    referencing file's ancestors (walking upward, stopping at the root),
///    with the literal's file name spliced onto that ancestor
/// 3. literals starting with `http` are discarded
/// 4. the literal joined onto the root, with `..` unable to climb above it
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(
        &self,
        source_file: &Path,
        literal: &str,
        sink: &impl DiagnosticSink,
    ) -> Resolution {
        let source_dir = source_file.parent().unwrap_or(&self.root);

        let relative = source_dir.join(literal).clean();
        if relative.is_file() {
            return self.found(relative, sink);
        }

        match self.merge_with_ancestors(source_dir, literal) {
            Some(merged) if merged.is_file() => return self.found(merged, sink),
            Some(_) => {}
            None => sink.emit(
                Diagnostic::info(
                    DiagnosticKind::UnresolvedMerge,
                    format!(
                        "failed to find {} within {}.",
                        literal,
                        source_file.display()
                    ),
                )
                .with_path(source_file),
            ),
        }

        if literal.starts_with("http") {
            return Resolution::Discarded;
        }

        let fallback = self.join_under_root(literal);
        if fallback.is_file() {
            self.found(fallback, sink)
        } else {
            Resolution::BestEffort(fallback)
        }
    }

    /// Strategy 2. None when no ancestor ends with the literal's directory part.
    pub fn merge_with_ancestors(&self, source_dir: &Path, literal: &str) -> Option<PathBuf> {
        let literal_path = Path::new(literal);
        let file_name = literal_path.file_name()?;
        let dir_suffix = strip_leading_navigation(&literal_path.parent()?.to_path_buf().clean());
        if dir_suffix.as_os_str().is_empty() {
            return None;
        }

        source_dir
            .ancestors()
            .take_while(|ancestor| ancestor.starts_with(&self.root))
            .find(|ancestor| ancestor.ends_with(&dir_suffix))
            .map(|ancestor| ancestor.join(file_name))
    }

    /// Strategy 4. Leading separators are treated as root-relative.
    pub fn join_under_root(&self, literal: &str) -> PathBuf {
        let mut joined = self.root.clone();
        for component in Path::new(literal).components() {
            match component {
                Component::Normal(part) => joined.push(part),
                Component::ParentDir => {
                    if joined != self.root {
                        joined.pop();
                    }
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        joined
    }

    fn found(&self, path: PathBuf, sink: &impl DiagnosticSink) -> Resolution {
        sink.emit(
            Diagnostic::info(
                DiagnosticKind::FoundDependency,
                format!("Found dependency: {}.", path.display()),
            )
            .with_path(&path),
        );
        Resolution::Found(path)
    }
}

/// Drops leading `/`, `.` and `..` so the remainder can be compared as a suffix.
fn strip_leading_navigation(path: &Path) -> PathBuf {
    path.components()
        .skip_while(|component| {
            matches!(
                component,
                Component::RootDir | Component::Prefix(_) | Component::CurDir | Component::ParentDir
            )
        })
        .collect()
}
