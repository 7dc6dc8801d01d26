use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Verbosity levels understood by the sinks. Higher is noisier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error = 1,
    Warning = 2,
    Info = 3,
}

impl Severity {
    pub fn level(self) -> u8 {
        self as u8
    }

    fn tag(self) -> &'static str {
        match self {
            Severity::Error => "Error: ",
            Severity::Warning => "Warning: ",
            Severity::Info => "Info: ",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A configured entry does not exist or has an untracked extension
    MissingEntryPoint,
    /// A resolved reference points at nothing on disk
    MissingDependency,
    /// A file was handed to the extractors but its extension is not tracked
    UnrecognizedExtension,
    /// Ancestor-directory matching found no candidate
    UnresolvedMerge,
    /// A trackable file could not be read as text
    ReadFailure,
    /// A directory requested by a report does not exist
    MissingDirectory,
    /// A reference resolved to an existing file
    FoundDependency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_from: Option<PathBuf>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            path: None,
            referenced_from: None,
        }
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Info, message)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_referenced_from(mut self, source: impl Into<PathBuf>) -> Self {
        self.referenced_from = Some(source.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.severity.tag(), self.message)
    }
}

/// Receiver for everything the resolver has to say about a run.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Prints tagged lines to stderr, dropping anything above the configured level
pub struct StdioSink {
    log_level: u8,
}

impl StdioSink {
    pub fn new(log_level: u8) -> Self {
        Self { log_level }
    }
}

impl Default for StdioSink {
    fn default() -> Self {
        Self::new(Severity::Warning.level())
    }
}

impl DiagnosticSink for StdioSink {
    fn emit(&self, diagnostic: Diagnostic) {
        if diagnostic.severity.level() > self.log_level {
            return;
        }
        eprintln!("{}", diagnostic);
    }
}

pub struct VecSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of everything collected so far
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.snapshot().iter().filter(|d| d.kind == kind).count()
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for VecSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

/// Fans each diagnostic out to two sinks, e.g. stderr plus a collector for the JSON report
pub struct TeeSink<A, B> {
    first: A,
    second: B,
}

impl<A: DiagnosticSink, B: DiagnosticSink> TeeSink<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for TeeSink<A, B> {
    fn emit(&self, diagnostic: Diagnostic) {
        self.first.emit(diagnostic.clone());
        self.second.emit(diagnostic);
    }
}
