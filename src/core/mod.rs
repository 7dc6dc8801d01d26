pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod graph;
pub mod resolver;
pub mod scanner;
pub mod usage;

pub use analyzer::{resolve, DependencyAnalyzer, DependencyClosure};
pub use config::{ResolverConfig, ResolverJsonConfig};
pub use diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticSink, NullSink, Severity, StdioSink, TeeSink, VecSink,
};
pub use graph::{FileNode, GraphBuilder, ReachableSet, ReferenceEdge, ReferenceGraph};
pub use resolver::{PathResolver, Resolution};
pub use scanner::FileScanner;
pub use usage::{classify_usage, UsageReport};
