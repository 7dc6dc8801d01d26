use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::common::{has_directory, ReferencePattern};
use super::ReferenceExtractor;

// `import x from "./a"`, `import { a, b } from './b';`, `import "./side-effect.css"`
static IMPORT_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import(?:\s*[^;<>"']+?\s*from\s*|\s+)(?:"([^"';]+)"|'([^"';]+)')"#)
        .expect("import pattern is valid")
});

/// Extractor for ES-module style sources.
///
/// Import statements are matched first. Their specifiers only count when they
/// carry a directory part, so bare package names like `react` are ignored, and
/// `implicit_extension` is appended unless the specifier already ends in an
/// extension present in the project, so `./x.service` becomes `./x.service.ts`.
/// Afterwards the generic literal pattern runs over the same text, again
/// keeping only literals with a directory part.
#[derive(Debug, Clone)]
pub struct JavaScriptExtractor {
    pattern: Option<ReferencePattern>,
    implicit_extension: &'static str,
}

impl JavaScriptExtractor {
    pub fn new(pattern: Option<ReferencePattern>, implicit_extension: &'static str) -> Self {
        Self {
            pattern,
            implicit_extension,
        }
    }

    pub fn implicit_extension(&self) -> &str {
        self.implicit_extension
    }

    fn extract_imports(&self, source: &str, references: &mut Vec<String>) {
        for caps in IMPORT_STATEMENT.captures_iter(source) {
            let Some(specifier) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let specifier = specifier.as_str().trim();
            if !has_directory(specifier) {
                continue;
            }

            if self.has_known_extension(specifier) {
                references.push(specifier.to_string());
            } else {
                references.push(format!("{}.{}", specifier, self.implicit_extension));
            }
        }
    }

    fn has_known_extension(&self, specifier: &str) -> bool {
        let Some(extension) = Path::new(specifier).extension().and_then(|ext| ext.to_str())
        else {
            return false;
        };
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.covers(extension))
    }

    fn extract_literals(&self, source: &str, references: &mut Vec<String>) {
        let Some(pattern) = &self.pattern else {
            return;
        };
        references.extend(
            pattern
                .find_literals(source)
                .filter(|literal| has_directory(literal))
                .map(str::to_string),
        );
    }
}

impl ReferenceExtractor for JavaScriptExtractor {
    fn extract(&self, source: &str) -> Vec<String> {
        let mut references = Vec::new();
        self.extract_imports(source, &mut references);
        self.extract_literals(source, &mut references);
        references
    }

    fn name(&self) -> &str {
        "javascript"
    }
}
