pub mod common;
pub mod generic;
pub mod javascript;

use common::ReferencePattern;
use generic::GenericExtractor;
use javascript::JavaScriptExtractor;

/// Pulls raw reference literals out of a file's text (line breaks already removed).
pub trait ReferenceExtractor {
    fn extract(&self, source: &str) -> Vec<String>;
    fn name(&self) -> &str;
}

/// Chooses an extractor by file extension. Built once per run from the pattern
/// of extensions present under the project root.
pub struct ExtractorFactory {
    generic: GenericExtractor,
    javascript: JavaScriptExtractor,
    typescript: JavaScriptExtractor,
}

impl ExtractorFactory {
    pub fn new(pattern: Option<ReferencePattern>) -> Self {
        Self {
            generic: GenericExtractor::new(pattern.clone()),
            javascript: JavaScriptExtractor::new(pattern.clone(), "js"),
            typescript: JavaScriptExtractor::new(pattern, "ts"),
        }
    }

    pub fn get_extractor(&self, extension: &str) -> &dyn ReferenceExtractor {
        match extension {
            "js" | "mjs" | "cjs" | "jsx" => &self.javascript,
            "ts" | "tsx" => &self.typescript,
            _ => &self.generic,
        }
    }
}
