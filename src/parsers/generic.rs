use super::common::ReferencePattern;
use super::ReferenceExtractor;

/// Picks up every quoted literal ending in a known extension.
#[derive(Debug, Clone)]
pub struct GenericExtractor {
    pattern: Option<ReferencePattern>,
}

impl GenericExtractor {
    pub fn new(pattern: Option<ReferencePattern>) -> Self {
        Self { pattern }
    }
}

impl ReferenceExtractor for GenericExtractor {
    fn extract(&self, source: &str) -> Vec<String> {
        match &self.pattern {
            Some(pattern) => pattern.find_literals(source).map(str::to_string).collect(),
            None => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "generic"
    }
}
