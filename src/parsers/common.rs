use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a file as UTF-8 text with all line breaks removed.
pub fn read_source(file_path: &Path) -> Result<String> {
    let file = File::open(file_path)
        .with_context(|| format!("failed to open {}", file_path.display()))?;
    let file_size = file.metadata()?.len() as usize;

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
    let mut content = String::with_capacity(file_size);
    reader
        .read_to_string(&mut content)
        .with_context(|| format!("failed to read {} as text", file_path.display()))?;
    Ok(strip_line_breaks(&content))
}

pub fn strip_line_breaks(source: &str) -> String {
    source.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// True when a literal like `./x.js` or `lib/x` names a directory part
pub fn has_directory(literal: &str) -> bool {
    Path::new(literal)
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty())
}

/// Matches single- or double-quoted literals ending in one of a fixed set of extensions.
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    regex: Regex,
    extensions: BTreeSet<String>,
}

impl ReferencePattern {
    /// None when there is no usable extension to match on
    pub fn from_extensions<I, S>(extensions: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: BTreeSet<String> = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        if extensions.is_empty() {
            return None;
        }

        let alternatives: Vec<String> = extensions.iter().map(|ext| regex::escape(ext)).collect();
        let ext_group = alternatives.join("|");
        let pattern = format!(
            r#""([^'<>"]*\.(?:{ext_group})\s*)"|'([^'<>"]*\.(?:{ext_group})\s*)'"#
        );
        Regex::new(&pattern)
            .ok()
            .map(|regex| Self { regex, extensions })
    }

    pub fn covers(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// Literal bodies, trailing whitespace trimmed, in source order
    pub fn find_literals<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex.captures_iter(source).filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().trim_end())
        })
    }
}
