use anyhow::{Context, Result};
use path_clean::PathClean;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::diagnostics::Severity;

/// On-disk form of [`ResolverConfig`], read from a JSON file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverJsonConfig {
    pub root: Option<String>,
    #[serde(default, alias = "directDependencies")]
    pub entry_points: Vec<String>,
    #[serde(default, alias = "projectExtensions")]
    pub extensions: Vec<String>,
    pub log_level: Option<u8>,
}

impl ResolverJsonConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Absolute, lexically cleaned project root
    pub root: PathBuf,
    /// Entries relative to `root`, in the order they were given
    pub entry_points: Vec<String>,
    /// Bare extension tokens ("js", not ".js")
    pub extensions: BTreeSet<String>,
    pub log_level: u8,
}

impl ResolverConfig {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: absolutize(root.as_ref()),
            entry_points: Vec::new(),
            extensions: BTreeSet::new(),
            log_level: Severity::Warning.level(),
        }
    }

    pub fn with_entry_points<I, S>(mut self, entry_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry_points = entry_points.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = normalize_extensions(extensions);
        self
    }

    pub fn with_log_level(mut self, log_level: u8) -> Self {
        self.log_level = log_level.clamp(Severity::Error.level(), Severity::Info.level());
        self
    }

    pub fn is_trackable(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions.contains(ext))
    }
}

impl TryFrom<ResolverJsonConfig> for ResolverConfig {
    type Error = anyhow::Error;

    fn try_from(value: ResolverJsonConfig) -> Result<Self> {
        let root = value
            .root
            .context("config file does not name a project root")?;
        let mut config = ResolverConfig::new(root)
            .with_entry_points(value.entry_points)
            .with_extensions(value.extensions);
        if let Some(level) = value.log_level {
            config = config.with_log_level(level);
        }
        Ok(config)
    }
}

/// Trim each token, drop a leading '.', skip blanks.
pub fn normalize_extensions<I, S>(extensions: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .filter_map(|ext| {
            let ext = ext.as_ref().trim();
            let ext = ext.strip_prefix('.').unwrap_or(ext);
            (!ext.is_empty()).then(|| ext.to_string())
        })
        .collect()
}

pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
            .clean()
    }
}
