//! `phz.json` project configuration.
//!
//! ```json
//! {
//!   "maxFileSize": 524288,
//!   "listIndexSuggestions": 3,
//!   "exclude": ["vendor/**", "**/*.blade.php"],
//!   "include": ["php", "inc"]
//! }
//! ```
//!
//! Every field is optional. Command-line flags win over the file.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use phz_common::limits::{DEFAULT_LIST_INDEX_SUGGESTIONS, DEFAULT_MAX_FILE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "phz.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PhzConfig {
    #[serde(default)]
    pub max_file_size: Option<usize>,
    #[serde(default)]
    pub list_index_suggestions: Option<usize>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    /// File extensions, without the dot.
    #[serde(default)]
    pub include: Option<Vec<String>>,
}

/// Configuration after defaults and command-line overrides.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub max_file_size: usize,
    pub list_index_suggestions: usize,
    pub exclude_patterns: Vec<String>,
    pub exclude: GlobSet,
    pub include: Vec<String>,
}

impl ResolvedConfig {
    /// Whether `path` (relative to the project root) is indexed.
    pub fn is_included(&self, relative: &Path) -> bool {
        let extension_ok = relative
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.include.iter().any(|inc| inc.eq_ignore_ascii_case(ext)));
        extension_ok && !self.exclude.is_match(relative)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            list_index_suggestions: DEFAULT_LIST_INDEX_SUGGESTIONS,
            exclude_patterns: Vec::new(),
            exclude: GlobSet::empty(),
            include: vec!["php".to_string()],
        }
    }
}

pub fn parse_config(source: &str) -> Result<PhzConfig> {
    serde_json::from_str(source).context("failed to parse phz.json")
}

pub fn load_config(path: &Path) -> Result<PhzConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// Explicit `--config`, else `phz.json` in the project root, else nothing.
pub fn find_config(args: &CliArgs, root: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        });
    }
    let candidate = root.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

pub fn resolve_config(config: PhzConfig, args: &CliArgs) -> Result<ResolvedConfig> {
    let defaults = ResolvedConfig::default();
    let exclude_patterns = if args.exclude.is_empty() {
        config.exclude.unwrap_or_default()
    } else {
        args.exclude.clone()
    };
    let include = config
        .include
        .map(|exts| {
            exts.into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect()
        })
        .unwrap_or(defaults.include);
    Ok(ResolvedConfig {
        max_file_size: args
            .max_file_size
            .or(config.max_file_size)
            .unwrap_or(defaults.max_file_size),
        list_index_suggestions: args
            .list_index_suggestions
            .or(config.list_index_suggestions)
            .unwrap_or(defaults.list_index_suggestions),
        exclude: build_glob_set(&exclude_patterns)?,
        exclude_patterns,
        include,
    })
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid exclude pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build exclude patterns")
}
