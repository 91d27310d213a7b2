//! Analyzer configuration, optionally read from `codex.toml`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Knobs for one analysis run.
///
/// Every field defaults to on; a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Consult each symbol's `using namespace` snapshot during linking
    pub honor_using_directives: bool,
    /// Run the linking pass at all
    pub link_cross_references: bool,
    /// Follow include directives nested inside namespace blocks
    pub scan_nested_includes: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            honor_using_directives: true,
            link_cross_references: true,
            scan_nested_includes: true,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("codex.toml")
}

/// Read the config at `path` (or `codex.toml`); `None` when the file does
/// not exist
pub fn load_config(path: Option<&Path>) -> Result<Option<AnalyzerConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: AnalyzerConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &AnalyzerConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::ConfigExists(path.to_path_buf()));
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
