use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level drought configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DroughtConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Filter settings.
    #[serde(default)]
    pub filter: FilterToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FilterToml {
    /// Minimum drought duration to keep.
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<DroughtConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
