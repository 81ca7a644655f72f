//! Pipeline configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where to read the dataset, where to write reports and what to emit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding `trials<suffix>.csv`, `institutions<suffix>.csv`, `edges<suffix>.csv`
    pub data_dir: PathBuf,
    /// Directory for report files
    pub output_dir: PathBuf,
    /// Dataset variant, e.g. `_N11`
    pub dataset_suffix: String,
    /// Institutions listed in the top-centrality table
    pub top_institutions: usize,
    /// Also write the funding tables
    pub extract_funding: bool,
    /// Also write the JSON report
    pub write_json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/processed"),
            output_dir: PathBuf::from("results"),
            dataset_suffix: "_N11".to_string(),
            top_institutions: 10,
            extract_funding: true,
            write_json: true,
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document; absent keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse pipeline config")
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
