use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::heuristics::SmoothingConfig;
use crate::stages::{CleanupConfig, RoleMapperConfig, TurnConfig};

/// Configuration for the whole pipeline
///
/// Every field has a default, so a JSON file only needs the values it
/// changes:
///
/// ```json
/// { "smoothing": { "min_hold": 1.5 }, "cleanup": { "profile": "clinical_light" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub smoothing: SmoothingConfig,
    pub roles: RoleMapperConfig,
    pub turns: TurnConfig,
    pub cleanup: CleanupConfig,
    /// Role mappings below this confidence are logged as warnings
    pub low_confidence_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingConfig::default(),
            roles: RoleMapperConfig::default(),
            turns: TurnConfig::default(),
            cleanup: CleanupConfig::default(),
            low_confidence_threshold: 0.6,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
