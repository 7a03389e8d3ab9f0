use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const FIRES_PATH_ENV: &str = "WILDFIRE_FIRES_PATH";
pub const STATES_PATH_ENV: &str = "WILDFIRE_STATES_PATH";

pub const DEFAULT_FIRES_PATH: &str = "data/fires_light_gh.csv";
pub const DEFAULT_STATES_PATH: &str = "data/state_names.csv";

/// Locations of the two source tables.
///
/// Resolution order is defaults, then an optional TOML file, then the
/// environment, then explicit overrides from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub fires_path: PathBuf,
    pub states_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fires_path: PathBuf::from(DEFAULT_FIRES_PATH),
            states_path: PathBuf::from(DEFAULT_STATES_PATH),
        }
    }
}

impl PipelineConfig {
    pub fn new(fires_path: impl Into<PathBuf>, states_path: impl Into<PathBuf>) -> Self {
        Self {
            fires_path: fires_path.into(),
            states_path: states_path.into(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Applies `WILDFIRE_FIRES_PATH` / `WILDFIRE_STATES_PATH` from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(FIRES_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            self.fires_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(STATES_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            self.states_path = PathBuf::from(path);
        }
        self
    }
}
