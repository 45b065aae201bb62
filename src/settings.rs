use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::overrides::SpotOverrideMap;
use crate::model::params::GridParameters;

/// Persisted grid state: the parameter fields at the top level plus the
/// override list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(flatten)]
    pub params: GridParameters,
    #[serde(default)]
    pub overrides: SpotOverrideMap,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridSettings {
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn load_settings(path: &Path) -> Result<GridSettings, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    GridSettings::from_json(&text)
}

pub fn save_settings(path: &Path, settings: &GridSettings) -> Result<(), SettingsError> {
    let json = settings.to_json()?;
    fs::write(path, json).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/settings.rs"]
mod tests;
