use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::ConfigError,
    storage::json_backend::DEFAULT_DATABASE_FILE,
};

const DEFAULT_MAX_OCCURRENCES: usize = 1024;

/// What a projection does with a recurring payment whose frequency it cannot interpret.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyPolicy {
    /// Leave the payment out and report it as a warning.
    #[default]
    Skip,
    /// Fail the whole projection.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSettings {
    /// Upper bound on occurrences examined per recurring payment and projection.
    #[serde(default = "ProjectionSettings::default_max_occurrences")]
    pub max_occurrences_per_schedule: usize,
    #[serde(default)]
    pub frequency_policy: FrequencyPolicy,
}

impl ProjectionSettings {
    pub fn default_max_occurrences() -> usize {
        DEFAULT_MAX_OCCURRENCES
    }

    pub fn strict() -> Self {
        Self {
            frequency_policy: FrequencyPolicy::Strict,
            ..Self::default()
        }
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            max_occurrences_per_schedule: DEFAULT_MAX_OCCURRENCES,
            frequency_policy: FrequencyPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding `db.json` and the standalone collections. Defaults to `<base>/db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_database_file")]
    pub database_file: String,
    #[serde(default)]
    pub projection: ProjectionSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: Self::default_database_file(),
            projection: ProjectionSettings::default(),
        }
    }
}

impl Config {
    pub fn default_database_file() -> String {
        DEFAULT_DATABASE_FILE.into()
    }
}

/// Loads and persists [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, falling back to defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}
