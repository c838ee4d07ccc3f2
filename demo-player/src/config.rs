//! Player configuration
//!
//! Resolved in layers: built-in defaults, then a YAML file, then
//! `DEMO_PLAYER_*` environment variables, then command-line overrides.

use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::player::{PlayerTiming, DEFAULT_ACTIVE_MS, DEFAULT_GAP_MS};

pub const ENV_ACTIVE_MS: &str = "DEMO_PLAYER_ACTIVE_MS";
pub const ENV_GAP_MS: &str = "DEMO_PLAYER_GAP_MS";
pub const ENV_WORKFLOW: &str = "DEMO_PLAYER_WORKFLOW";
pub const ENV_CATALOG: &str = "DEMO_PLAYER_CATALOG";

const ENV_KEYS: [&str; 4] = [ENV_ACTIVE_MS, ENV_GAP_MS, ENV_WORKFLOW, ENV_CATALOG];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// How long each step stays active, in milliseconds
    pub active_ms: u64,
    /// Pause after a step completes, in milliseconds
    pub gap_ms: u64,
    /// Workflow selected on startup
    pub default_workflow: Option<String>,
    /// Extra workflows to merge into the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            active_ms: DEFAULT_ACTIVE_MS,
            gap_ms: DEFAULT_GAP_MS,
            default_workflow: None,
            catalog_path: None,
        }
    }
}

/// Values given on the command line; `None` leaves the lower layer in place
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub active_ms: Option<u64>,
    pub gap_ms: Option<u64>,
    pub workflow: Option<String>,
    pub catalog_path: Option<PathBuf>,
}

/// `<config_dir>/config.yaml` for this application
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "emergence", "demo-player")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}

impl PlayerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// File layer plus environment layer.
    ///
    /// An explicit path must exist; the default path is used only if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::load_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    tracing::debug!(path = %path.display(), "loading config");
                    Self::load_file(&path)?
                }
                _ => Self::default(),
            },
        };
        config.with_env(process_env()?)
    }

    /// Apply `DEMO_PLAYER_*` variables from `vars`
    pub fn with_env<I>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                ENV_ACTIVE_MS => self.active_ms = parse_millis(&key, &value)?,
                ENV_GAP_MS => self.gap_ms = parse_millis(&key, &value)?,
                ENV_WORKFLOW if !value.is_empty() => self.default_workflow = Some(value),
                ENV_CATALOG if !value.is_empty() => self.catalog_path = Some(PathBuf::from(value)),
                _ => {}
            }
        }
        Ok(self)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(ms) = overrides.active_ms {
            self.active_ms = ms;
        }
        if let Some(ms) = overrides.gap_ms {
            self.gap_ms = ms;
        }
        if overrides.workflow.is_some() {
            self.default_workflow = overrides.workflow;
        }
        if overrides.catalog_path.is_some() {
            self.catalog_path = overrides.catalog_path;
        }
        self
    }

    pub fn timing(&self) -> Result<PlayerTiming, ConfigError> {
        PlayerTiming::from_millis(self.active_ms, self.gap_ms)
    }
}

/// `DEMO_PLAYER_*` variables set in the process environment.
///
/// Other variables are never read, so unrelated non-UTF-8 values are harmless.
fn process_env() -> Result<Vec<(String, String)>, ConfigError> {
    let mut vars = Vec::new();
    for key in ENV_KEYS {
        match std::env::var(key) {
            Ok(value) => vars.push((key.to_string(), value)),
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(raw)) => {
                return Err(ConfigError::InvalidEnv {
                    key: key.to_string(),
                    value: raw.to_string_lossy().into_owned(),
                })
            }
        }
    }
    Ok(vars)
}

fn parse_millis(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}
