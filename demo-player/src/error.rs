//! Error types for the catalog, configuration and player

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("workflow '{0}' not found in catalog")]
    UnknownWorkflow(String),

    #[error("a run is in progress; selection is locked until it finishes")]
    RunInProgress,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no workflows")]
    Empty,

    #[error("duplicate workflow id '{0}'")]
    DuplicateWorkflow(String),

    #[error("workflow '{0}' has no steps")]
    NoSteps(String),

    #[error("workflow '{workflow}' has duplicate step ordinal {step}")]
    DuplicateStep { workflow: String, step: u32 },

    #[error("workflow '{0}' is missing an id or name")]
    MissingField(String),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("active duration must be greater than zero")]
    InvalidTiming,

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: String, value: String },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
