// Error types
pub mod error;

// Workflow catalog (built-in and YAML-loaded)
pub mod catalog;

// Layered configuration
pub mod config;

// Step player core
pub mod player;

// Stdout runner for the `run` command
pub mod headless;

// Tracing subscriber setup
pub mod logging;

// TUI application state
pub mod app;

// TUI rendering
pub mod ui;

pub use catalog::Catalog;
pub use config::PlayerConfig;
pub use error::{CatalogError, ConfigError, PlayerError};
pub use player::{DemoPlayer, PlayerSnapshot, PlayerTiming, RunHandle, RunOutcome};
