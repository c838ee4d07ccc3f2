//! Application state and module organization
//!
//! This module contains the main App struct and re-exports all functionality
//! organized by domain.

use anyhow::{Context, Result};

use crate::player::DemoPlayer;

mod models;
pub use models::*;

mod input;
mod navigation;
mod notifications;
pub use notifications::*;

impl App {
    pub fn new(player: DemoPlayer) -> Result<Self> {
        let tokio_runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        let selected = player.catalog().position(&player.selected_id()).unwrap_or(0);
        let events = player.subscribe();

        Ok(Self {
            player,
            selected,
            focus: Pane::default(),
            step_scroll: 0,
            should_quit: false,
            notifications: Notices::new(),
            activity: Vec::new(),
            events,
            tokio_runtime,
        })
    }
}
