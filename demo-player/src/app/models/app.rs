//! Main application state

use demo_player_sdk::StepEvent;
use tokio::sync::broadcast;

use crate::player::DemoPlayer;
use super::Pane;
use crate::app::Notices;

/// Lines kept in the activity panel
pub const ACTIVITY_CAPACITY: usize = 50;

/// Main application state
pub struct App {
    pub player: DemoPlayer,

    // Selector cursor, index into the catalog
    pub selected: usize,
    pub focus: Pane,
    pub step_scroll: usize,
    pub should_quit: bool,

    pub notifications: Notices,

    // Recent transitions, oldest first
    pub activity: Vec<String>,
    pub(crate) events: broadcast::Receiver<StepEvent>,

    // Tokio runtime the player's runs are spawned on
    pub tokio_runtime: tokio::runtime::Runtime,
}
