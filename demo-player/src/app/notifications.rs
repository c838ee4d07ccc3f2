//! Transient notices shown over the bottom of the body

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::error::PlayerError;

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Notices kept at once; the overlay draws the newest two
const MAX_NOTICES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    posted_at: Instant,
}

impl Notice {
    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) < NOTICE_TTL
    }
}

#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection was refused because a run holds the lock
    pub fn selection_locked(&mut self) {
        self.post(
            NotificationLevel::Warning,
            "Run in progress",
            "Workflow selection is locked until the run finishes".to_string(),
        );
    }

    /// Any other refused selection
    pub fn selection_failed(&mut self, err: &PlayerError) {
        self.post(NotificationLevel::Error, "Selection failed", err.to_string());
    }

    /// A run was requested while one is in flight
    pub fn already_running(&mut self) {
        self.post(
            NotificationLevel::Info,
            "Already running",
            "Wait for the current run to finish".to_string(),
        );
    }

    pub fn run_finished(&mut self, workflow_id: &str, elapsed_ms: u64) {
        self.post(
            NotificationLevel::Success,
            "Workflow complete",
            format!("{} finished in {:.1}s", workflow_id, elapsed_ms as f64 / 1000.0),
        );
    }

    /// Live notices, oldest first
    pub fn active(&self) -> Vec<&Notice> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&self, now: Instant) -> Vec<&Notice> {
        self.queue.iter().filter(|n| n.is_live(now)).collect()
    }

    pub fn expire(&mut self) {
        self.expire_at(Instant::now());
    }

    pub fn expire_at(&mut self, now: Instant) {
        self.queue.retain(|n| n.is_live(now));
    }

    fn post(&mut self, level: NotificationLevel, title: &str, message: String) {
        if self.queue.len() == MAX_NOTICES {
            self.queue.pop_front();
        }
        self.queue.push_back(Notice {
            level,
            title: title.to_string(),
            message,
            posted_at: Instant::now(),
        });
    }
}
