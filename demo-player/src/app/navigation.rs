//! Selection, run control and event polling

use demo_player_sdk::StepEvent;
use tokio::sync::broadcast::error::TryRecvError;

use super::*;
use crate::error::PlayerError;

impl App {
    pub fn next(&mut self) {
        match self.focus {
            Pane::Selector => {
                if self.selected < self.player.catalog().len().saturating_sub(1) {
                    self.select_index(self.selected + 1);
                }
            }
            Pane::Steps => {
                let total = self.player.snapshot().steps.len();
                if self.step_scroll < total.saturating_sub(1) {
                    self.step_scroll += 1;
                }
            }
        }
    }

    pub fn previous(&mut self) {
        match self.focus {
            Pane::Selector => {
                if self.selected > 0 {
                    self.select_index(self.selected - 1);
                }
            }
            Pane::Steps => {
                self.step_scroll = self.step_scroll.saturating_sub(1);
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    /// Move the selector to `idx` and select that workflow.
    ///
    /// The cursor only moves if the player accepts the selection.
    pub fn select_index(&mut self, idx: usize) {
        let Some(entry) = self.player.catalog().entry(idx) else {
            return;
        };
        let id = entry.definition.id.clone();

        match self.player.select_workflow(&id) {
            Ok(()) => {
                self.selected = idx;
                self.step_scroll = 0;
            }
            Err(PlayerError::RunInProgress) => self.notifications.selection_locked(),
            Err(e) => self.notifications.selection_failed(&e),
        }
    }

    /// Start the selected workflow in the background
    pub fn run_selected(&mut self) {
        let _guard = self.tokio_runtime.enter();
        match self.player.start_run() {
            Some(_) => self.step_scroll = 0,
            None if self.player.is_shut_down() => {}
            None => self.notifications.already_running(),
        }
    }

    pub fn quit(&mut self) {
        self.player.shutdown();
        self.should_quit = true;
    }

    /// Drain player events into the activity panel. Called once per frame.
    pub fn poll_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.record_event(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    self.push_activity(format!("… {} events skipped", skipped));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        self.notifications.expire();
    }

    fn record_event(&mut self, event: &StepEvent) {
        let line = match event {
            StepEvent::WorkflowSelected { workflow_id } => {
                format!("Selected {}", workflow_id)
            }
            StepEvent::RunStarted {
                workflow_id,
                total_steps,
                ..
            } => format!("Run started: {} ({} steps)", workflow_id, total_steps),
            StepEvent::StepActivated {
                step_id,
                name,
                actor,
                ..
            } => format!("[{}] Step {} {} processing", actor.label(), step_id, name),
            StepEvent::StepCompleted { step_id, name, .. } => {
                format!("Step {} {} completed", step_id, name)
            }
            StepEvent::RunFinished {
                workflow_id,
                elapsed_ms,
                ..
            } => {
                self.notifications.run_finished(workflow_id, *elapsed_ms);
                format!("Run finished: {}", workflow_id)
            }
            StepEvent::RunCancelled { workflow_id, .. } => {
                format!("Run cancelled: {}", workflow_id)
            }
        };
        self.push_activity(line);
    }

    fn push_activity(&mut self, line: String) {
        self.activity.push(line);
        if self.activity.len() > ACTIVITY_CAPACITY {
            let excess = self.activity.len() - ACTIVITY_CAPACITY;
            self.activity.drain(..excess);
        }
    }
}
