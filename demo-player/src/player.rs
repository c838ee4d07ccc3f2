//! Demo step player
//!
//! Owns the current selection and its step statuses, and plays a selected
//! workflow step by step: each step goes `pending → active → completed` with a
//! fixed suspension after each transition. Only one run may be in flight.
//! Every mutation is applied under the state lock after checking the run's
//! generation and cancellation token, so a suspension that resumes after
//! teardown (or after the selection moved on) changes nothing.

use chrono::{DateTime, Local};
use demo_player_sdk::{StepEvent, StepState, StepStatus, WorkflowDefinition};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{ConfigError, PlayerError};

pub const DEFAULT_ACTIVE_MS: u64 = 1500;
pub const DEFAULT_GAP_MS: u64 = 500;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Suspension lengths: `active` while a step is processing, `gap` after it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTiming {
    pub active: Duration,
    pub gap: Duration,
}

impl PlayerTiming {
    pub fn new(active: Duration, gap: Duration) -> Result<Self, ConfigError> {
        if active.is_zero() {
            return Err(ConfigError::InvalidTiming);
        }
        Ok(Self { active, gap })
    }

    pub fn from_millis(active_ms: u64, gap_ms: u64) -> Result<Self, ConfigError> {
        Self::new(Duration::from_millis(active_ms), Duration::from_millis(gap_ms))
    }
}

impl Default for PlayerTiming {
    fn default() -> Self {
        Self {
            active: Duration::from_millis(DEFAULT_ACTIVE_MS),
            gap: Duration::from_millis(DEFAULT_GAP_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Another run was in progress; nothing changed
    AlreadyRunning,
    /// The player was shut down before the run finished
    Cancelled,
}

/// Owned copy of the player state for rendering
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub workflow: WorkflowDefinition,
    pub steps: Vec<StepState>,
    pub current_step: Option<usize>,
    pub running: bool,
    pub run_id: Option<Uuid>,
    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,
}

impl PlayerSnapshot {
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    pub fn is_finished(&self) -> bool {
        !self.running && !self.steps.is_empty() && self.count(StepStatus::Completed) == self.steps.len()
    }
}

struct PlayerState {
    workflow: WorkflowDefinition,
    steps: Vec<StepState>,
    current_step: Option<usize>,
    running: bool,
    generation: u64,
    run_id: Option<Uuid>,
    started_at: Option<DateTime<Local>>,
    finished_at: Option<DateTime<Local>>,
}

impl PlayerState {
    fn for_workflow(workflow: WorkflowDefinition) -> Self {
        let steps = workflow.steps.iter().map(StepState::from).collect();
        Self {
            workflow,
            steps,
            current_step: None,
            running: false,
            generation: 0,
            run_id: None,
            started_at: None,
            finished_at: None,
        }
    }

    fn reset_steps(&mut self) {
        for step in &mut self.steps {
            step.status = StepStatus::Pending;
        }
        self.current_step = None;
    }
}

/// Claimed right to drive one run
struct RunTicket {
    run_id: Uuid,
    workflow_id: String,
    generation: u64,
    total_steps: usize,
    token: CancellationToken,
    started: Instant,
}

/// Handle to a run spawned with [`DemoPlayer::start_run`]
#[derive(Debug)]
pub struct RunHandle {
    join: JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub async fn wait(self) -> RunOutcome {
        self.join.await.unwrap_or(RunOutcome::Cancelled)
    }
}

/// Step player bound to one catalog. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DemoPlayer {
    catalog: Arc<Catalog>,
    timing: PlayerTiming,
    state: Arc<Mutex<PlayerState>>,
    events: broadcast::Sender<StepEvent>,
    shutdown: CancellationToken,
}

impl DemoPlayer {
    /// Player with the catalog's default workflow selected
    pub fn new(catalog: Arc<Catalog>, timing: PlayerTiming) -> Self {
        let workflow = catalog
            .get(catalog.default_id())
            .cloned()
            .unwrap_or_else(empty_workflow);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            catalog,
            timing,
            state: Arc::new(Mutex::new(PlayerState::for_workflow(workflow))),
            events,
            shutdown: CancellationToken::new(),
        }
    }

    /// Player with `id` selected
    pub fn with_selection(
        catalog: Arc<Catalog>,
        timing: PlayerTiming,
        id: &str,
    ) -> Result<Self, PlayerError> {
        let player = Self::new(catalog, timing);
        player.select_workflow(id)?;
        Ok(player)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn timing(&self) -> PlayerTiming {
        self.timing
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StepEvent> {
        self.events.subscribe()
    }

    pub fn selected_id(&self) -> String {
        self.lock().workflow.id.clone()
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let state = self.lock();
        PlayerSnapshot {
            workflow: state.workflow.clone(),
            steps: state.steps.clone(),
            current_step: state.current_step,
            running: state.running,
            run_id: state.run_id,
            started_at: state.started_at,
            finished_at: state.finished_at,
        }
    }

    /// Replace the selection and reset its steps to pending.
    ///
    /// Refused while a run is in progress; unknown ids are refused too. In
    /// both cases the state is left untouched.
    pub fn select_workflow(&self, id: &str) -> Result<(), PlayerError> {
        let mut state = self.lock();
        if state.running {
            warn!(workflow = id, "selection refused: run in progress");
            return Err(PlayerError::RunInProgress);
        }
        let workflow = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| PlayerError::UnknownWorkflow(id.to_string()))?;

        let generation = state.generation + 1;
        *state = PlayerState::for_workflow(workflow);
        state.generation = generation;

        debug!(workflow = id, "workflow selected");
        self.publish(StepEvent::WorkflowSelected {
            workflow_id: id.to_string(),
        });
        Ok(())
    }

    /// Play the selected workflow to the end.
    ///
    /// Returns [`RunOutcome::AlreadyRunning`] without touching anything when a
    /// run is already in flight.
    pub async fn run_workflow(&self) -> RunOutcome {
        match self.claim_run() {
            Ok(ticket) => self.drive(ticket).await,
            Err(outcome) => outcome,
        }
    }

    /// Spawn a run on the current tokio runtime.
    ///
    /// The run is claimed before spawning, so a second call in the same tick
    /// returns `None`.
    pub fn start_run(&self) -> Option<RunHandle> {
        let ticket = self.claim_run().ok()?;
        let player = self.clone();
        let join = tokio::spawn(async move { player.drive(ticket).await });
        Some(RunHandle { join })
    }

    /// Tear down: any in-flight run stops at its next suspension and no
    /// further runs start.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn claim_run(&self) -> Result<RunTicket, RunOutcome> {
        if self.shutdown.is_cancelled() {
            return Err(RunOutcome::Cancelled);
        }

        let mut state = self.lock();
        if state.running {
            debug!(workflow = %state.workflow.id, "run refused: already running");
            return Err(RunOutcome::AlreadyRunning);
        }

        state.reset_steps();
        state.running = true;
        state.generation += 1;
        let run_id = Uuid::new_v4();
        state.run_id = Some(run_id);
        state.started_at = Some(Local::now());
        state.finished_at = None;

        let ticket = RunTicket {
            run_id,
            workflow_id: state.workflow.id.clone(),
            generation: state.generation,
            total_steps: state.steps.len(),
            token: self.shutdown.child_token(),
            started: Instant::now(),
        };

        info!(workflow = %ticket.workflow_id, %run_id, steps = ticket.total_steps, "run started");
        self.publish(StepEvent::RunStarted {
            run_id,
            workflow_id: ticket.workflow_id.clone(),
            total_steps: ticket.total_steps,
        });
        Ok(ticket)
    }

    async fn drive(&self, run: RunTicket) -> RunOutcome {
        for index in 0..run.total_steps {
            let activated = self.apply(&run, |state| {
                let step = &mut state.steps[index];
                step.status = StepStatus::Active;
                state.current_step = Some(index);
                debug!(index, step = %step.definition.name, "step active");
                StepEvent::StepActivated {
                    run_id: run.run_id,
                    index,
                    step_id: step.definition.id,
                    name: step.definition.name.clone(),
                    actor: step.definition.actor,
                }
            });
            if !activated || !self.suspend(&run, self.timing.active).await {
                return self.abandon(&run);
            }

            let completed = self.apply(&run, |state| {
                let step = &mut state.steps[index];
                step.status = StepStatus::Completed;
                debug!(index, step = %step.definition.name, "step completed");
                StepEvent::StepCompleted {
                    run_id: run.run_id,
                    index,
                    step_id: step.definition.id,
                    name: step.definition.name.clone(),
                }
            });
            if !completed || !self.suspend(&run, self.timing.gap).await {
                return self.abandon(&run);
            }
        }

        let elapsed_ms = run.started.elapsed().as_millis() as u64;
        let finished = self.apply(&run, |state| {
            state.running = false;
            state.finished_at = Some(Local::now());
            StepEvent::RunFinished {
                run_id: run.run_id,
                workflow_id: run.workflow_id.clone(),
                elapsed_ms,
            }
        });
        if !finished {
            return self.abandon(&run);
        }

        info!(workflow = %run.workflow_id, run_id = %run.run_id, elapsed_ms, "run finished");
        RunOutcome::Completed
    }

    /// Apply `update` only if the run is still current and not cancelled
    fn apply(&self, run: &RunTicket, update: impl FnOnce(&mut PlayerState) -> StepEvent) -> bool {
        let mut state = self.lock();
        if run.token.is_cancelled() || state.generation != run.generation {
            return false;
        }
        let event = update(&mut *state);
        self.publish(event);
        true
    }

    /// Sleep for `duration`; false if the run was cancelled meanwhile
    async fn suspend(&self, run: &RunTicket, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => !run.token.is_cancelled(),
            _ = run.token.cancelled() => false,
        }
    }

    fn abandon(&self, run: &RunTicket) -> RunOutcome {
        let mut state = self.lock();
        if state.generation == run.generation {
            state.running = false;
        }
        drop(state);

        info!(workflow = %run.workflow_id, run_id = %run.run_id, "run cancelled");
        self.publish(StepEvent::RunCancelled {
            run_id: run.run_id,
            workflow_id: run.workflow_id.clone(),
        });
        RunOutcome::Cancelled
    }

    fn publish(&self, event: StepEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, PlayerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn empty_workflow() -> WorkflowDefinition {
    WorkflowDefinition {
        id: String::new(),
        name: String::new(),
        description: String::new(),
        steps: Vec::new(),
    }
}
