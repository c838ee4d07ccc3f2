use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Actor that owns a step. Display only; every actor is simulated the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Actor {
    Coordinator,
    WebActor,
    ApiActor,
}

impl Actor {
    pub const ALL: [Actor; 3] = [Actor::Coordinator, Actor::WebActor, Actor::ApiActor];

    /// Wire name, as used in catalog files and events
    pub fn as_str(&self) -> &'static str {
        match self {
            Actor::Coordinator => "coordinator",
            Actor::WebActor => "web-actor",
            Actor::ApiActor => "api-actor",
        }
    }

    /// Short badge label shown next to a step
    pub fn label(&self) -> &'static str {
        match self {
            Actor::Coordinator => "COORDINATOR",
            Actor::WebActor => "WEB",
            Actor::ApiActor => "API",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown actor '{0}' (expected coordinator, web-actor or api-actor)")]
pub struct ParseActorError(pub String);

impl FromStr for Actor {
    type Err = ParseActorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Actor::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseActorError(s.to_string()))
    }
}

/// Status of a single step during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    Active,
    Completed,
    /// Declared for completeness; the simulation has no failure path.
    Failed,
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Pending => "PENDING",
            StepStatus::Active => "PROCESSING",
            StepStatus::Completed => "COMPLETED",
            StepStatus::Failed => "FAILED",
        }
    }
}

/// One step of a workflow definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Ordinal, unique within the owning workflow
    pub id: u32,
    pub name: String,
    pub description: String,
    pub actor: Actor,
}

impl StepDefinition {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        actor: Actor,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            actor,
        }
    }
}

/// Named, ordered sequence of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<StepDefinition>,
}

/// Step definition paired with its runtime status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    #[serde(flatten)]
    pub definition: StepDefinition,
    pub status: StepStatus,
}

impl StepState {
    pub fn pending(definition: StepDefinition) -> Self {
        Self {
            definition,
            status: StepStatus::Pending,
        }
    }
}

impl From<&StepDefinition> for StepState {
    fn from(def: &StepDefinition) -> Self {
        StepState::pending(def.clone())
    }
}

/// Structured events published by the player at every transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    /// Selection replaced and steps reset to pending
    WorkflowSelected { workflow_id: String },
    /// Run started
    RunStarted {
        run_id: Uuid,
        workflow_id: String,
        total_steps: usize,
    },
    /// Step marked active
    StepActivated {
        run_id: Uuid,
        index: usize,
        step_id: u32,
        name: String,
        actor: Actor,
    },
    /// Step marked completed
    StepCompleted {
        run_id: Uuid,
        index: usize,
        step_id: u32,
        name: String,
    },
    /// Every step completed
    RunFinished {
        run_id: Uuid,
        workflow_id: String,
        elapsed_ms: u64,
    },
    /// Run abandoned by teardown
    RunCancelled { run_id: Uuid, workflow_id: String },
}

pub const EVENT_PREFIX: &str = "__DEMO_EVENT__:";

impl StepEvent {
    /// Emit this event to stderr as a prefixed JSON line
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            use std::io::Write;
            eprintln!("{}{}", EVENT_PREFIX, json);
            let _ = std::io::stderr().flush();
        }
    }
}

// ============================================================================
// Console Logging Macros (for the headless runner)
// ============================================================================

/// Logs the header of a run.
///
/// ```text
/// ═══ E-commerce Order Processing (4 steps) ═══
/// Processes an online order from cart to fulfillment
/// ```
#[macro_export]
macro_rules! log_run_start_console {
    ($name:expr, $total:expr, $description:expr) => {
        println!("\x1b[1;36m═══ {} ({} steps) ═══\x1b[0m", $name, $total);
        println!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs a step becoming active.
///
/// ```text
/// → Step 2 [API] Check Inventory: Verify product availability
/// ```
#[macro_export]
macro_rules! log_step_active_console {
    ($id:expr, $actor:expr, $name:expr, $description:expr) => {
        println!(
            "\x1b[33m→ Step {} [{}] {}\x1b[0m\x1b[2m: {}\x1b[0m",
            $id, $actor, $name, $description
        );
    };
}

/// Logs a step completing.
///
/// ```text
/// ✓ Step 2 complete
/// ```
#[macro_export]
macro_rules! log_step_complete_console {
    ($id:expr) => {
        println!("\x1b[32m✓ Step {} complete\x1b[0m", $id);
    };
}

/// Logs the end of a run.
#[macro_export]
macro_rules! log_run_complete_console {
    ($name:expr, $elapsed_ms:expr) => {
        println!(
            "\x1b[1;32m✓ {} finished in {:.1}s\x1b[0m",
            $name,
            $elapsed_ms as f64 / 1000.0
        );
    };
}
