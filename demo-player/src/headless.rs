//! Headless runner: plays the selected workflow to stdout

use anyhow::{bail, Context, Result};
use demo_player_sdk::{
    log_run_complete_console, log_run_start_console, log_step_active_console,
    log_step_complete_console, StepEvent,
};

use crate::player::{DemoPlayer, RunOutcome};

/// Play the selected workflow once, printing each transition.
///
/// With `json`, every event is also emitted to stderr. Fails if the run is
/// cancelled or another run already holds the player.
pub async fn run_headless(player: DemoPlayer, json: bool) -> Result<()> {
    let workflow = player.snapshot().workflow;
    log_run_start_console!(workflow.name, workflow.steps.len(), workflow.description);

    let mut events = player.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if json {
                event.emit();
            }
            match &event {
                StepEvent::StepActivated { step_id, name, actor, .. } => {
                    let description = workflow
                        .steps
                        .iter()
                        .find(|s| s.id == *step_id)
                        .map(|s| s.description.as_str())
                        .unwrap_or_default();
                    log_step_active_console!(step_id, actor.label(), name, description);
                }
                StepEvent::StepCompleted { step_id, .. } => {
                    log_step_complete_console!(step_id);
                }
                StepEvent::RunFinished { elapsed_ms, .. } => {
                    log_run_complete_console!(workflow.name, *elapsed_ms);
                    break;
                }
                StepEvent::RunCancelled { .. } => break,
                _ => {}
            }
        }
    });

    let outcome = player.run_workflow().await;
    if outcome == RunOutcome::AlreadyRunning {
        // The in-flight run's events belong to someone else
        printer.abort();
        bail!("a run is already in progress");
    }
    printer.await.context("event printer failed")?;

    match outcome {
        RunOutcome::Completed => Ok(()),
        _ => bail!("run cancelled"),
    }
}
