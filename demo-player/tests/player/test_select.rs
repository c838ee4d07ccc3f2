//! Selection rules

use super::common::*;
use demo_player::{PlayerError, RunOutcome};
use demo_player_sdk::{StepEvent, StepStatus};
use std::time::Duration;

#[test]
fn test_select_resets_every_workflow_to_pending() {
    let player = builtin_player();
    let ids: Vec<String> = player.catalog().ids().iter().map(|s| s.to_string()).collect();

    for id in ids {
        player.select_workflow(&id).unwrap();
        let snap = player.snapshot();
        assert_eq!(snap.workflow.id, id);
        assert!(snap.steps.iter().all(|s| s.status == StepStatus::Pending));
        assert!(snap.current_step.is_none());
        assert!(!snap.running);
        assert!(snap.run_id.is_none());
    }
}

#[test]
fn test_select_loads_steps_of_new_workflow() {
    let player = builtin_player();
    player.select_workflow("data-sync").unwrap();

    let names: Vec<String> = player
        .snapshot()
        .steps
        .into_iter()
        .map(|s| s.definition.name)
        .collect();
    assert_eq!(
        names,
        vec!["Extract Data", "Transform Data", "Load Data", "Verify Sync"]
    );
}

#[test]
fn test_unknown_workflow_rejected_without_change() {
    let player = builtin_player();
    player.select_workflow("data-sync").unwrap();

    let err = player.select_workflow("does-not-exist").unwrap_err();
    assert!(matches!(err, PlayerError::UnknownWorkflow(ref id) if id == "does-not-exist"));
    assert_eq!(player.selected_id(), "data-sync");
}

#[test]
fn test_select_publishes_event() {
    let player = builtin_player();
    let mut rx = player.subscribe();

    player.select_workflow("customer-onboarding").unwrap();
    let _ = player.select_workflow("nope");

    assert_eq!(
        drain(&mut rx),
        vec![StepEvent::WorkflowSelected {
            workflow_id: "customer-onboarding".to_string()
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_select_refused_while_running() {
    let player = builtin_player();
    let handle = player.start_run().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let err = player.select_workflow("data-sync").unwrap_err();
    assert!(matches!(err, PlayerError::RunInProgress));

    let snap = player.snapshot();
    assert_eq!(snap.workflow.id, "ecom-order");
    assert_eq!(snap.steps[0].status, StepStatus::Active);

    assert_eq!(handle.wait().await, RunOutcome::Completed);
    player.select_workflow("data-sync").unwrap();
    assert_eq!(player.selected_id(), "data-sync");
}

#[tokio::test(start_paused = true)]
async fn test_reselect_after_run_clears_statuses() {
    let player = builtin_player();
    player.run_workflow().await;
    assert!(player.snapshot().is_finished());

    player.select_workflow("ecom-order").unwrap();
    let snap = player.snapshot();
    assert_eq!(snap.count(StepStatus::Pending), 4);
    assert!(snap.current_step.is_none());
    assert!(snap.finished_at.is_none());
}

#[test]
fn test_with_selection_constructor() {
    use demo_player::{Catalog, DemoPlayer, PlayerTiming};
    use std::sync::Arc;

    let catalog = Arc::new(Catalog::builtin());
    let player =
        DemoPlayer::with_selection(catalog.clone(), PlayerTiming::default(), "data-sync").unwrap();
    assert_eq!(player.selected_id(), "data-sync");

    let err = DemoPlayer::with_selection(catalog, PlayerTiming::default(), "missing");
    assert!(err.is_err());
}
