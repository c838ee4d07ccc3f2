//! Run sequencing, refusal and teardown
//!
//! All tests run on a paused clock, so suspensions complete instantly and
//! elapsed time is exact.

use super::common::*;
use demo_player::RunOutcome;
use demo_player_sdk::{StepEvent, StepStatus};
use std::time::Duration;
use tokio::time::{sleep, Instant};

#[tokio::test(start_paused = true)]
async fn test_ecom_order_runs_steps_in_order() {
    let player = builtin_player();
    player.select_workflow("ecom-order").unwrap();
    let mut rx = player.subscribe();

    let start = Instant::now();
    let outcome = player.run_workflow().await;
    let elapsed = start.elapsed();

    assert_eq!(outcome, RunOutcome::Completed);
    assert!(elapsed >= Duration::from_millis(8000), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(8100), "elapsed {:?}", elapsed);

    let events = drain(&mut rx);
    assert_eq!(
        transitions(&events),
        vec![
            (0, true),
            (0, false),
            (1, true),
            (1, false),
            (2, true),
            (2, false),
            (3, true),
            (3, false),
        ]
    );

    let activated_ids: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            StepEvent::StepActivated { step_id, .. } => Some(*step_id),
            _ => None,
        })
        .collect();
    assert_eq!(activated_ids, vec![1, 2, 3, 4]);

    assert!(matches!(events.first(), Some(StepEvent::RunStarted { total_steps: 4, .. })));
    assert!(matches!(events.last(), Some(StepEvent::RunFinished { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_every_workflow_produces_one_pair_per_step() {
    let player = builtin_player();
    let ids: Vec<String> = player.catalog().ids().iter().map(|s| s.to_string()).collect();

    for id in ids {
        player.select_workflow(&id).unwrap();
        let total = player.snapshot().steps.len();
        let mut rx = player.subscribe();

        assert_eq!(player.run_workflow().await, RunOutcome::Completed);

        let pairs = transitions(&drain(&mut rx));
        assert_eq!(pairs.len(), total * 2, "workflow {}", id);
        for (i, chunk) in pairs.chunks(2).enumerate() {
            assert_eq!(chunk, &[(i, true), (i, false)], "workflow {}", id);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_completed_run_leaves_every_step_completed() {
    let player = builtin_player();
    player.select_workflow("customer-onboarding").unwrap();

    player.run_workflow().await;

    let snap = player.snapshot();
    assert!(!snap.running);
    assert!(snap.is_finished());
    assert_eq!(snap.count(StepStatus::Completed), 6);
    assert!(snap.finished_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_statuses_at_checkpoints() {
    let player = builtin_player();
    let handle = player.start_run().unwrap();

    // 100ms in: first step processing
    sleep(Duration::from_millis(100)).await;
    let snap = player.snapshot();
    assert!(snap.running);
    assert_eq!(snap.current_step, Some(0));
    assert_eq!(snap.steps[0].status, StepStatus::Active);
    assert_ordered(&snap);

    // 1600ms: first completed, inside the gap
    sleep(Duration::from_millis(1500)).await;
    let snap = player.snapshot();
    assert_eq!(snap.steps[0].status, StepStatus::Completed);
    assert_eq!(snap.count(StepStatus::Active), 0);
    assert_ordered(&snap);

    // 2100ms: second step processing
    sleep(Duration::from_millis(500)).await;
    let snap = player.snapshot();
    assert_eq!(snap.current_step, Some(1));
    assert_eq!(snap.steps[1].status, StepStatus::Active);
    assert_ordered(&snap);

    assert_eq!(handle.wait().await, RunOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_second_run_while_running_is_noop() {
    let player = builtin_player();
    let handle = player.start_run().unwrap();
    sleep(Duration::from_millis(100)).await;

    let mut rx = player.subscribe();
    let before = player.snapshot();

    assert_eq!(player.run_workflow().await, RunOutcome::AlreadyRunning);
    assert!(player.start_run().is_none());

    let after = player.snapshot();
    assert_eq!(before.steps, after.steps);
    assert_eq!(before.run_id, after.run_id);
    assert!(drain(&mut rx).is_empty());

    assert_eq!(handle.wait().await, RunOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_start_run_claims_before_spawn() {
    let player = builtin_player();
    let first = player.start_run();
    let second = player.start_run();

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(player.is_running());

    first.unwrap().wait().await;
    assert!(!player.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_rerun_resets_steps_first() {
    let player = builtin_player();
    player.run_workflow().await;

    let mut rx = player.subscribe();
    let handle = player.start_run().unwrap();
    sleep(Duration::from_millis(10)).await;

    let snap = player.snapshot();
    assert_eq!(snap.steps[0].status, StepStatus::Active);
    assert_eq!(snap.count(StepStatus::Pending), 3);
    assert_eq!(handle.wait().await, RunOutcome::Completed);

    let events = drain(&mut rx);
    assert_eq!(transitions(&events).len(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_mid_run_stops_mutations() {
    let player = builtin_player();
    let mut rx = player.subscribe();
    let handle = player.start_run().unwrap();

    sleep(Duration::from_millis(2100)).await;
    player.shutdown();
    assert_eq!(handle.wait().await, RunOutcome::Cancelled);

    let frozen = player.snapshot();
    assert!(!frozen.running);
    assert_eq!(frozen.steps[0].status, StepStatus::Completed);
    assert_eq!(frozen.steps[1].status, StepStatus::Active);

    // Well past where the original run would have ended
    sleep(Duration::from_secs(20)).await;
    assert_eq!(player.snapshot().steps, frozen.steps);

    let events = drain(&mut rx);
    assert!(matches!(events.last(), Some(StepEvent::RunCancelled { .. })));
    assert!(!events.iter().any(|e| matches!(e, StepEvent::RunFinished { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_no_runs_after_shutdown() {
    let player = builtin_player();
    player.shutdown();

    assert!(player.start_run().is_none());
    assert_eq!(player.run_workflow().await, RunOutcome::Cancelled);
    assert!(!player.is_running());
    assert_eq!(player.snapshot().count(StepStatus::Pending), 4);
}

#[tokio::test(start_paused = true)]
async fn test_zero_gap_timing() {
    let player = player_with_timing(10, 0);
    let start = Instant::now();

    assert_eq!(player.run_workflow().await, RunOutcome::Completed);
    assert!(start.elapsed() >= Duration::from_millis(40));
    assert!(player.snapshot().is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_run_ids_are_unique_per_run() {
    let player = builtin_player();
    player.run_workflow().await;
    let first = player.snapshot().run_id;
    player.run_workflow().await;
    let second = player.snapshot().run_id;

    assert!(first.is_some());
    assert_ne!(first, second);
}
