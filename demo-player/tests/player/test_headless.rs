//! Headless runner outcomes

use super::common::*;
use demo_player::headless::run_headless;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_headless_completes_selected_workflow() {
    let player = builtin_player();
    run_headless(player.clone(), true).await.unwrap();

    let snap = player.snapshot();
    assert!(snap.is_finished());
    assert_eq!(snap.workflow.id, "ecom-order");
}

#[tokio::test(start_paused = true)]
async fn test_headless_reports_cancelled_run() {
    let player = builtin_player();
    let run = tokio::spawn(run_headless(player.clone(), false));

    tokio::time::sleep(Duration::from_millis(1600)).await;
    player.shutdown();

    let err = run.await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "run cancelled");
}

#[tokio::test(start_paused = true)]
async fn test_headless_refuses_busy_player() {
    let player = builtin_player();
    let handle = player.start_run().unwrap();

    let err = run_headless(player.clone(), false).await.unwrap_err();
    assert_eq!(err.to_string(), "a run is already in progress");

    player.shutdown();
    handle.wait().await;
}
