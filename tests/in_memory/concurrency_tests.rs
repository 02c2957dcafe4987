//! Out-of-order responses, unmount, and request deadlines.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{LaunchBoard, launch_board};
use promanage::board::{
    domain::{ProjectStatus, TaskStatus},
    ports::{BoardGatewayError, GatewayOperation},
    services::{BoardViewError, LoadState},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_stale_fetch_does_not_overwrite_newer_snapshot(launch_board: LaunchBoard) {
    let view = Arc::new(launch_board.view());
    view.load().await.expect("initial load");
    launch_board
        .gateway
        .delay_next(GatewayOperation::GetProject, Duration::from_millis(200))
        .expect("queue delay");

    let stale = {
        let board = Arc::clone(&view);
        tokio::spawn(async move { board.load().await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    let confirmed = view
        .toggle_project_status()
        .await
        .expect("toggle succeeds");
    stale
        .await
        .expect("stale fetch joins")
        .expect("stale fetch itself succeeds");

    assert_eq!(confirmed, ProjectStatus::OnHold);
    let project = view.snapshot().expect("loaded");
    assert_eq!(project.status(), ProjectStatus::OnHold);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn result_after_unmount_is_dropped(launch_board: LaunchBoard) {
    let view = Arc::new(launch_board.view());
    launch_board
        .gateway
        .delay_next(GatewayOperation::GetProject, Duration::from_millis(100))
        .expect("queue delay");

    let pending = {
        let board = Arc::clone(&view);
        tokio::spawn(async move { board.load().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    view.unmount();
    let outcome = pending.await.expect("fetch task joins");

    assert!(matches!(outcome, Err(BoardViewError::Unmounted)));
    assert!(matches!(view.load_state(), LoadState::Loading));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_service_times_out(launch_board: LaunchBoard) {
    let view = launch_board.view_with_timeout(Duration::from_millis(50));
    launch_board
        .gateway
        .delay_next(GatewayOperation::GetProject, Duration::from_millis(500))
        .expect("queue delay");

    let result = view.load().await;

    assert!(matches!(
        result,
        Err(BoardViewError::Gateway(BoardGatewayError::Timeout(_)))
    ));
    assert!(matches!(view.load_state(), LoadState::Failed(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_refresh_after_mutation_keeps_last_snapshot(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");
    launch_board
        .gateway
        .fail_next(
            GatewayOperation::GetProject,
            BoardGatewayError::HttpStatus { status: 502 },
        )
        .expect("queue failure");

    let result = view
        .move_task(&launch_board.task_a, promanage::board::domain::MoveDirection::Forward)
        .await;

    assert!(matches!(result, Err(BoardViewError::Gateway(_))));
    let shown = view
        .snapshot()
        .and_then(|project| project.task(&launch_board.task_a).cloned())
        .expect("A still shown");
    assert_eq!(shown.status(), TaskStatus::Todo);
    view.load().await.expect("manual refresh");
    let refreshed = view
        .snapshot()
        .and_then(|project| project.task(&launch_board.task_a).cloned())
        .expect("A present");
    assert_eq!(refreshed.status(), TaskStatus::InProgress);
}
