//! Dashboard listing and project creation against the in-memory service.

use std::io;

use super::helpers::{LaunchBoard, acme, launch_board};
use promanage::board::{
    domain::{OrgSlug, ProjectStatus},
    ports::{BoardGatewayError, GatewayOperation},
    services::{BoardSection, BoardViewError, LoadState, ProjectListView, ViewSettings},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_are_listed_newest_first_with_progress(launch_board: LaunchBoard) {
    launch_board
        .gateway
        .seed_project(&acme(), "Autumn Refresh", "", ProjectStatus::OnHold)
        .expect("seed second project");
    let dashboard = launch_board.dashboard();
    assert!(dashboard.load_state().is_loading());

    dashboard.load().await.expect("list loads");

    let projects = dashboard.projects().expect("loaded");
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Autumn Refresh", "Acme Launch"]);
    let launch = projects.get(1).expect("launch listed");
    assert_eq!(launch.task_count, 2);
    assert_eq!(launch.completed_task_count, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_organizations_are_not_listed(launch_board: LaunchBoard) {
    let globex = OrgSlug::new("globex").expect("valid slug");
    launch_board
        .gateway
        .seed_project(&globex, "Secret Plan", "", ProjectStatus::Active)
        .expect("seed foreign project");
    let dashboard = launch_board.dashboard();

    dashboard.load().await.expect("list loads");

    let projects = dashboard.projects().expect("loaded");
    assert_eq!(projects.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_project_closes_form_and_refreshes(launch_board: LaunchBoard) {
    let dashboard = launch_board.dashboard();
    dashboard.load().await.expect("list loads");
    dashboard.open_create_form();

    let id = dashboard
        .create_project("  Winter Sale ", "Clearance")
        .await
        .expect("project created");

    assert!(!dashboard.is_create_form_open());
    let projects = dashboard.projects().expect("loaded");
    let newest = projects.first().expect("at least one project");
    assert_eq!(newest.id, id);
    assert_eq!(newest.name, "Winter Sale");
    assert_eq!(newest.description, "Clearance");
    assert_eq!(newest.status, ProjectStatus::Active);
    assert_eq!(newest.task_count, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_project_keeps_form_open_with_notice(launch_board: LaunchBoard) {
    let dashboard = launch_board.dashboard();
    dashboard.load().await.expect("list loads");
    dashboard.open_create_form();
    launch_board
        .gateway
        .fail_next(
            GatewayOperation::CreateProject,
            BoardGatewayError::HttpStatus { status: 500 },
        )
        .expect("queue failure");

    let result = dashboard.create_project("Winter Sale", "").await;

    assert!(matches!(result, Err(BoardViewError::Gateway(_))));
    assert!(dashboard.is_create_form_open());
    let sections: Vec<BoardSection> = dashboard.notices().iter().map(|n| n.section).collect();
    assert_eq!(sections, [BoardSection::NewProject]);
    assert_eq!(dashboard.projects().map(|list| list.len()), Some(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_organization_cannot_create_projects(launch_board: LaunchBoard) {
    let dashboard = ProjectListView::new(
        launch_board.gateway.clone(),
        OrgSlug::new("initech").expect("valid slug"),
        ViewSettings::default(),
    );

    let result = dashboard.create_project("Printer Fix", "").await;

    assert!(matches!(
        result,
        Err(BoardViewError::Gateway(BoardGatewayError::Server { .. }))
    ));
    let creates = launch_board
        .gateway
        .request_count(GatewayOperation::CreateProject)
        .expect("request log");
    assert_eq!(creates, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_first_listing_is_reported(launch_board: LaunchBoard) {
    let dashboard = launch_board.dashboard();
    launch_board
        .gateway
        .fail_next(
            GatewayOperation::ListProjects,
            BoardGatewayError::transport(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        )
        .expect("queue failure");

    let result = dashboard.load().await;

    assert!(result.is_err());
    assert!(matches!(
        dashboard.load_state(),
        LoadState::Failed(message) if message.contains("connection refused")
    ));
}
