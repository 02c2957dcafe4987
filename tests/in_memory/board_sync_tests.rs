//! Board mutations followed by re-fetch against the in-memory service.

use super::helpers::{AUTHOR, LaunchBoard, launch_board};
use promanage::board::{
    domain::{MoveDirection, ProjectStatus, TaskStatus},
    ports::{BoardGatewayError, GatewayOperation},
    services::{BoardSection, BoardViewError, ProjectEdit, TaskEdit},
};
use rstest::rstest;

fn column_titles_holding(
    project: &promanage::board::domain::Project,
    task_id: &promanage::board::domain::TaskId,
) -> Vec<&'static str> {
    project
        .columns()
        .iter()
        .filter(|column| column.tasks().iter().any(|task| task.id() == task_id))
        .map(|column| column.title())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_b_forward_completes_it(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");
    let before = view.snapshot().expect("loaded");
    assert_eq!(column_titles_holding(&before, &launch_board.task_b), ["In Progress"]);

    let status = view
        .move_task(&launch_board.task_b, MoveDirection::Forward)
        .await
        .expect("move succeeds");

    assert_eq!(status, TaskStatus::Done);
    let after = view.snapshot().expect("still loaded");
    assert_eq!(column_titles_holding(&after, &launch_board.task_b), ["Completed"]);
    let moved = after.task(&launch_board.task_b).expect("B present");
    assert_eq!(moved.comment_count(), 1);
    let untouched = after.task(&launch_board.task_a).expect("A present");
    assert_eq!(untouched.status(), TaskStatus::Todo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_move_keeps_task_in_place_without_refetch(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");
    let fetches = || {
        launch_board
            .gateway
            .request_count(GatewayOperation::GetProject)
            .expect("request log")
    };
    assert_eq!(fetches(), 1);
    launch_board
        .gateway
        .fail_next(
            GatewayOperation::UpdateTaskStatus,
            BoardGatewayError::HttpStatus { status: 500 },
        )
        .expect("queue failure");

    let result = view
        .move_task(&launch_board.task_b, MoveDirection::Forward)
        .await;

    assert!(matches!(
        result,
        Err(BoardViewError::Gateway(BoardGatewayError::HttpStatus { status: 500 }))
    ));
    let shown = view.snapshot().expect("still loaded");
    assert_eq!(column_titles_holding(&shown, &launch_board.task_b), ["In Progress"]);
    let sections: Vec<BoardSection> = view.notices().iter().map(|n| n.section).collect();
    assert_eq!(sections, [BoardSection::Transition]);
    assert_eq!(fetches(), 1);

    let other = launch_board.view();
    other.load().await.expect("second view loads");
    let stored = other
        .snapshot()
        .and_then(|project| project.task(&launch_board.task_b).cloned())
        .expect("B present");
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_move_is_visible_to_a_fresh_fetch(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");

    view.move_task(&launch_board.task_a, MoveDirection::Forward)
        .await
        .expect("move succeeds");

    let other = launch_board.view();
    other.load().await.expect("second view loads");
    let task = other
        .snapshot()
        .and_then(|project| project.task(&launch_board.task_a).cloned())
        .expect("A present");
    assert_eq!(task.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_task_appears_in_to_do_after_refresh(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");
    view.open_new_task_form();

    let task_id = view
        .create_task("Write spec", None)
        .await
        .expect("task created");

    assert!(!view.is_new_task_form_open());
    let project = view.snapshot().expect("loaded");
    let created = project.task(&task_id).expect("new task present");
    assert_eq!(created.title(), "Write spec");
    assert_eq!(created.status(), TaskStatus::Todo);
    assert_eq!(created.assignee_email(), AUTHOR);
    assert_eq!(column_titles_holding(&project, &task_id), ["To Do"]);
    let [to_do, _, _] = project.columns();
    assert_eq!(to_do.count(), 2);
}

#[rstest]
#[case(Some("   "), AUTHOR)]
#[case(Some(" lead@demo.com "), "lead@demo.com")]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_falls_back_to_author_when_blank(
    launch_board: LaunchBoard,
    #[case] assignee: Option<&str>,
    #[case] expected: &str,
) {
    let view = launch_board.view();
    view.load().await.expect("initial load");

    let task_id = view
        .create_task("Book venue", assignee)
        .await
        .expect("task created");

    let project = view.snapshot().expect("loaded");
    let created = project.task(&task_id).expect("new task present");
    assert_eq!(created.assignee_email(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_sends_no_request(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");

    let result = view.create_task(" \t ", Some("lead@demo.com")).await;

    assert!(matches!(result, Err(BoardViewError::Domain(_))));
    let creates = launch_board
        .gateway
        .request_count(GatewayOperation::CreateTask)
        .expect("request log");
    assert_eq!(creates, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_is_added_to_the_selected_task(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");
    view.select_task(&launch_board.task_b).expect("select B");

    view.add_comment("  Ready for review  ")
        .await
        .expect("comment added");

    let selected = view.selected_task().expect("B still selected");
    assert_eq!(selected.comment_count(), 2);
    let latest = selected.comments().last().expect("latest comment");
    assert_eq!(latest.content(), "Ready for review");
    assert_eq!(latest.author_email(), AUTHOR);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_comment_keeps_board_and_scopes_notice(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");
    view.select_task(&launch_board.task_a).expect("select A");
    launch_board
        .gateway
        .fail_next(
            GatewayOperation::AddComment,
            BoardGatewayError::HttpStatus { status: 500 },
        )
        .expect("queue failure");

    let result = view.add_comment("Will this stick?").await;

    assert!(matches!(result, Err(BoardViewError::Gateway(_))));
    assert!(view.snapshot().is_some());
    let sections: Vec<BoardSection> = view.notices().iter().map(|n| n.section).collect();
    assert_eq!(sections, [BoardSection::Comments]);
    let selected = view.selected_task().expect("A still selected");
    assert_eq!(selected.comment_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggling_project_status_twice_restores_it(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");

    let first = view.toggle_project_status().await.expect("first toggle");
    let second = view.toggle_project_status().await.expect("second toggle");

    assert_eq!(first, ProjectStatus::OnHold);
    assert_eq!(second, ProjectStatus::Active);
    let project = view.snapshot().expect("loaded");
    assert_eq!(project.status(), ProjectStatus::Active);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_edits_are_refetched(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");

    view.update_task_details(
        &launch_board.task_a,
        TaskEdit::new()
            .with_title("Book the venue")
            .with_description("Capacity 200")
            .with_assignee("events@demo.com"),
    )
    .await
    .expect("edit succeeds");

    let task = view
        .snapshot()
        .and_then(|project| project.task(&launch_board.task_a).cloned())
        .expect("A present");
    assert_eq!(task.title(), "Book the venue");
    assert_eq!(task.description(), "Capacity 200");
    assert_eq!(task.assignee_email(), "events@demo.com");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_project_rename_is_rejected(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");

    let result = view
        .update_project_details(ProjectEdit::new().with_name("  "))
        .await;

    assert!(matches!(result, Err(BoardViewError::Domain(_))));
    let sections: Vec<BoardSection> = view.notices().iter().map(|n| n.section).collect();
    assert_eq!(sections, [BoardSection::Details]);
    let edits = launch_board
        .gateway
        .request_count(GatewayOperation::UpdateProjectDetails)
        .expect("request log");
    assert_eq!(edits, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_description_can_be_cleared(launch_board: LaunchBoard) {
    let view = launch_board.view();
    view.load().await.expect("initial load");

    view.update_project_details(ProjectEdit::new().with_description(""))
        .await
        .expect("edit succeeds");

    let project = view.snapshot().expect("loaded");
    assert_eq!(project.description(), "");
    assert_eq!(project.name(), "Acme Launch");
}
