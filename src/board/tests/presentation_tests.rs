//! Text rendering tests.

use rstest::{fixture, rstest};

use super::fixtures::{comment, project, project_id, task, task_with_comments};
use crate::board::{
    domain::{ProjectStatus, ProjectSummary, TaskStatus},
    presentation::Renderer,
    services::{BoardSection, Notice},
};

#[fixture]
fn renderer() -> Renderer {
    Renderer::new().expect("templates compile")
}

#[rstest]
fn dashboard_shows_progress_and_placeholder_description(renderer: Renderer) {
    let projects = vec![ProjectSummary {
        id: project_id("p1"),
        name: "Acme Launch".to_owned(),
        description: String::new(),
        status: ProjectStatus::OnHold,
        task_count: 3,
        completed_task_count: 1,
    }];

    let screen = renderer
        .render_dashboard("acme", &projects)
        .expect("dashboard renders");

    assert!(screen.contains("Projects for acme (1)"));
    assert!(screen.contains("Acme Launch [ON_HOLD] 1/3 Done"));
    assert!(screen.contains("No description."));
}

#[rstest]
fn empty_dashboard_says_so(renderer: Renderer) {
    let screen = renderer.render_dashboard("acme", &[]).expect("renders");

    assert!(screen.contains("(0)"));
    assert!(screen.contains("No projects yet."));
}

#[rstest]
fn board_lists_columns_in_order_with_counts(renderer: Renderer) {
    let board = project(
        "p1",
        "Acme Launch",
        ProjectStatus::Active,
        vec![
            task("a", "Book venue", TaskStatus::Todo),
            task_with_comments(
                "b",
                "Print flyers",
                TaskStatus::Done,
                vec![comment("c1", "Done and dusted")],
            ),
        ],
    );

    let screen = renderer.render_board(&board).expect("board renders");

    let to_do = screen.find("== To Do (1) ==").expect("to do column");
    let in_progress = screen.find("== In Progress (0) ==").expect("in progress column");
    let completed = screen.find("== Completed (1) ==").expect("completed column");
    assert!(to_do < in_progress && in_progress < completed);
    assert!(screen.contains("Print flyers <me@demo.com> [1 comments]"));
    assert!(screen.contains("(empty)"));
    assert!(screen.contains("1/2 Done"));
}

#[rstest]
fn task_detail_lists_comments_with_author(renderer: Renderer) {
    let detail = task_with_comments(
        "b",
        "Print flyers",
        TaskStatus::InProgress,
        vec![comment("c1", "Need the logo")],
    );

    let screen = renderer.render_task_detail(&detail).expect("detail renders");

    assert!(screen.contains("Print flyers [In Progress]"));
    assert!(screen.contains("Comments (1)"));
    assert!(screen.contains("me@demo.com at 2026-03-14 09:30: Need the logo"));
}

#[rstest]
fn notices_name_their_section(renderer: Renderer) {
    let notices = [Notice::new(BoardSection::Comments, "endpoint returned HTTP 502")];

    let screen = renderer.render_notices(&notices).expect("notices render");

    assert_eq!(screen.trim(), "! comments: endpoint returned HTTP 502");
}
