//! Shared fixtures for in-memory board integration tests.

use std::sync::Arc;
use std::time::Duration;

use promanage::board::{
    adapters::memory::InMemoryBoardGateway,
    domain::{OrgSlug, ProjectId, ProjectStatus, TaskId, TaskStatus},
    services::{ProjectListView, TaskBoardView, ViewSettings},
};
use rstest::fixture;

/// Author used for seeded records and view settings.
pub const AUTHOR: &str = "me@demo.com";

/// The "Acme Launch" board with A in To Do and B in In Progress.
pub struct LaunchBoard {
    pub gateway: Arc<InMemoryBoardGateway>,
    pub project_id: ProjectId,
    pub task_a: TaskId,
    pub task_b: TaskId,
}

impl LaunchBoard {
    /// Opens a board view over the seeded project.
    #[must_use]
    pub fn view(&self) -> TaskBoardView<InMemoryBoardGateway> {
        self.view_with_timeout(Duration::from_secs(5))
    }

    /// Opens a board view with a custom request deadline.
    #[must_use]
    pub fn view_with_timeout(&self, timeout: Duration) -> TaskBoardView<InMemoryBoardGateway> {
        TaskBoardView::new(
            Arc::clone(&self.gateway),
            self.project_id.clone(),
            ViewSettings {
                author_email: AUTHOR.to_owned(),
                request_timeout: timeout,
            },
        )
    }

    /// Opens the dashboard for the seeded organization.
    #[must_use]
    pub fn dashboard(&self) -> ProjectListView<InMemoryBoardGateway> {
        ProjectListView::new(Arc::clone(&self.gateway), acme(), ViewSettings::default())
    }
}

/// Returns the seeded organization slug.
#[must_use]
pub fn acme() -> OrgSlug {
    OrgSlug::new("acme").expect("valid slug")
}

/// Seeds "Acme Launch" with A (TODO) and B (IN_PROGRESS, one comment).
#[fixture]
pub fn launch_board() -> LaunchBoard {
    let gateway = Arc::new(InMemoryBoardGateway::new());
    let project_id = gateway
        .seed_project(&acme(), "Acme Launch", "Spring product launch", ProjectStatus::Active)
        .expect("seed project");
    let task_a = gateway
        .seed_task(&project_id, "A", TaskStatus::Todo, AUTHOR)
        .expect("seed task A");
    let task_b = gateway
        .seed_task(&project_id, "B", TaskStatus::InProgress, AUTHOR)
        .expect("seed task B");
    gateway
        .seed_comment(&task_b, "Halfway there", AUTHOR)
        .expect("seed comment");
    LaunchBoard {
        gateway,
        project_id,
        task_a,
        task_b,
    }
}
