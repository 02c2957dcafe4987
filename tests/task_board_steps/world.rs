//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use promanage::board::{
    adapters::memory::InMemoryBoardGateway,
    domain::{Project, ProjectId, Task, TaskId},
    services::{BoardViewError, TaskBoardView, ViewSettings},
};
use rstest::fixture;

/// Board view type used by the BDD world.
pub type TestBoardView = TaskBoardView<InMemoryBoardGateway>;

/// Scenario world for task board behaviour tests.
pub struct BoardWorld {
    pub gateway: Arc<InMemoryBoardGateway>,
    pub view: Option<TestBoardView>,
    pub last_error: Option<BoardViewError>,
}

impl BoardWorld {
    /// Creates a world with an empty service and no board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gateway: Arc::new(InMemoryBoardGateway::new()),
            view: None,
            last_error: None,
        }
    }

    /// Returns the board view, failing when no board was opened.
    pub fn view(&self) -> Result<&TestBoardView, eyre::Report> {
        self.view
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no board opened in scenario world"))
    }

    /// Returns the latest board snapshot.
    pub fn snapshot(&self) -> Result<Project, eyre::Report> {
        self.view()?
            .snapshot()
            .ok_or_else(|| eyre::eyre!("board has no loaded snapshot"))
    }

    /// Finds a task on the board by its title.
    pub fn task_named(&self, title: &str) -> Result<Task, eyre::Report> {
        self.snapshot()?
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} on the board"))
    }

    /// Resolves a task title to its identifier.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_named(title).map(|task| task.id().clone())
    }

    /// Opens a board view over `project`.
    pub fn open_board(&mut self, project: ProjectId) {
        self.view = Some(TaskBoardView::new(
            Arc::clone(&self.gateway),
            project,
            ViewSettings::default(),
        ));
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
