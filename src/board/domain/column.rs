//! Board columns derived from a task list.

use super::{Task, TaskStatus};

/// Tasks sharing one status, in server order.
///
/// A column owns no state; it is re-derived from the latest fetched project
/// every time the board is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    status: TaskStatus,
    tasks: Vec<&'a Task>,
}

impl<'a> Column<'a> {
    /// Selects the tasks with `status`.
    #[must_use]
    pub fn for_status(status: TaskStatus, tasks: &'a [Task]) -> Self {
        Self {
            status,
            tasks: tasks.iter().filter(|task| task.status() == status).collect(),
        }
    }

    /// Splits tasks into To Do, In Progress, and Completed columns.
    ///
    /// Every task lands in exactly one column.
    #[must_use]
    pub fn partition(tasks: &'a [Task]) -> [Self; 3] {
        TaskStatus::ALL.map(|status| Self::for_status(status, tasks))
    }

    /// Returns the status this column holds.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.status.column_title()
    }

    /// Returns the tasks in this column.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    /// Returns the live task count.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether tasks here offer a "Move Forward" action.
    #[must_use]
    pub const fn can_move_forward(&self) -> bool {
        self.status.forward().is_some()
    }

    /// Returns whether tasks here offer a "Move Back" action.
    #[must_use]
    pub const fn can_move_back(&self) -> bool {
        self.status.back().is_some()
    }
}
