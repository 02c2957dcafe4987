//! Project summary and detail records.

use super::{Column, ParseProjectStatusError, ProjectId, Task, TaskId, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project status, toggled by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Work on the project is active.
    Active,
    /// The project is paused.
    OnHold,
}

impl ProjectStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::OnHold => "ON_HOLD",
        }
    }

    /// Returns the other status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::OnHold,
            Self::OnHold => Self::Active,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ACTIVE" => Ok(Self::Active),
            "ON_HOLD" => Ok(Self::OnHold),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

/// Project card shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Server identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Description; empty when unset.
    pub description: String,
    /// Current status.
    pub status: ProjectStatus,
    /// Number of tasks in the project.
    pub task_count: u32,
    /// Number of tasks with status `DONE`.
    pub completed_task_count: u32,
}

/// A project with its full task list, as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    status: ProjectStatus,
    due_date: Option<NaiveDate>,
    tasks: Vec<Task>,
}

/// Parameter object for building a [`Project`] from decoded server data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Server identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Description; empty when unset.
    pub description: String,
    /// Current status.
    pub status: ProjectStatus,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Tasks in server order.
    pub tasks: Vec<Task>,
}

impl Project {
    /// Builds a project from decoded server data.
    #[must_use]
    pub fn from_record(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            status: record.status,
            due_date: record.due_date,
            tasks: record.tasks,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the project status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns tasks in server order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the number of tasks.
    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of tasks with status `DONE`.
    #[must_use]
    pub fn completed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Done)
            .count()
    }

    /// Partitions tasks into the three board columns.
    #[must_use]
    pub fn columns(&self) -> [Column<'_>; 3] {
        Column::partition(&self.tasks)
    }
}
