//! Request and acknowledgment payloads exchanged through the gateway port.

use crate::board::domain::{
    CommentBody, CommentId, OrgSlug, ProjectId, ProjectName, ProjectStatus, TaskId, TaskStatus,
    TaskTitle,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Remote operations offered by the board service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    /// Query project summaries for an organization.
    ListProjects,
    /// Create a project.
    CreateProject,
    /// Query a project with tasks and comments.
    GetProject,
    /// Query a single task with comments.
    GetTask,
    /// Create a task in a project.
    CreateTask,
    /// Set a task's status.
    UpdateTaskStatus,
    /// Set a project's status.
    UpdateProjectStatus,
    /// Add a comment to a task.
    AddComment,
    /// Edit project name, description, or due date.
    UpdateProjectDetails,
    /// Edit task title, description, assignee, or due date.
    UpdateTaskDetails,
}

impl GatewayOperation {
    /// Returns the GraphQL operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListProjects => "GetProjects",
            Self::CreateProject => "CreateProject",
            Self::GetProject => "GetProjectDetails",
            Self::GetTask => "GetTask",
            Self::CreateTask => "CreateTask",
            Self::UpdateTaskStatus => "UpdateTaskStatus",
            Self::UpdateProjectStatus => "UpdateProjectStatus",
            Self::AddComment => "AddComment",
            Self::UpdateProjectDetails => "UpdateProjectDetails",
            Self::UpdateTaskDetails => "UpdateTaskDetails",
        }
    }
}

impl fmt::Display for GatewayOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Owning organization.
    pub org: OrgSlug,
    /// Required name.
    pub name: ProjectName,
    /// Description; may be empty.
    pub description: String,
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning project.
    pub project_id: ProjectId,
    /// Required title.
    pub title: TaskTitle,
    /// Assignee email, unvalidated.
    pub assignee_email: String,
}

/// Input for adding a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Task being commented on.
    pub task_id: TaskId,
    /// Required comment text.
    pub body: CommentBody,
    /// Author email, unvalidated.
    pub author_email: String,
}

/// Partial edit of project details. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetailsUpdate {
    /// Project being edited.
    pub project_id: ProjectId,
    /// New name.
    pub name: Option<ProjectName>,
    /// New description; an empty string clears it.
    pub description: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
}

/// Partial edit of task details. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    /// Task being edited.
    pub task_id: TaskId,
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description; an empty string clears it.
    pub description: Option<String>,
    /// New assignee email.
    pub assignee_email: Option<String>,
    /// New due timestamp.
    pub due_date: Option<DateTime<Utc>>,
}

/// Acknowledgment of task creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    /// Assigned identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Initial status.
    pub status: TaskStatus,
}

/// Acknowledgment of a task status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusChange {
    /// Updated task.
    pub id: TaskId,
    /// Stored status.
    pub status: TaskStatus,
}

/// Acknowledgment of a project status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatusChange {
    /// Updated project.
    pub id: ProjectId,
    /// Stored status.
    pub status: ProjectStatus,
}

/// Acknowledgment of comment creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedComment {
    /// Assigned identifier.
    pub id: CommentId,
    /// Stored text.
    pub content: String,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Project fields returned after a details edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    /// Project identifier.
    pub id: ProjectId,
    /// Stored name.
    pub name: String,
    /// Stored description.
    pub description: String,
    /// Current status.
    pub status: ProjectStatus,
    /// Stored due date.
    pub due_date: Option<NaiveDate>,
}

/// Task fields returned after a details edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// Task identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Stored assignee email.
    pub assignee_email: String,
    /// Stored due timestamp.
    pub due_date: Option<DateTime<Utc>>,
}
