//! Gateway port for the remote board service.

use super::payloads::{
    CreatedComment, CreatedTask, NewComment, NewProject, NewTask, ProjectDetails,
    ProjectDetailsUpdate, ProjectStatusChange, TaskDetails, TaskDetailsUpdate, TaskStatusChange,
};
use crate::board::domain::{
    OrgSlug, Project, ProjectId, ProjectStatus, ProjectSummary, Task, TaskId, TaskStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for gateway operations.
pub type BoardGatewayResult<T> = Result<T, BoardGatewayError>;

/// Contract for reading and writing board data on the remote service.
///
/// Views receive an implementation at construction; there is no process-wide
/// client.
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Lists project summaries for an organization, newest first.
    async fn list_projects(&self, org: &OrgSlug) -> BoardGatewayResult<Vec<ProjectSummary>>;

    /// Creates a project and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Server`] when the organization is unknown.
    async fn create_project(&self, request: &NewProject) -> BoardGatewayResult<ProjectId>;

    /// Fetches a project with all tasks and their comments.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::NotFound`] when the project does not exist.
    async fn get_project(&self, id: &ProjectId) -> BoardGatewayResult<Project>;

    /// Fetches a single task with its comments.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::NotFound`] when the task does not exist.
    async fn get_task(&self, id: &TaskId) -> BoardGatewayResult<Task>;

    /// Creates a task; the server assigns status `TODO`.
    async fn create_task(&self, request: &NewTask) -> BoardGatewayResult<CreatedTask>;

    /// Sets a task's status. Any status is accepted at this layer.
    async fn update_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> BoardGatewayResult<TaskStatusChange>;

    /// Sets a project's status.
    async fn update_project_status(
        &self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> BoardGatewayResult<ProjectStatusChange>;

    /// Appends a comment to a task.
    async fn add_comment(&self, request: &NewComment) -> BoardGatewayResult<CreatedComment>;

    /// Edits project name, description, or due date.
    async fn update_project_details(
        &self,
        request: &ProjectDetailsUpdate,
    ) -> BoardGatewayResult<ProjectDetails>;

    /// Edits task title, description, assignee, or due date.
    async fn update_task_details(
        &self,
        request: &TaskDetailsUpdate,
    ) -> BoardGatewayResult<TaskDetails>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardGatewayError {
    /// The request could not be delivered or the response could not be read.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The endpoint answered with a non-success HTTP status.
    #[error("endpoint returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The service reported errors for the operation.
    #[error("{operation} failed: {}", .messages.join("; "))]
    Server {
        /// GraphQL operation name.
        operation: &'static str,
        /// Error messages reported by the service.
        messages: Vec<String>,
    },

    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record.
        entity: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// The response did not match the expected shape.
    #[error("malformed {operation} response: {reason}")]
    Decode {
        /// GraphQL operation name.
        operation: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// No response arrived within the deadline.
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
}

impl BoardGatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Builds a server error from reported messages.
    pub fn server(operation: &'static str, messages: impl IntoIterator<Item = String>) -> Self {
        Self::Server {
            operation,
            messages: messages.into_iter().collect(),
        }
    }

    /// Builds a decode error.
    pub fn decode(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Decode {
            operation,
            reason: reason.into(),
        }
    }

    /// Returns whether the service reported a missing record.
    #[must_use]
    pub fn is_missing_record(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Server { messages, .. } => messages
                .iter()
                .any(|message| message.contains("does not exist")),
            _ => false,
        }
    }
}
