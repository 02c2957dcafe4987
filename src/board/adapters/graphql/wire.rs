//! Wire shapes for GraphQL requests and responses.
//!
//! Response records mirror the JSON the service returns and are converted to
//! validated domain types here, so nothing untyped escapes the adapter.

use crate::board::{
    domain::{
        Comment, CommentId, Project, ProjectId, ProjectRecord, ProjectStatus, ProjectSummary,
        Task, TaskId, TaskRecord, TaskStatus,
    },
    ports::{
        BoardGatewayError, BoardGatewayResult, CreatedComment, CreatedTask, ProjectDetails,
        ProjectStatusChange, TaskDetails, TaskStatusChange,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body posted to the endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: &'a V,
    pub operation_name: &'a str,
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// Error entry reported by the service.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl GraphQlResponse {
    /// Returns the data payload, turning reported errors into gateway errors.
    pub fn into_data(self, operation: &'static str) -> BoardGatewayResult<Value> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(BoardGatewayError::server(
                operation,
                errors.into_iter().map(|error| error.message),
            ));
        }
        self.data
            .ok_or_else(|| BoardGatewayError::decode(operation, "response carried no data"))
    }
}

// Variables.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgVariables<'a> {
    pub org_slug: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectVariables<'a> {
    pub org_slug: &'a str,
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct IdVariables<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskVariables<'a> {
    pub project_id: &'a str,
    pub title: &'a str,
    pub assignee_email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusVariables<'a> {
    pub task_id: &'a str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusVariables<'a> {
    pub project_id: &'a str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentVariables<'a> {
    pub task_id: &'a str,
    pub content: &'a str,
    pub author_email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailsVariables<'a> {
    pub project_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetailsVariables<'a> {
    pub task_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

// Response data.

#[derive(Debug, Deserialize)]
pub struct ProjectsData {
    pub projects: Vec<WireProjectSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectData {
    pub project: Option<WireProject>,
}

#[derive(Debug, Deserialize)]
pub struct TaskData {
    pub task: Option<WireTask>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectData {
    pub create_project: Option<ProjectPayload<WireIdentity>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskData {
    pub create_task: Option<TaskPayload<WireCreatedTask>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusData {
    pub update_task_status: Option<TaskPayload<WireStatusChange>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectStatusData {
    pub update_project_status: Option<ProjectPayload<WireStatusChange>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentData {
    pub add_comment: Option<CommentPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectDetailsData {
    pub update_project_details: Option<ProjectPayload<WireProjectDetails>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDetailsData {
    pub update_task_details: Option<TaskPayload<WireTaskDetails>>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectPayload<T> {
    pub project: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct TaskPayload<T> {
    pub task: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    pub comment: Option<WireCreatedComment>,
}

#[derive(Debug, Deserialize)]
pub struct WireIdentity {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProjectSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub task_count: Option<u32>,
    #[serde(default)]
    pub completed_task_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tasks: Vec<WireTask>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub assignee_email: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<WireComment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireComment {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub author_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct WireCreatedTask {
    pub id: String,
    pub title: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct WireStatusChange {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCreatedComment {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProjectDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTaskDetails {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub assignee_email: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Converts wire records into domain values, tagging failures with the
/// operation that produced them.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    operation: &'static str,
}

impl Decoder {
    pub const fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    fn fail(self, reason: &impl ToString) -> BoardGatewayError {
        BoardGatewayError::decode(self.operation, reason.to_string())
    }

    pub fn data<T: serde::de::DeserializeOwned>(self, value: Value) -> BoardGatewayResult<T> {
        serde_json::from_value(value).map_err(|err| self.fail(&err))
    }

    pub fn present<T>(self, value: Option<T>, field: &str) -> BoardGatewayResult<T> {
        value.ok_or_else(|| self.fail(&format!("missing {field}")))
    }

    fn project_id(self, raw: String) -> BoardGatewayResult<ProjectId> {
        ProjectId::new(raw).map_err(|err| self.fail(&err))
    }

    fn task_id(self, raw: String) -> BoardGatewayResult<TaskId> {
        TaskId::new(raw).map_err(|err| self.fail(&err))
    }

    fn comment_id(self, raw: String) -> BoardGatewayResult<CommentId> {
        CommentId::new(raw).map_err(|err| self.fail(&err))
    }

    fn task_status(self, raw: &str) -> BoardGatewayResult<TaskStatus> {
        TaskStatus::try_from(raw).map_err(|err| self.fail(&err))
    }

    fn project_status(self, raw: &str) -> BoardGatewayResult<ProjectStatus> {
        ProjectStatus::try_from(raw).map_err(|err| self.fail(&err))
    }

    pub fn identity(self, wire: WireIdentity) -> BoardGatewayResult<ProjectId> {
        self.project_id(wire.id)
    }

    pub fn project_summary(self, wire: WireProjectSummary) -> BoardGatewayResult<ProjectSummary> {
        Ok(ProjectSummary {
            status: self.project_status(&wire.status)?,
            id: self.project_id(wire.id)?,
            name: wire.name,
            description: wire.description.unwrap_or_default(),
            task_count: wire.task_count.unwrap_or_default(),
            completed_task_count: wire.completed_task_count.unwrap_or_default(),
        })
    }

    pub fn project(self, wire: WireProject) -> BoardGatewayResult<Project> {
        let tasks = wire
            .tasks
            .into_iter()
            .map(|task| self.task(task))
            .collect::<BoardGatewayResult<Vec<_>>>()?;
        Ok(Project::from_record(ProjectRecord {
            status: self.project_status(&wire.status)?,
            id: self.project_id(wire.id)?,
            name: wire.name,
            description: wire.description.unwrap_or_default(),
            due_date: wire.due_date,
            tasks,
        }))
    }

    pub fn task(self, wire: WireTask) -> BoardGatewayResult<Task> {
        let comments = wire
            .comments
            .into_iter()
            .map(|comment| self.comment(comment))
            .collect::<BoardGatewayResult<Vec<_>>>()?;
        Ok(Task::from_record(TaskRecord {
            status: self.task_status(&wire.status)?,
            id: self.task_id(wire.id)?,
            title: wire.title,
            description: wire.description.unwrap_or_default(),
            assignee_email: wire.assignee_email.unwrap_or_default(),
            due_date: wire.due_date,
            comments,
        }))
    }

    fn comment(self, wire: WireComment) -> BoardGatewayResult<Comment> {
        Ok(Comment::new(
            self.comment_id(wire.id)?,
            wire.content,
            wire.author_email.unwrap_or_default(),
            wire.created_at,
        ))
    }

    pub fn created_task(self, wire: WireCreatedTask) -> BoardGatewayResult<CreatedTask> {
        Ok(CreatedTask {
            status: self.task_status(&wire.status)?,
            id: self.task_id(wire.id)?,
            title: wire.title,
        })
    }

    pub fn task_status_change(
        self,
        wire: WireStatusChange,
    ) -> BoardGatewayResult<TaskStatusChange> {
        Ok(TaskStatusChange {
            status: self.task_status(&wire.status)?,
            id: self.task_id(wire.id)?,
        })
    }

    pub fn project_status_change(
        self,
        wire: WireStatusChange,
    ) -> BoardGatewayResult<ProjectStatusChange> {
        Ok(ProjectStatusChange {
            status: self.project_status(&wire.status)?,
            id: self.project_id(wire.id)?,
        })
    }

    pub fn created_comment(self, wire: WireCreatedComment) -> BoardGatewayResult<CreatedComment> {
        Ok(CreatedComment {
            id: self.comment_id(wire.id)?,
            content: wire.content,
            created_at: wire.created_at,
        })
    }

    pub fn project_details(self, wire: WireProjectDetails) -> BoardGatewayResult<ProjectDetails> {
        Ok(ProjectDetails {
            status: self.project_status(&wire.status)?,
            id: self.project_id(wire.id)?,
            name: wire.name,
            description: wire.description.unwrap_or_default(),
            due_date: wire.due_date,
        })
    }

    pub fn task_details(self, wire: WireTaskDetails) -> BoardGatewayResult<TaskDetails> {
        Ok(TaskDetails {
            status: self.task_status(&wire.status)?,
            id: self.task_id(wire.id)?,
            title: wire.title,
            description: wire.description.unwrap_or_default(),
            assignee_email: wire.assignee_email.unwrap_or_default(),
            due_date: wire.due_date,
        })
    }
}
