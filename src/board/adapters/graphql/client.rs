//! HTTP gateway posting GraphQL documents to a single endpoint.

use super::documents;
use super::wire::{
    AddCommentData, AddCommentVariables, CreateProjectData, CreateProjectVariables,
    CreateTaskData, CreateTaskVariables, Decoder, GraphQlRequest, GraphQlResponse, IdVariables,
    OrgVariables, ProjectData, ProjectDetailsVariables, ProjectStatusVariables, ProjectsData,
    TaskData, TaskDetailsVariables, TaskStatusVariables, UpdateProjectDetailsData,
    UpdateProjectStatusData, UpdateTaskDetailsData, UpdateTaskStatusData,
};
use crate::board::{
    domain::{OrgSlug, Project, ProjectId, ProjectStatus, ProjectSummary, Task, TaskId, TaskStatus},
    ports::{
        BoardGateway, BoardGatewayError, BoardGatewayResult, CreatedComment, CreatedTask,
        GatewayOperation, NewComment, NewProject, NewTask, ProjectDetails, ProjectDetailsUpdate,
        ProjectStatusChange, TaskDetails, TaskDetailsUpdate, TaskStatusChange,
    },
};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Board gateway backed by the service's GraphQL endpoint.
///
/// Every request is an HTTP POST of `{query, variables, operationName}` to
/// the configured URL, bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct GraphQlBoardGateway {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl GraphQlBoardGateway {
    /// Builds a gateway for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> BoardGatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(BoardGatewayError::transport)?;
        Ok(Self {
            client,
            endpoint: config.endpoint().clone(),
            timeout: config.request_timeout(),
        })
    }

    #[instrument(
        name = "graphql_execute",
        skip(self, document, variables),
        fields(endpoint = %self.endpoint)
    )]
    async fn execute<V>(
        &self,
        operation: GatewayOperation,
        document: &'static str,
        variables: &V,
    ) -> BoardGatewayResult<Value>
    where
        V: Serialize + Sync,
    {
        let name = operation.as_str();
        let body = GraphQlRequest {
            query: document,
            variables,
            operation_name: name,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;

        // The service answers some resolver failures with a 4xx status and a
        // regular error envelope, so try the envelope before the status.
        match serde_json::from_slice::<GraphQlResponse>(&bytes) {
            Ok(envelope) => {
                let result = envelope.into_data(name);
                match &result {
                    Ok(_) => debug!(operation = name, status = status.as_u16(), "graphql ok"),
                    Err(err) => warn!(operation = name, error = %err, "graphql reported errors"),
                }
                result
            }
            Err(_) if !status.is_success() => {
                warn!(operation = name, status = status.as_u16(), "graphql http failure");
                Err(BoardGatewayError::HttpStatus {
                    status: status.as_u16(),
                })
            }
            Err(err) => Err(BoardGatewayError::decode(name, err.to_string())),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> BoardGatewayError {
        if err.is_timeout() {
            return BoardGatewayError::Timeout(self.timeout);
        }
        BoardGatewayError::transport(err)
    }
}

fn not_found(err: BoardGatewayError, entity: &'static str, id: &str) -> BoardGatewayError {
    if err.is_missing_record() {
        return BoardGatewayError::NotFound {
            entity,
            id: id.to_owned(),
        };
    }
    err
}

#[async_trait]
impl BoardGateway for GraphQlBoardGateway {
    async fn list_projects(&self, org: &OrgSlug) -> BoardGatewayResult<Vec<ProjectSummary>> {
        let operation = GatewayOperation::ListProjects;
        let decoder = Decoder::new(operation.as_str());
        let variables = OrgVariables {
            org_slug: org.as_str(),
        };
        let value = self
            .execute(operation, documents::LIST_PROJECTS, &variables)
            .await?;
        let data: ProjectsData = decoder.data(value)?;
        data.projects
            .into_iter()
            .map(|summary| decoder.project_summary(summary))
            .collect()
    }

    async fn create_project(&self, request: &NewProject) -> BoardGatewayResult<ProjectId> {
        let operation = GatewayOperation::CreateProject;
        let decoder = Decoder::new(operation.as_str());
        let variables = CreateProjectVariables {
            org_slug: request.org.as_str(),
            name: request.name.as_str(),
            description: &request.description,
        };
        let value = self
            .execute(operation, documents::CREATE_PROJECT, &variables)
            .await?;
        let data: CreateProjectData = decoder.data(value)?;
        let payload = decoder.present(data.create_project, "createProject")?;
        decoder.identity(decoder.present(payload.project, "project")?)
    }

    async fn get_project(&self, id: &ProjectId) -> BoardGatewayResult<Project> {
        let operation = GatewayOperation::GetProject;
        let decoder = Decoder::new(operation.as_str());
        let variables = IdVariables { id: id.as_str() };
        let value = self
            .execute(operation, documents::GET_PROJECT, &variables)
            .await
            .map_err(|err| not_found(err, "project", id.as_str()))?;
        let data: ProjectData = decoder.data(value)?;
        let project = data.project.ok_or_else(|| BoardGatewayError::NotFound {
            entity: "project",
            id: id.to_string(),
        })?;
        decoder.project(project)
    }

    async fn get_task(&self, id: &TaskId) -> BoardGatewayResult<Task> {
        let operation = GatewayOperation::GetTask;
        let decoder = Decoder::new(operation.as_str());
        let variables = IdVariables { id: id.as_str() };
        let value = self
            .execute(operation, documents::GET_TASK, &variables)
            .await
            .map_err(|err| not_found(err, "task", id.as_str()))?;
        let data: TaskData = decoder.data(value)?;
        let task = data.task.ok_or_else(|| BoardGatewayError::NotFound {
            entity: "task",
            id: id.to_string(),
        })?;
        decoder.task(task)
    }

    async fn create_task(&self, request: &NewTask) -> BoardGatewayResult<CreatedTask> {
        let operation = GatewayOperation::CreateTask;
        let decoder = Decoder::new(operation.as_str());
        let variables = CreateTaskVariables {
            project_id: request.project_id.as_str(),
            title: request.title.as_str(),
            assignee_email: &request.assignee_email,
        };
        let value = self
            .execute(operation, documents::CREATE_TASK, &variables)
            .await
            .map_err(|err| not_found(err, "project", request.project_id.as_str()))?;
        let data: CreateTaskData = decoder.data(value)?;
        let payload = decoder.present(data.create_task, "createTask")?;
        decoder.created_task(decoder.present(payload.task, "task")?)
    }

    async fn update_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> BoardGatewayResult<TaskStatusChange> {
        let operation = GatewayOperation::UpdateTaskStatus;
        let decoder = Decoder::new(operation.as_str());
        let variables = TaskStatusVariables {
            task_id: id.as_str(),
            status: status.as_str(),
        };
        let value = self
            .execute(operation, documents::UPDATE_TASK_STATUS, &variables)
            .await
            .map_err(|err| not_found(err, "task", id.as_str()))?;
        let data: UpdateTaskStatusData = decoder.data(value)?;
        let payload = decoder.present(data.update_task_status, "updateTaskStatus")?;
        decoder.task_status_change(decoder.present(payload.task, "task")?)
    }

    async fn update_project_status(
        &self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> BoardGatewayResult<ProjectStatusChange> {
        let operation = GatewayOperation::UpdateProjectStatus;
        let decoder = Decoder::new(operation.as_str());
        let variables = ProjectStatusVariables {
            project_id: id.as_str(),
            status: status.as_str(),
        };
        let value = self
            .execute(operation, documents::UPDATE_PROJECT_STATUS, &variables)
            .await
            .map_err(|err| not_found(err, "project", id.as_str()))?;
        let data: UpdateProjectStatusData = decoder.data(value)?;
        let payload = decoder.present(data.update_project_status, "updateProjectStatus")?;
        decoder.project_status_change(decoder.present(payload.project, "project")?)
    }

    async fn add_comment(&self, request: &NewComment) -> BoardGatewayResult<CreatedComment> {
        let operation = GatewayOperation::AddComment;
        let decoder = Decoder::new(operation.as_str());
        let variables = AddCommentVariables {
            task_id: request.task_id.as_str(),
            content: request.body.as_str(),
            author_email: &request.author_email,
        };
        let value = self
            .execute(operation, documents::ADD_COMMENT, &variables)
            .await
            .map_err(|err| not_found(err, "task", request.task_id.as_str()))?;
        let data: AddCommentData = decoder.data(value)?;
        let payload = decoder.present(data.add_comment, "addComment")?;
        decoder.created_comment(decoder.present(payload.comment, "comment")?)
    }

    async fn update_project_details(
        &self,
        request: &ProjectDetailsUpdate,
    ) -> BoardGatewayResult<ProjectDetails> {
        let operation = GatewayOperation::UpdateProjectDetails;
        let decoder = Decoder::new(operation.as_str());
        let variables = ProjectDetailsVariables {
            project_id: request.project_id.as_str(),
            name: request.name.as_ref().map(|name| name.as_str()),
            description: request.description.as_deref(),
            due_date: request.due_date,
        };
        let value = self
            .execute(operation, documents::UPDATE_PROJECT_DETAILS, &variables)
            .await
            .map_err(|err| not_found(err, "project", request.project_id.as_str()))?;
        let data: UpdateProjectDetailsData = decoder.data(value)?;
        let payload = decoder.present(data.update_project_details, "updateProjectDetails")?;
        decoder.project_details(decoder.present(payload.project, "project")?)
    }

    async fn update_task_details(
        &self,
        request: &TaskDetailsUpdate,
    ) -> BoardGatewayResult<TaskDetails> {
        let operation = GatewayOperation::UpdateTaskDetails;
        let decoder = Decoder::new(operation.as_str());
        let variables = TaskDetailsVariables {
            task_id: request.task_id.as_str(),
            title: request.title.as_ref().map(|title| title.as_str()),
            description: request.description.as_deref(),
            assignee_email: request.assignee_email.as_deref(),
            due_date: request.due_date,
        };
        let value = self
            .execute(operation, documents::UPDATE_TASK_DETAILS, &variables)
            .await
            .map_err(|err| not_found(err, "task", request.task_id.as_str()))?;
        let data: UpdateTaskDetailsData = decoder.data(value)?;
        let payload = decoder.present(data.update_task_details, "updateTaskDetails")?;
        decoder.task_details(decoder.present(payload.task, "task")?)
    }
}
