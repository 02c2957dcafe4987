//! In-memory board service.
//!
//! Behaves like the remote service for the operations the client uses: new
//! tasks start in `TODO`, project lists are newest first, comments keep
//! insertion order, and unknown identifiers are reported as missing records.
//! Tests can queue failures or response delays per operation and inspect the
//! request log.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use uuid::Uuid;

use crate::board::{
    domain::{
        Comment, CommentId, OrgSlug, Project, ProjectId, ProjectRecord, ProjectStatus,
        ProjectSummary, Task, TaskId, TaskRecord, TaskStatus,
    },
    ports::{
        BoardGateway, BoardGatewayError, BoardGatewayResult, CreatedComment, CreatedTask,
        GatewayOperation, NewComment, NewProject, NewTask, ProjectDetails, ProjectDetailsUpdate,
        ProjectStatusChange, TaskDetails, TaskDetailsUpdate, TaskStatusChange,
    },
};

/// Thread-safe in-memory board service.
#[derive(Clone)]
pub struct InMemoryBoardGateway {
    state: Arc<RwLock<ServerState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl std::fmt::Debug for InMemoryBoardGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBoardGateway")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct ServerState {
    organizations: HashSet<OrgSlug>,
    projects: Vec<ProjectRow>,
    failures: HashMap<GatewayOperation, VecDeque<BoardGatewayError>>,
    delays: HashMap<GatewayOperation, VecDeque<Duration>>,
    requests: Vec<GatewayOperation>,
}

#[derive(Debug, Clone)]
struct ProjectRow {
    id: ProjectId,
    org: OrgSlug,
    name: String,
    description: String,
    status: ProjectStatus,
    due_date: Option<NaiveDate>,
    tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone)]
struct TaskRow {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    assignee_email: String,
    due_date: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
}

impl ProjectRow {
    fn summary(&self) -> ProjectSummary {
        let completed = self
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count();
        ProjectSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            task_count: saturating_u32(self.tasks.len()),
            completed_task_count: saturating_u32(completed),
        }
    }

    fn detail(&self) -> Project {
        Project::from_record(ProjectRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            due_date: self.due_date,
            tasks: self.tasks.iter().map(TaskRow::detail).collect(),
        })
    }

    fn details(&self) -> ProjectDetails {
        ProjectDetails {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            due_date: self.due_date,
        }
    }
}

impl TaskRow {
    fn detail(&self) -> Task {
        Task::from_record(TaskRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            assignee_email: self.assignee_email.clone(),
            due_date: self.due_date,
            comments: self.comments.clone(),
        })
    }

    fn details(&self) -> TaskDetails {
        TaskDetails {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            assignee_email: self.assignee_email.clone(),
            due_date: self.due_date,
        }
    }
}

impl ServerState {
    fn project_mut(&mut self, id: &ProjectId) -> BoardGatewayResult<&mut ProjectRow> {
        self.projects
            .iter_mut()
            .find(|project| &project.id == id)
            .ok_or_else(|| missing("project", id.as_str()))
    }

    fn project(&self, id: &ProjectId) -> BoardGatewayResult<&ProjectRow> {
        self.projects
            .iter()
            .find(|project| &project.id == id)
            .ok_or_else(|| missing("project", id.as_str()))
    }

    fn task_mut(&mut self, id: &TaskId) -> BoardGatewayResult<&mut TaskRow> {
        self.projects
            .iter_mut()
            .flat_map(|project| project.tasks.iter_mut())
            .find(|task| &task.id == id)
            .ok_or_else(|| missing("task", id.as_str()))
    }

    fn task(&self, id: &TaskId) -> BoardGatewayResult<&TaskRow> {
        self.projects
            .iter()
            .flat_map(|project| project.tasks.iter())
            .find(|task| &task.id == id)
            .ok_or_else(|| missing("task", id.as_str()))
    }
}

fn missing(entity: &'static str, id: &str) -> BoardGatewayError {
    BoardGatewayError::NotFound {
        entity,
        id: id.to_owned(),
    }
}

fn lock_error(err: &impl ToString) -> BoardGatewayError {
    BoardGatewayError::transport(std::io::Error::other(err.to_string()))
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn next_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn fresh_project_id() -> BoardGatewayResult<ProjectId> {
    ProjectId::new(next_id()).map_err(|err| lock_error(&err))
}

fn fresh_task_id() -> BoardGatewayResult<TaskId> {
    TaskId::new(next_id()).map_err(|err| lock_error(&err))
}

fn fresh_comment_id() -> BoardGatewayResult<CommentId> {
    CommentId::new(next_id()).map_err(|err| lock_error(&err))
}

impl Default for InMemoryBoardGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBoardGateway {
    /// Creates an empty service using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty service stamping comments with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ServerState::default())),
            clock,
        }
    }

    /// Registers an organization.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the state lock is
    /// poisoned.
    pub fn seed_organization(&self, org: &OrgSlug) -> BoardGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.organizations.insert(org.clone());
        Ok(())
    }

    /// Adds a project directly, bypassing the request log.
    ///
    /// The organization is registered if needed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the state lock is
    /// poisoned.
    pub fn seed_project(
        &self,
        org: &OrgSlug,
        name: &str,
        description: &str,
        status: ProjectStatus,
    ) -> BoardGatewayResult<ProjectId> {
        let id = fresh_project_id()?;
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.organizations.insert(org.clone());
        state.projects.push(ProjectRow {
            id: id.clone(),
            org: org.clone(),
            name: name.to_owned(),
            description: description.to_owned(),
            status,
            due_date: None,
            tasks: Vec::new(),
        });
        Ok(id)
    }

    /// Adds a task directly, bypassing the request log.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::NotFound`] when the project is unknown.
    pub fn seed_task(
        &self,
        project_id: &ProjectId,
        title: &str,
        status: TaskStatus,
        assignee_email: &str,
    ) -> BoardGatewayResult<TaskId> {
        let id = fresh_task_id()?;
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.project_mut(project_id)?.tasks.push(TaskRow {
            id: id.clone(),
            title: title.to_owned(),
            description: String::new(),
            status,
            assignee_email: assignee_email.to_owned(),
            due_date: None,
            comments: Vec::new(),
        });
        Ok(id)
    }

    /// Adds a comment directly, bypassing the request log.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::NotFound`] when the task is unknown.
    pub fn seed_comment(
        &self,
        task_id: &TaskId,
        content: &str,
        author_email: &str,
    ) -> BoardGatewayResult<CommentId> {
        let id = fresh_comment_id()?;
        let created_at = self.clock.utc();
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.task_mut(task_id)?.comments.push(Comment::new(
            id.clone(),
            content.to_owned(),
            author_email.to_owned(),
            created_at,
        ));
        Ok(id)
    }

    /// Makes the next call of `operation` fail with `error`.
    ///
    /// Failures queue up; each call consumes one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the state lock is
    /// poisoned.
    pub fn fail_next(
        &self,
        operation: GatewayOperation,
        error: BoardGatewayError,
    ) -> BoardGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.failures.entry(operation).or_default().push_back(error);
        Ok(())
    }

    /// Delays the response of the next call of `operation` by `delay`.
    ///
    /// The response is computed before the delay, so a delayed read returns
    /// the data as it was when the request arrived.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the state lock is
    /// poisoned.
    pub fn delay_next(
        &self,
        operation: GatewayOperation,
        delay: Duration,
    ) -> BoardGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.delays.entry(operation).or_default().push_back(delay);
        Ok(())
    }

    /// Returns every operation received, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the state lock is
    /// poisoned.
    pub fn requests(&self) -> BoardGatewayResult<Vec<GatewayOperation>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.requests.clone())
    }

    /// Returns how many times `operation` was received.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the state lock is
    /// poisoned.
    pub fn request_count(&self, operation: GatewayOperation) -> BoardGatewayResult<usize> {
        Ok(self
            .requests()?
            .into_iter()
            .filter(|received| *received == operation)
            .count())
    }

    /// Logs the request, applies `handle` to the state unless a failure is
    /// queued, then waits out any queued delay.
    async fn serve<T>(
        &self,
        operation: GatewayOperation,
        handle: impl FnOnce(&mut ServerState) -> BoardGatewayResult<T> + Send,
    ) -> BoardGatewayResult<T> {
        let (result, delay) = {
            let mut state = self.state.write().map_err(|err| lock_error(&err))?;
            state.requests.push(operation);
            let delay = state
                .delays
                .get_mut(&operation)
                .and_then(VecDeque::pop_front);
            let injected = state
                .failures
                .get_mut(&operation)
                .and_then(VecDeque::pop_front);
            let result = injected.map_or_else(|| handle(&mut state), Err);
            (result, delay)
        };
        if let Some(pause) = delay {
            tokio::time::sleep(pause).await;
        }
        result
    }
}

#[async_trait]
impl BoardGateway for InMemoryBoardGateway {
    async fn list_projects(&self, org: &OrgSlug) -> BoardGatewayResult<Vec<ProjectSummary>> {
        self.serve(GatewayOperation::ListProjects, |state| {
            Ok(state
                .projects
                .iter()
                .rev()
                .filter(|project| &project.org == org)
                .map(ProjectRow::summary)
                .collect())
        })
        .await
    }

    async fn create_project(&self, request: &NewProject) -> BoardGatewayResult<ProjectId> {
        let id = fresh_project_id()?;
        self.serve(GatewayOperation::CreateProject, |state| {
            if !state.organizations.contains(&request.org) {
                return Err(BoardGatewayError::server(
                    GatewayOperation::CreateProject.as_str(),
                    ["Organization matching query does not exist.".to_owned()],
                ));
            }
            state.projects.push(ProjectRow {
                id: id.clone(),
                org: request.org.clone(),
                name: request.name.as_str().to_owned(),
                description: request.description.clone(),
                status: ProjectStatus::Active,
                due_date: None,
                tasks: Vec::new(),
            });
            Ok(id)
        })
        .await
    }

    async fn get_project(&self, id: &ProjectId) -> BoardGatewayResult<Project> {
        self.serve(GatewayOperation::GetProject, |state| {
            state.project(id).map(ProjectRow::detail)
        })
        .await
    }

    async fn get_task(&self, id: &TaskId) -> BoardGatewayResult<Task> {
        self.serve(GatewayOperation::GetTask, |state| {
            state.task(id).map(TaskRow::detail)
        })
        .await
    }

    async fn create_task(&self, request: &NewTask) -> BoardGatewayResult<CreatedTask> {
        let id = fresh_task_id()?;
        self.serve(GatewayOperation::CreateTask, |state| {
            let project = state.project_mut(&request.project_id)?;
            project.tasks.push(TaskRow {
                id: id.clone(),
                title: request.title.as_str().to_owned(),
                description: String::new(),
                status: TaskStatus::Todo,
                assignee_email: request.assignee_email.clone(),
                due_date: None,
                comments: Vec::new(),
            });
            Ok(CreatedTask {
                id,
                title: request.title.as_str().to_owned(),
                status: TaskStatus::Todo,
            })
        })
        .await
    }

    async fn update_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> BoardGatewayResult<TaskStatusChange> {
        self.serve(GatewayOperation::UpdateTaskStatus, |state| {
            let task = state.task_mut(id)?;
            task.status = status;
            Ok(TaskStatusChange {
                id: task.id.clone(),
                status: task.status,
            })
        })
        .await
    }

    async fn update_project_status(
        &self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> BoardGatewayResult<ProjectStatusChange> {
        self.serve(GatewayOperation::UpdateProjectStatus, |state| {
            let project = state.project_mut(id)?;
            project.status = status;
            Ok(ProjectStatusChange {
                id: project.id.clone(),
                status: project.status,
            })
        })
        .await
    }

    async fn add_comment(&self, request: &NewComment) -> BoardGatewayResult<CreatedComment> {
        let id = fresh_comment_id()?;
        let created_at = self.clock.utc();
        self.serve(GatewayOperation::AddComment, |state| {
            let task = state.task_mut(&request.task_id)?;
            let comment = Comment::new(
                id,
                request.body.as_str().to_owned(),
                request.author_email.clone(),
                created_at,
            );
            let created = CreatedComment {
                id: comment.id().clone(),
                content: comment.content().to_owned(),
                created_at,
            };
            task.comments.push(comment);
            Ok(created)
        })
        .await
    }

    async fn update_project_details(
        &self,
        request: &ProjectDetailsUpdate,
    ) -> BoardGatewayResult<ProjectDetails> {
        self.serve(GatewayOperation::UpdateProjectDetails, |state| {
            let project = state.project_mut(&request.project_id)?;
            if let Some(name) = &request.name {
                project.name = name.as_str().to_owned();
            }
            if let Some(description) = &request.description {
                project.description.clone_from(description);
            }
            if let Some(due_date) = request.due_date {
                project.due_date = Some(due_date);
            }
            Ok(project.details())
        })
        .await
    }

    async fn update_task_details(
        &self,
        request: &TaskDetailsUpdate,
    ) -> BoardGatewayResult<TaskDetails> {
        self.serve(GatewayOperation::UpdateTaskDetails, |state| {
            let task = state.task_mut(&request.task_id)?;
            if let Some(title) = &request.title {
                task.title = title.as_str().to_owned();
            }
            if let Some(description) = &request.description {
                task.description.clone_from(description);
            }
            if let Some(assignee_email) = request
                .assignee_email
                .as_ref()
                .filter(|email| !email.trim().is_empty())
            {
                task.assignee_email.clone_from(assignee_email);
            }
            if let Some(due_date) = request.due_date {
                task.due_date = Some(due_date);
            }
            Ok(task.details())
        })
        .await
    }
}
