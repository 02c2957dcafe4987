//! Kanban board view for a single project.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::error::{BoardViewError, BoardViewResult};
use super::sync::{BoardSection, FetchSequencer, LoadState, Notice, Synced, ViewSettings, within};
use crate::board::{
    domain::{
        BoardDomainError, CommentBody, CommentId, MoveDirection, Project, ProjectId, ProjectName,
        ProjectStatus, Task, TaskId, TaskStatus, TaskTitle,
    },
    ports::{
        BoardGateway, BoardGatewayResult, NewComment, NewTask, ProjectDetailsUpdate,
        TaskDetailsUpdate,
    },
};

/// Edits to a task's details; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    title: Option<String>,
    description: Option<String>,
    assignee_email: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl TaskEdit {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description; an empty one clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reassigns the task.
    #[must_use]
    pub fn with_assignee(mut self, assignee_email: impl Into<String>) -> Self {
        self.assignee_email = Some(assignee_email.into());
        self
    }

    /// Sets a due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_update(self, task_id: TaskId) -> Result<TaskDetailsUpdate, BoardDomainError> {
        Ok(TaskDetailsUpdate {
            task_id,
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            assignee_email: self.assignee_email.map(|email| email.trim().to_owned()),
            due_date: self.due_date,
        })
    }
}

/// Edits to a project's details; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEdit {
    name: Option<String>,
    description: Option<String>,
    due_date: Option<NaiveDate>,
}

impl ProjectEdit {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new description; an empty one clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_update(self, project_id: ProjectId) -> Result<ProjectDetailsUpdate, BoardDomainError> {
        Ok(ProjectDetailsUpdate {
            project_id,
            name: self.name.map(ProjectName::new).transpose()?,
            description: self.description,
            due_date: self.due_date,
        })
    }
}

#[derive(Debug, Default)]
struct BoardState {
    synced: Synced<Project>,
    new_task_form_open: bool,
    selected: Option<TaskId>,
}

/// Board of one project: three status columns, task detail, and comments.
///
/// The view never edits its snapshot locally. Every confirmed mutation is
/// followed by a re-fetch and the newest fetched project is shown.
pub struct TaskBoardView<G>
where
    G: BoardGateway,
{
    gateway: Arc<G>,
    project_id: ProjectId,
    settings: ViewSettings,
    sequencer: FetchSequencer,
    state: RwLock<BoardState>,
}

impl<G> TaskBoardView<G>
where
    G: BoardGateway,
{
    /// Creates an unloaded board for `project_id`.
    #[must_use]
    pub fn new(gateway: Arc<G>, project_id: ProjectId, settings: ViewSettings) -> Self {
        Self {
            gateway,
            project_id,
            settings,
            sequencer: FetchSequencer::default(),
            state: RwLock::new(BoardState::default()),
        }
    }

    /// Returns the project this board shows.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Fetches the project and applies it unless a newer fetch already
    /// landed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::Gateway`] when the fetch fails and
    /// [`BoardViewError::Unmounted`] when the view was closed before or
    /// during the fetch.
    pub async fn load(&self) -> BoardViewResult<()> {
        self.ensure_mounted()?;
        let ticket = self.sequencer.issue();
        debug!(project_id = %self.project_id, ticket, "fetching project");
        let result = within(
            self.settings.request_timeout,
            self.gateway.get_project(&self.project_id),
        )
        .await;

        let mut state = self.write_state();
        if !self.sequencer.is_mounted() {
            debug!(project_id = %self.project_id, ticket, "dropping fetch after unmount");
            return Err(BoardViewError::Unmounted);
        }
        let (outcome, reply) = match result {
            Ok(project) => (Ok(project), Ok(())),
            Err(err) => (Err(err.to_string()), Err(err)),
        };
        if !state.synced.apply(ticket, outcome, BoardSection::Board) {
            debug!(project_id = %self.project_id, ticket, "discarding stale project fetch");
        }
        drop(state);

        reply.map_err(|err| {
            warn!(project_id = %self.project_id, error = %err, "project fetch failed");
            BoardViewError::from(err)
        })
    }

    /// Returns the latest applied project.
    #[must_use]
    pub fn snapshot(&self) -> Option<Project> {
        self.read_state().synced.ready().cloned()
    }

    /// Returns the load progress.
    #[must_use]
    pub fn load_state(&self) -> LoadState<Project> {
        self.read_state().synced.load().clone()
    }

    /// Moves a task one column forward or back.
    ///
    /// The target status is derived from the task's current status on the
    /// board. Returns the confirmed status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::TransitionUnavailable`] without sending a
    /// request when the move is not offered, [`BoardViewError::UnknownTask`]
    /// when the task is not on the board, or the service failure.
    pub async fn move_task(
        &self,
        task_id: &TaskId,
        direction: MoveDirection,
    ) -> BoardViewResult<TaskStatus> {
        self.ensure_mounted()?;
        let status = self.task_status(task_id)?;
        let Some(target) = status.step(direction) else {
            return Err(BoardViewError::TransitionUnavailable {
                task_id: task_id.clone(),
                status,
                direction,
            });
        };
        info!(task_id = %task_id, from = %status, to = %target, "moving task");
        let change = self
            .mutate(
                BoardSection::Transition,
                self.gateway.update_task_status(task_id, target),
            )
            .await?;
        Ok(change.status)
    }

    /// Flips the project between active and on hold.
    ///
    /// Returns the confirmed status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::NotLoaded`] before the first load or the
    /// service failure.
    pub async fn toggle_project_status(&self) -> BoardViewResult<ProjectStatus> {
        self.ensure_mounted()?;
        let target = self
            .read_state()
            .synced
            .ready()
            .map(|project| project.status().toggled())
            .ok_or(BoardViewError::NotLoaded)?;
        info!(project_id = %self.project_id, to = %target, "toggling project status");
        let change = self
            .mutate(
                BoardSection::ProjectStatus,
                self.gateway.update_project_status(&self.project_id, target),
            )
            .await?;
        Ok(change.status)
    }

    /// Opens the new-task form.
    pub fn open_new_task_form(&self) {
        self.write_state().new_task_form_open = true;
    }

    /// Closes the new-task form.
    pub fn close_new_task_form(&self) {
        self.write_state().new_task_form_open = false;
    }

    /// Returns whether the new-task form is open.
    #[must_use]
    pub fn is_new_task_form_open(&self) -> bool {
        self.read_state().new_task_form_open
    }

    /// Creates a task in the "To Do" column.
    ///
    /// The form closes once a valid title is submitted. The assignee
    /// defaults to the configured author.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::Domain`] without sending a request when the
    /// title is blank, or the service failure.
    pub async fn create_task(
        &self,
        title: &str,
        assignee_email: Option<&str>,
    ) -> BoardViewResult<TaskId> {
        self.ensure_mounted()?;
        let task_title = self.validated(BoardSection::NewTask, TaskTitle::new(title))?;
        self.close_new_task_form();
        let request = NewTask {
            project_id: self.project_id.clone(),
            title: task_title,
            assignee_email: self.author_or(assignee_email),
        };
        let created = self
            .mutate(BoardSection::NewTask, self.gateway.create_task(&request))
            .await?;
        info!(task_id = %created.id, title = %created.title, "task created");
        Ok(created.id)
    }

    /// Selects a task to show its detail and comments.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::UnknownTask`] when the task is not on the
    /// board.
    pub fn select_task(&self, task_id: &TaskId) -> BoardViewResult<()> {
        let mut state = self.write_state();
        let project = state.synced.ready().ok_or(BoardViewError::NotLoaded)?;
        if project.task(task_id).is_none() {
            return Err(BoardViewError::UnknownTask(task_id.clone()));
        }
        state.selected = Some(task_id.clone());
        Ok(())
    }

    /// Clears the task selection.
    pub fn clear_selection(&self) {
        self.write_state().selected = None;
    }

    /// Returns the selected task as it appears in the latest snapshot.
    ///
    /// Resolves to `None` once the task disappears from the board.
    #[must_use]
    pub fn selected_task(&self) -> Option<Task> {
        let state = self.read_state();
        let selected = state.selected.as_ref()?;
        state.synced.ready()?.task(selected).cloned()
    }

    /// Posts a comment on the selected task as the configured author.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::NoTaskSelected`] when nothing is selected,
    /// [`BoardViewError::Domain`] without sending a request when the text is
    /// blank, or the service failure.
    pub async fn add_comment(&self, content: &str) -> BoardViewResult<CommentId> {
        self.ensure_mounted()?;
        let task_id = self
            .selected_task()
            .map(|task| task.id().clone())
            .ok_or(BoardViewError::NoTaskSelected)?;
        let body = self.validated(BoardSection::Comments, CommentBody::new(content))?;
        let request = NewComment {
            task_id,
            body,
            author_email: self.settings.author_email.clone(),
        };
        let created = self
            .mutate(BoardSection::Comments, self.gateway.add_comment(&request))
            .await?;
        debug!(comment_id = %created.id, task_id = %request.task_id, "comment added");
        Ok(created.id)
    }

    /// Edits a task on this board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::UnknownTask`] when the task is not on the
    /// board, [`BoardViewError::Domain`] when a provided title is blank, or
    /// the service failure.
    pub async fn update_task_details(
        &self,
        task_id: &TaskId,
        edit: TaskEdit,
    ) -> BoardViewResult<()> {
        self.ensure_mounted()?;
        self.task_status(task_id)?;
        let update = self.validated(BoardSection::Details, edit.into_update(task_id.clone()))?;
        self.mutate(
            BoardSection::Details,
            self.gateway.update_task_details(&update),
        )
        .await?;
        Ok(())
    }

    /// Edits the project's name, description, or due date.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::Domain`] when a provided name is blank, or
    /// the service failure.
    pub async fn update_project_details(&self, edit: ProjectEdit) -> BoardViewResult<()> {
        self.ensure_mounted()?;
        let update =
            self.validated(BoardSection::Details, edit.into_update(self.project_id.clone()))?;
        self.mutate(
            BoardSection::Details,
            self.gateway.update_project_details(&update),
        )
        .await?;
        Ok(())
    }

    /// Returns recorded failure notices.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.read_state().synced.notices().to_vec()
    }

    /// Returns and clears recorded failure notices.
    pub fn take_notices(&self) -> Vec<Notice> {
        self.write_state().synced.take_notices()
    }

    /// Closes the view; later results are dropped.
    pub fn unmount(&self) {
        debug!(project_id = %self.project_id, "board unmounted");
        self.sequencer.unmount();
    }

    /// Returns whether the view still accepts results.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.sequencer.is_mounted()
    }

    /// Runs a mutation, records a notice on failure, and re-fetches on
    /// success.
    async fn mutate<T>(
        &self,
        section: BoardSection,
        call: impl Future<Output = BoardGatewayResult<T>>,
    ) -> BoardViewResult<T> {
        let result = within(self.settings.request_timeout, call).await;
        self.ensure_mounted()?;
        match result {
            Ok(acknowledged) => {
                self.load().await?;
                Ok(acknowledged)
            }
            Err(err) => {
                warn!(
                    project_id = %self.project_id,
                    section = %section,
                    error = %err,
                    "mutation failed"
                );
                self.write_state().synced.record(section, err.to_string());
                Err(err.into())
            }
        }
    }

    fn validated<T>(
        &self,
        section: BoardSection,
        input: Result<T, BoardDomainError>,
    ) -> BoardViewResult<T> {
        input.map_err(|err| {
            self.write_state().synced.record(section, err.to_string());
            BoardViewError::from(err)
        })
    }

    fn task_status(&self, task_id: &TaskId) -> BoardViewResult<TaskStatus> {
        let state = self.read_state();
        let project = state.synced.ready().ok_or(BoardViewError::NotLoaded)?;
        project
            .task(task_id)
            .map(Task::status)
            .ok_or_else(|| BoardViewError::UnknownTask(task_id.clone()))
    }

    fn author_or(&self, email: Option<&str>) -> String {
        email
            .map(str::trim)
            .filter(|trimmed| !trimmed.is_empty())
            .unwrap_or(self.settings.author_email.as_str())
            .to_owned()
    }

    fn ensure_mounted(&self) -> BoardViewResult<()> {
        if self.sequencer.is_mounted() {
            Ok(())
        } else {
            Err(BoardViewError::Unmounted)
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
