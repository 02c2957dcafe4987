//! Response cache in front of another board gateway.
//!
//! Reads are served from memory once fetched. Any mutation, successful or
//! not, evicts every cached read so the next read goes to the service. A read
//! that was in flight while a mutation ran is not stored.

use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;
use tracing::debug;

use crate::board::{
    domain::{OrgSlug, Project, ProjectId, ProjectStatus, ProjectSummary, Task, TaskId, TaskStatus},
    ports::{
        BoardGateway, BoardGatewayError, BoardGatewayResult, CreatedComment, CreatedTask,
        NewComment, NewProject, NewTask, ProjectDetails, ProjectDetailsUpdate,
        ProjectStatusChange, TaskDetails, TaskDetailsUpdate, TaskStatusChange,
    },
};

/// Gateway decorator caching query results until the next mutation.
#[derive(Debug, Default)]
pub struct CachingBoardGateway<G> {
    inner: G,
    state: RwLock<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    epoch: u64,
    projects: HashMap<OrgSlug, Vec<ProjectSummary>>,
    project_details: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
}

impl CacheState {
    fn clear(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.projects.clear();
        self.project_details.clear();
        self.tasks.clear();
    }
}

fn lock_error(err: &impl ToString) -> BoardGatewayError {
    BoardGatewayError::transport(std::io::Error::other(err.to_string()))
}

impl<G> CachingBoardGateway<G>
where
    G: BoardGateway,
{
    /// Wraps `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            state: RwLock::new(CacheState::default()),
        }
    }

    #[cfg(test)]
    pub(crate) const fn inner(&self) -> &G {
        &self.inner
    }

    /// Evicts every cached read.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the cache lock is
    /// poisoned.
    pub fn invalidate_all(&self) -> BoardGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.clear();
        Ok(())
    }

    fn lookup<T>(
        &self,
        read: impl FnOnce(&CacheState) -> Option<T>,
    ) -> BoardGatewayResult<(Option<T>, u64)> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok((read(&state), state.epoch))
    }

    fn store(&self, epoch: u64, write: impl FnOnce(&mut CacheState)) -> BoardGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        if state.epoch == epoch {
            write(&mut state);
        } else {
            debug!("discarding read that raced a mutation");
        }
        Ok(())
    }

    async fn mutate<T>(
        &self,
        mutation: impl Future<Output = BoardGatewayResult<T>> + Send,
    ) -> BoardGatewayResult<T> {
        self.invalidate_all()?;
        let result = mutation.await;
        self.invalidate_all()?;
        result
    }
}

#[async_trait]
impl<G> BoardGateway for CachingBoardGateway<G>
where
    G: BoardGateway,
{
    async fn list_projects(&self, org: &OrgSlug) -> BoardGatewayResult<Vec<ProjectSummary>> {
        let (cached, epoch) = self.lookup(|state| state.projects.get(org).cloned())?;
        if let Some(projects) = cached {
            debug!(org = %org, "project list served from cache");
            return Ok(projects);
        }
        let projects = self.inner.list_projects(org).await?;
        self.store(epoch, |state| {
            state.projects.insert(org.clone(), projects.clone());
        })?;
        Ok(projects)
    }

    async fn create_project(&self, request: &NewProject) -> BoardGatewayResult<ProjectId> {
        self.mutate(self.inner.create_project(request)).await
    }

    async fn get_project(&self, id: &ProjectId) -> BoardGatewayResult<Project> {
        let (cached, epoch) = self.lookup(|state| state.project_details.get(id).cloned())?;
        if let Some(project) = cached {
            debug!(project_id = %id, "project served from cache");
            return Ok(project);
        }
        let project = self.inner.get_project(id).await?;
        self.store(epoch, |state| {
            state.project_details.insert(id.clone(), project.clone());
        })?;
        Ok(project)
    }

    async fn get_task(&self, id: &TaskId) -> BoardGatewayResult<Task> {
        let (cached, epoch) = self.lookup(|state| state.tasks.get(id).cloned())?;
        if let Some(task) = cached {
            debug!(task_id = %id, "task served from cache");
            return Ok(task);
        }
        let task = self.inner.get_task(id).await?;
        self.store(epoch, |state| {
            state.tasks.insert(id.clone(), task.clone());
        })?;
        Ok(task)
    }

    async fn create_task(&self, request: &NewTask) -> BoardGatewayResult<CreatedTask> {
        self.mutate(self.inner.create_task(request)).await
    }

    async fn update_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> BoardGatewayResult<TaskStatusChange> {
        self.mutate(self.inner.update_task_status(id, status)).await
    }

    async fn update_project_status(
        &self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> BoardGatewayResult<ProjectStatusChange> {
        self.mutate(self.inner.update_project_status(id, status)).await
    }

    async fn add_comment(&self, request: &NewComment) -> BoardGatewayResult<CreatedComment> {
        self.mutate(self.inner.add_comment(request)).await
    }

    async fn update_project_details(
        &self,
        request: &ProjectDetailsUpdate,
    ) -> BoardGatewayResult<ProjectDetails> {
        self.mutate(self.inner.update_project_details(request)).await
    }

    async fn update_task_details(
        &self,
        request: &TaskDetailsUpdate,
    ) -> BoardGatewayResult<TaskDetails> {
        self.mutate(self.inner.update_task_details(request)).await
    }
}
