//! Dashboard listing an organization's projects.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::error::{BoardViewError, BoardViewResult};
use super::sync::{BoardSection, FetchSequencer, LoadState, Notice, Synced, ViewSettings, within};
use crate::board::{
    domain::{OrgSlug, ProjectId, ProjectName, ProjectSummary},
    ports::{BoardGateway, NewProject},
};

#[derive(Debug, Default)]
struct DashboardState {
    synced: Synced<Vec<ProjectSummary>>,
    create_form_open: bool,
}

/// Project list for one organization, newest first.
pub struct ProjectListView<G>
where
    G: BoardGateway,
{
    gateway: Arc<G>,
    org: OrgSlug,
    settings: ViewSettings,
    sequencer: FetchSequencer,
    state: RwLock<DashboardState>,
}

impl<G> ProjectListView<G>
where
    G: BoardGateway,
{
    /// Creates an unloaded dashboard for `org`.
    #[must_use]
    pub fn new(gateway: Arc<G>, org: OrgSlug, settings: ViewSettings) -> Self {
        Self {
            gateway,
            org,
            settings,
            sequencer: FetchSequencer::default(),
            state: RwLock::new(DashboardState::default()),
        }
    }

    /// Returns the organization shown.
    #[must_use]
    pub const fn org(&self) -> &OrgSlug {
        &self.org
    }

    /// Fetches the project list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::Gateway`] when the fetch fails and
    /// [`BoardViewError::Unmounted`] when the view was closed.
    pub async fn load(&self) -> BoardViewResult<()> {
        self.ensure_mounted()?;
        let ticket = self.sequencer.issue();
        let result = within(
            self.settings.request_timeout,
            self.gateway.list_projects(&self.org),
        )
        .await;

        let mut state = self.write_state();
        if !self.sequencer.is_mounted() {
            return Err(BoardViewError::Unmounted);
        }
        let (outcome, reply) = match result {
            Ok(projects) => {
                debug!(org = %self.org, count = projects.len(), "projects fetched");
                (Ok(projects), Ok(()))
            }
            Err(err) => {
                warn!(org = %self.org, error = %err, "project list fetch failed");
                (Err(err.to_string()), Err(err))
            }
        };
        if !state.synced.apply(ticket, outcome, BoardSection::Projects) {
            debug!(org = %self.org, ticket, "discarding stale project list");
        }
        drop(state);
        reply.map_err(BoardViewError::from)
    }

    /// Returns the latest applied project list.
    #[must_use]
    pub fn projects(&self) -> Option<Vec<ProjectSummary>> {
        self.read_state().synced.ready().cloned()
    }

    /// Returns the load progress.
    #[must_use]
    pub fn load_state(&self) -> LoadState<Vec<ProjectSummary>> {
        self.read_state().synced.load().clone()
    }

    /// Opens the new-project form.
    pub fn open_create_form(&self) {
        self.write_state().create_form_open = true;
    }

    /// Closes the new-project form.
    pub fn close_create_form(&self) {
        self.write_state().create_form_open = false;
    }

    /// Returns whether the new-project form is open.
    #[must_use]
    pub fn is_create_form_open(&self) -> bool {
        self.read_state().create_form_open
    }

    /// Creates a project and refreshes the list.
    ///
    /// The form closes only after the service confirms the project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardViewError::Domain`] without sending a request when the
    /// name is blank, or the service failure.
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
    ) -> BoardViewResult<ProjectId> {
        self.ensure_mounted()?;
        let project_name = ProjectName::new(name).map_err(|err| {
            self.write_state()
                .synced
                .record(BoardSection::NewProject, err.to_string());
            BoardViewError::from(err)
        })?;
        let request = NewProject {
            org: self.org.clone(),
            name: project_name,
            description: description.trim().to_owned(),
        };
        let result = within(
            self.settings.request_timeout,
            self.gateway.create_project(&request),
        )
        .await;
        self.ensure_mounted()?;
        match result {
            Ok(id) => {
                info!(org = %self.org, project_id = %id, "project created");
                self.close_create_form();
                self.load().await?;
                Ok(id)
            }
            Err(err) => {
                warn!(org = %self.org, error = %err, "project creation failed");
                self.write_state()
                    .synced
                    .record(BoardSection::NewProject, err.to_string());
                Err(err.into())
            }
        }
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
        self.sequencer.unmount();
    }

    /// Returns whether the view still accepts results.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.sequencer.is_mounted()
    }

    fn ensure_mounted(&self) -> BoardViewResult<()> {
        if self.sequencer.is_mounted() {
            Ok(())
        } else {
            Err(BoardViewError::Unmounted)
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
