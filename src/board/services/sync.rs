//! Snapshot bookkeeping shared by the board views.
//!
//! Every fetch draws a generation ticket when it is issued. A finished fetch
//! is applied only when its ticket is newer than the last applied one, so a
//! slow response can never overwrite a fresher snapshot.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::board::ports::{BoardGatewayError, BoardGatewayResult};
use crate::config::{ClientConfig, DEFAULT_AUTHOR_EMAIL, DEFAULT_TIMEOUT};

/// Part of the screen a failure notice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardSection {
    /// Project detail and columns.
    Board,
    /// Project status badge and toggle.
    ProjectStatus,
    /// New-task form.
    NewTask,
    /// Column move buttons.
    Transition,
    /// Comment list and input of the selected task.
    Comments,
    /// Task or project edit form.
    Details,
    /// Dashboard project list.
    Projects,
    /// New-project form.
    NewProject,
}

impl BoardSection {
    /// Returns a short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::ProjectStatus => "project status",
            Self::NewTask => "new task",
            Self::Transition => "move task",
            Self::Comments => "comments",
            Self::Details => "details",
            Self::Projects => "projects",
            Self::NewProject => "new project",
        }
    }
}

impl fmt::Display for BoardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure message scoped to one section of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Section that failed.
    pub section: BoardSection,
    /// Human-readable failure message.
    pub message: String,
}

impl Notice {
    /// Creates a notice.
    #[must_use]
    pub fn new(section: BoardSection, message: impl Into<String>) -> Self {
        Self {
            section,
            message: message.into(),
        }
    }
}

/// Load progress of a view's data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    /// No fetch has completed yet.
    #[default]
    Loading,
    /// Latest applied snapshot.
    Ready(T),
    /// The first load failed with this message.
    Failed(String),
}

impl<T> LoadState<T> {
    /// Returns the snapshot when one is loaded.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    /// Returns whether no fetch has completed yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the failure message of a failed first load.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

/// Per-view settings taken from the client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    /// Default assignee for new tasks and author for comments.
    pub author_email: String,
    /// Deadline applied to every service call.
    pub request_timeout: Duration,
}

impl ViewSettings {
    /// Extracts view settings from client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            author_email: config.author_email().to_owned(),
            request_timeout: config.request_timeout(),
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            author_email: DEFAULT_AUTHOR_EMAIL.to_owned(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Issues generation tickets and tracks whether the view is mounted.
#[derive(Debug)]
pub(super) struct FetchSequencer {
    issued: AtomicU64,
    mounted: AtomicBool,
}

impl Default for FetchSequencer {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
        }
    }
}

impl FetchSequencer {
    pub(super) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst).saturating_add(1)
    }

    pub(super) fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub(super) fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

/// Snapshot, ticket watermark, and notices of one view.
#[derive(Debug)]
pub(super) struct Synced<T> {
    load: LoadState<T>,
    applied: u64,
    notices: Vec<Notice>,
}

impl<T> Default for Synced<T> {
    fn default() -> Self {
        Self {
            load: LoadState::Loading,
            applied: 0,
            notices: Vec::new(),
        }
    }
}

impl<T> Synced<T> {
    /// Applies a fetch outcome unless a newer ticket was already applied.
    ///
    /// A failed refresh keeps the loaded snapshot and records a notice for
    /// `section`; a failed first load marks the view failed.
    pub(super) fn apply(
        &mut self,
        ticket: u64,
        outcome: Result<T, String>,
        section: BoardSection,
    ) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        match outcome {
            Ok(value) => self.load = LoadState::Ready(value),
            Err(message) => {
                if self.load.ready().is_some() {
                    self.notices.push(Notice::new(section, message));
                } else {
                    self.load = LoadState::Failed(message);
                }
            }
        }
        true
    }

    pub(super) const fn load(&self) -> &LoadState<T> {
        &self.load
    }

    pub(super) const fn ready(&self) -> Option<&T> {
        self.load.ready()
    }

    pub(super) fn record(&mut self, section: BoardSection, message: impl Into<String>) {
        self.notices.push(Notice::new(section, message));
    }

    pub(super) fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub(super) fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Bounds a service call by `timeout`.
pub(super) async fn within<T>(
    timeout: Duration,
    call: impl Future<Output = BoardGatewayResult<T>>,
) -> BoardGatewayResult<T> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| BoardGatewayError::Timeout(timeout))?
}
