//! Task record, status lifecycle, and move directions.

use super::{Comment, ParseMoveDirectionError, ParseTaskStatusError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// The board moves tasks one step at a time along
/// `TODO -> IN_PROGRESS -> DONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is under way.
    InProgress,
    /// Work is complete.
    Done,
}

impl TaskStatus {
    /// Every status in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    /// Returns the heading of the column holding this status.
    #[must_use]
    pub const fn column_title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Completed",
        }
    }

    /// Returns the next status, or `None` for [`TaskStatus::Done`].
    #[must_use]
    pub const fn forward(self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Returns the previous status, or `None` for [`TaskStatus::Todo`].
    #[must_use]
    pub const fn back(self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::InProgress => Some(Self::Todo),
            Self::Done => Some(Self::InProgress),
        }
    }

    /// Returns the status one step away in `direction`, if any.
    #[must_use]
    pub const fn step(self, direction: MoveDirection) -> Option<Self> {
        match direction {
            MoveDirection::Forward => self.forward(),
            MoveDirection::Back => self.back(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Direction of a single-step board move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    /// Towards [`TaskStatus::Done`].
    Forward,
    /// Towards [`TaskStatus::Todo`].
    Back,
}

impl MoveDirection {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MoveDirection {
    type Error = ParseMoveDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "back" | "backward" => Ok(Self::Back),
            _ => Err(ParseMoveDirectionError(value.to_owned())),
        }
    }
}

/// A task as last fetched from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    assignee_email: String,
    due_date: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
}

/// Parameter object for building a [`Task`] from decoded server data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Server identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Free-form description; empty when unset.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Assignee email, unvalidated; empty when unassigned.
    pub assignee_email: String,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Comments in server order.
    pub comments: Vec<Comment>,
}

impl Task {
    /// Builds a task from decoded server data.
    #[must_use]
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            status: record.status,
            assignee_email: record.assignee_email,
            due_date: record.due_date,
            comments: record.comments,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee email.
    #[must_use]
    pub fn assignee_email(&self) -> &str {
        &self.assignee_email
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns comments in server order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the number of comments.
    #[must_use]
    pub const fn comment_count(&self) -> usize {
        self.comments.len()
    }
}
