//! Validated user input for board mutations.
//!
//! Every value here is trimmed and checked before a request is built, so a
//! blank form submission never reaches the gateway.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization slug scoping the project list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgSlug(String);

impl OrgSlug {
    /// Creates a validated organization slug.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidOrgSlug`] when the slug is blank or
    /// contains inner whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(BoardDomainError::InvalidOrgSlug(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the slug as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Required project name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a project name from user input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyProjectName`] when the input is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw: String = value.into();
        non_blank(&raw, || BoardDomainError::EmptyProjectName).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Required task title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a task title from user input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the input is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw: String = value.into();
        non_blank(&raw, || BoardDomainError::EmptyTaskTitle).map(Self)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Required comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBody(String);

impl CommentBody {
    /// Creates a comment body from user input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCommentBody`] when the input is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw: String = value.into();
        non_blank(&raw, || BoardDomainError::EmptyCommentBody).map(Self)
    }

    /// Returns the comment text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn non_blank(
    raw: &str,
    blank_error: impl FnOnce() -> BoardDomainError,
) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(blank_error());
    }
    Ok(trimmed.to_owned())
}
