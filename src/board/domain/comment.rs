//! Comment attached to a task.

use super::CommentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment as last fetched from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    content: String,
    author_email: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Builds a comment from decoded server data.
    #[must_use]
    pub const fn new(
        id: CommentId,
        content: String,
        author_email: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            author_email,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the author email.
    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    /// Returns the server creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
