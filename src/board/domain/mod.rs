//! Domain model for the project board.
//!
//! Typed records for projects, tasks, and comments, the single-step task
//! status rule, and the column partition. Infrastructure concerns stay
//! outside this boundary.

mod column;
mod comment;
mod error;
mod ids;
mod input;
mod project;
mod task;

pub use column::Column;
pub use comment::Comment;
pub use error::{
    BoardDomainError, ParseMoveDirectionError, ParseProjectStatusError, ParseTaskStatusError,
};
pub use ids::{CommentId, ProjectId, TaskId};
pub use input::{CommentBody, OrgSlug, ProjectName, TaskTitle};
pub use project::{Project, ProjectRecord, ProjectStatus, ProjectSummary};
pub use task::{MoveDirection, Task, TaskRecord, TaskStatus};
