//! Errors surfaced by the board views.

use crate::board::{
    domain::{BoardDomainError, MoveDirection, TaskId, TaskStatus},
    ports::BoardGatewayError,
};
use thiserror::Error;

/// Errors returned by [`super::TaskBoardView`] and [`super::ProjectListView`].
#[derive(Debug, Clone, Error)]
pub enum BoardViewError {
    /// User input failed validation; no request was sent.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The board service call failed.
    #[error(transparent)]
    Gateway(#[from] BoardGatewayError),

    /// The operation needs a loaded snapshot.
    #[error("the view has not loaded yet")]
    NotLoaded,

    /// The task is not on the current board.
    #[error("task {0} is not on this board")]
    UnknownTask(TaskId),

    /// The requested move is not offered for the task's status.
    #[error("task {task_id} cannot move {direction} from {status}")]
    TransitionUnavailable {
        /// Task that was asked to move.
        task_id: TaskId,
        /// Status the task currently has.
        status: TaskStatus,
        /// Requested direction.
        direction: MoveDirection,
    },

    /// Commenting needs a selected task.
    #[error("no task is selected")]
    NoTaskSelected,

    /// The view was unmounted; results are no longer applied.
    #[error("the view has been unmounted")]
    Unmounted,
}

/// Result type for view operations.
pub type BoardViewResult<T> = Result<T, BoardViewError>;
