//! Port contracts for the board client.
//!
//! Ports define transport-agnostic interfaces used by the board views.

pub mod gateway;
pub mod payloads;

pub use gateway::{BoardGateway, BoardGatewayError, BoardGatewayResult};
pub use payloads::{
    CreatedComment, CreatedTask, GatewayOperation, NewComment, NewProject, NewTask,
    ProjectDetails, ProjectDetailsUpdate, ProjectStatusChange, TaskDetails, TaskDetailsUpdate,
    TaskStatusChange,
};
