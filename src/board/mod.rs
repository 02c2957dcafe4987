//! Project board client: dashboard, Kanban board, and task detail.
//!
//! Follows the same layering as the rest of the crate:
//!
//! - [`domain`]: projects, tasks, comments, and the status transition rule
//! - [`ports`]: the gateway contract for the remote board service
//! - [`adapters`]: GraphQL over HTTP, an in-memory service, and a response
//!   cache
//! - [`services`]: views that keep screen state in sync with the service
//! - [`presentation`]: plain-text rendering of views

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod presentation;
pub mod services;

#[cfg(test)]
mod tests;
