//! Promanage: project management dashboard client.
//!
//! This crate lists an organization's projects and drives a three-column
//! Kanban board for each project against a GraphQL board service. Task
//! status moves one column at a time, and every confirmed change is followed
//! by a re-fetch so the board always shows server state.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: projects, tasks, and comments with their validation rules
//! - **Ports**: the [`board::ports::BoardGateway`] trait
//! - **Adapters**: GraphQL over HTTP, in-memory, and caching gateways
//! - **Services**: board views holding snapshots, forms, and notices
//!
//! # Modules
//!
//! - [`board`]: the board client
//! - [`config`]: endpoint, organization, author, and timeout settings
//! - [`telemetry`]: tracing subscriber setup

pub mod board;
pub mod config;
pub mod telemetry;
