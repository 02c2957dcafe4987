//! Adapter implementations for board ports.

pub mod cache;
pub mod graphql;
pub mod memory;
