//! GraphQL-over-HTTP adapter for the board gateway port.

mod client;
mod documents;
mod wire;

pub use client::GraphQlBoardGateway;
