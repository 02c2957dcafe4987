//! In-memory board service for tests and offline demos.

mod gateway;

pub use gateway::InMemoryBoardGateway;
