//! Board views coordinating the gateway with screen state.
//!
//! Views hold the latest fetched snapshot, form and selection state, and
//! per-section failure notices. They never predict server results.

mod board;
mod dashboard;
mod error;
mod sync;

pub use board::{ProjectEdit, TaskBoardView, TaskEdit};
pub use dashboard::ProjectListView;
pub use error::{BoardViewError, BoardViewResult};
pub use sync::{BoardSection, LoadState, Notice, ViewSettings};
