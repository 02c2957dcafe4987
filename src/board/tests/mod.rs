//! Unit tests for the board module.
//!
//! Tests are organised by layer: domain rules, gateway adapters, views, and
//! text rendering.

mod presentation_tests;
