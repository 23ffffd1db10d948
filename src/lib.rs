//! Dash game library.
//!
//! `main.rs` only calls `game::run`. Everything else lives here so the
//! integration tests in `tests/` can build a headless app from the same plugins.

pub mod common;
pub mod game;
pub mod plugins;
