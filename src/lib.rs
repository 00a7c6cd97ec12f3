//! Termgrid
//!
//! A minimal terminal-screen library: put a terminal device into raw mode,
//! draw into an in-memory character grid, render the grid as cursor-addressed
//! escape sequences, and get notified when the window changes size.
//!
//! - `core`: the screen model (cells, grid, rendering)
//! - `term`: the terminal session (raw mode, refresh, resize watcher)

pub mod core;
pub mod term;
