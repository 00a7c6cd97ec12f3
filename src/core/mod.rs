//! Screen model
//!
//! Platform-independent screen state: a grid of character cells with logical
//! dimensions, grow-only storage, and deterministic rendering to
//! cursor-addressed escape sequences. Nothing in this module touches a
//! device; the `term` module owns all terminal I/O.
//!
//! The model is completely deterministic: the same sequence of writes and
//! resizes always produces the same rendered frame.

mod cell;
mod screen;

pub use cell::Cell;
pub use screen::{Screen, ScreenError, CURSOR_HOME};
