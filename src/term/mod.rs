//! Terminal session
//!
//! Everything that touches a device: raw-mode entry and restoration, frame
//! writes, window-size queries, and the background watcher that picks up
//! resize signals, resizes the shared screen, and fans the new size out to
//! subscribers.

mod error;
mod raw;
mod session;
mod size;

pub use error::{Error, Result};
pub use raw::{get_attributes, make_raw, set_attributes};
pub use session::Terminal;
pub use size::{set_window_size, window_size, WindowSize};
