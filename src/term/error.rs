//! Error types for terminal sessions

use std::io;
use thiserror::Error;

/// Terminal session error type
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the device attributes failed
    #[error("Failed to read terminal attributes: {0}")]
    GetAttributes(#[source] nix::Error),

    /// Applying raw-mode attributes failed
    #[error("Failed to enter raw mode: {0}")]
    SetRawMode(#[source] nix::Error),

    /// Restoring the saved attributes failed
    #[error("Failed to restore terminal attributes: {0}")]
    RestoreMode(#[source] nix::Error),

    /// The window-size ioctl failed
    #[error("Failed to query window size: {0}")]
    QuerySize(#[source] nix::Error),

    /// Duplicating the device descriptor for frame writes failed
    #[error("Failed to duplicate terminal descriptor: {0}")]
    Duplicate(#[source] io::Error),

    /// Registering the resize signal or spawning the watcher failed
    #[error("Failed to start resize watcher: {0}")]
    Watcher(#[source] io::Error),

    /// Writing a frame to the device failed
    #[error("Failed to write to terminal: {0}")]
    Write(#[source] io::Error),

    /// The session already owns a device
    #[error("Session is already open")]
    AlreadyOpen,

    /// The session does not own a device
    #[error("Session is not open")]
    NotOpen,

    /// Opening failed and the saved attributes could not be restored either
    #[error("{open} (restoring terminal attributes also failed: {restore})")]
    OpenCleanup {
        open: Box<Error>,
        restore: Box<Error>,
    },
}

/// Result type for terminal sessions
pub type Result<T> = std::result::Result<T, Error>;
