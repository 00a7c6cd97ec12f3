//! Terminal session lifecycle
//!
//! A session owns one terminal descriptor. Opening saves the device
//! attributes, switches to raw mode, sizes the shared screen from the
//! device, and starts the resize watcher; closing restores the attributes
//! and stops the watcher. The screen lives behind a lock shared with the
//! watcher, so drawing, refreshing, and resize handling never interleave
//! mid-frame.

use std::fs::File;
use std::io::Write;
use std::os::unix::io::{FromRawFd, RawFd};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use nix::sys::termios::Termios;
use parking_lot::{Mutex, MutexGuard};
use signal_hook::consts::SIGWINCH;
use signal_hook::iterator::{Handle, Signals};

use super::error::{Error, Result};
use super::raw;
use super::size::{window_size, WindowSize};
use crate::core::Screen;

type SharedScreen = Arc<Mutex<Screen>>;
type Subscribers = Arc<Mutex<Vec<SyncSender<WindowSize>>>>;

/// State that only exists while the session owns a device
struct Active {
    /// The descriptor the session was opened on
    fd: RawFd,
    /// Duplicate of `fd` used for frame writes
    device: File,
    /// Attributes to restore on close
    original: Termios,
    /// Handle that ends the watcher's signal loop
    stop: Handle,
    /// The watcher thread
    watcher: JoinHandle<()>,
}

/// A raw-mode terminal session around a shared screen
///
/// The session starts inert: subscribing and drawing are allowed, but the
/// screen is empty and nothing reaches a device until [`open`](Self::open).
pub struct Terminal {
    screen: SharedScreen,
    subscribers: Subscribers,
    active: Option<Active>,
}

impl Terminal {
    /// Create an inert session with an empty screen
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::new(0, 0))),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            active: None,
        }
    }

    /// Check whether the session currently owns a device
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Get the descriptor of the open device
    pub fn fd(&self) -> Option<RawFd> {
        self.active.as_ref().map(|active| active.fd)
    }

    /// Access the shared screen
    ///
    /// The guard also blocks the resize watcher, so hold it only while
    /// drawing or inspecting.
    pub fn screen(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock()
    }

    /// Register a channel for resize events
    ///
    /// Events arrive in subscription order while the session is open.
    /// Delivery blocks on a full channel and skips a disconnected one.
    /// Subscribing is allowed before and after [`open`](Self::open); there
    /// is no unsubscribe.
    pub fn subscribe_to_resizes(&self, tx: SyncSender<WindowSize>) {
        self.subscribers.lock().push(tx);
    }

    /// Attach to a terminal device and enter raw mode
    ///
    /// Saves the device attributes, applies raw mode, sizes the screen from
    /// the device, and starts the resize watcher. On any failure the saved
    /// attributes are restored and the session stays inert. The caller must
    /// keep `fd` open until [`close`](Self::close).
    pub fn open(&mut self, fd: RawFd) -> Result<()> {
        if self.active.is_some() {
            return Err(Error::AlreadyOpen);
        }

        let original = raw::get_attributes(fd).map_err(Error::GetAttributes)?;

        let mut attributes = original.clone();
        raw::make_raw(&mut attributes);
        raw::set_attributes(fd, &attributes).map_err(Error::SetRawMode)?;

        // Raw mode is live from here on, so every failure path below has
        // to restore the saved attributes.
        let size = match window_size(fd) {
            Ok(size) => size,
            Err(err) => return Err(abort_open(fd, &original, Error::QuerySize(err))),
        };
        *self.screen.lock() = Screen::new(size.cols as usize, size.rows as usize);

        let device = match duplicate(fd) {
            Ok(device) => device,
            Err(err) => return Err(abort_open(fd, &original, Error::Duplicate(err))),
        };

        let signals = match Signals::new([SIGWINCH]) {
            Ok(signals) => signals,
            Err(err) => return Err(abort_open(fd, &original, Error::Watcher(err))),
        };
        let stop = signals.handle();

        let screen = Arc::clone(&self.screen);
        let subscribers = Arc::clone(&self.subscribers);
        let watcher = match thread::Builder::new()
            .name("winch-watcher".into())
            .spawn(move || watch(signals, fd, screen, subscribers))
        {
            Ok(watcher) => watcher,
            Err(err) => {
                stop.close();
                return Err(abort_open(fd, &original, Error::Watcher(err)));
            }
        };

        log::debug!("session open on fd {} at {}x{}", fd, size.cols, size.rows);
        self.active = Some(Active {
            fd,
            device,
            original,
            stop,
            watcher,
        });
        Ok(())
    }

    /// Restore the device attributes and stop the watcher
    ///
    /// The watcher is stopped and joined even when restoring the attributes
    /// fails. Once `close` returns, no further screen mutation or resize
    /// delivery can happen.
    pub fn close(&mut self) -> Result<()> {
        let active = self.active.take().ok_or(Error::NotOpen)?;

        let restored = raw::set_attributes(active.fd, &active.original).map_err(Error::RestoreMode);

        active.stop.close();
        if active.watcher.join().is_err() {
            log::error!("resize watcher panicked");
        }
        log::debug!("session closed on fd {}", active.fd);

        restored
    }

    /// Render the screen and write the frame to the device
    pub fn refresh(&self) -> Result<()> {
        let active = self.active.as_ref().ok_or(Error::NotOpen)?;

        let frame = self.screen.lock().render();
        log::trace!("refresh frame of {} bytes", frame.len());
        (&active.device)
            .write_all(frame.as_bytes())
            .map_err(Error::Write)
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active.is_some() {
            if let Err(err) = self.close() {
                log::warn!("closing session on drop failed: {}", err);
            }
        }
    }
}

/// Watcher loop: on every resize signal, bring the screen to the device
/// size and fan the event out to subscribers
fn watch(mut signals: Signals, fd: RawFd, screen: SharedScreen, subscribers: Subscribers) {
    log::debug!("resize watcher running on fd {}", fd);

    for _ in signals.forever() {
        let size = match window_size(fd) {
            Ok(size) => size,
            Err(err) => {
                log::debug!("window size query failed, skipping resize: {}", err);
                continue;
            }
        };

        screen.lock().resize(size.cols as usize, size.rows as usize);

        // Snapshot the list so a blocking send never holds the lock
        // against new subscriptions.
        let targets: Vec<SyncSender<WindowSize>> = subscribers.lock().clone();
        for tx in &targets {
            if tx.send(size).is_err() {
                log::debug!("skipping resize event for a disconnected subscriber");
            }
        }
    }

    log::debug!("resize watcher stopped on fd {}", fd);
}

/// Duplicate a descriptor into an owned `File` for frame writes
fn duplicate(fd: RawFd) -> std::io::Result<File> {
    let duped = unsafe { libc::dup(fd) };
    if duped < 0 {
        return Err(std::io::Error::last_os_error());
    }
    // SAFETY: duped is a freshly created descriptor we own
    Ok(unsafe { File::from_raw_fd(duped) })
}

/// Restore attributes after a failed open, folding in a restore failure
fn abort_open(fd: RawFd, original: &Termios, open_err: Error) -> Error {
    match raw::set_attributes(fd, original) {
        Ok(()) => open_err,
        Err(restore_err) => Error::OpenCleanup {
            open: Box::new(open_err),
            restore: Box::new(Error::RestoreMode(restore_err)),
        },
    }
}
