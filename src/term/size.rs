//! Terminal window size

use std::os::unix::io::RawFd;

/// Window size in characters and pixels
///
/// Doubles as the event payload delivered to resize subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Number of rows (characters)
    pub rows: u16,
    /// Number of columns (characters)
    pub cols: u16,
    /// Width in pixels (optional, can be 0)
    pub pixel_width: u16,
    /// Height in pixels (optional, can be 0)
    pub pixel_height: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        }
    }

    /// Convert to the libc winsize structure
    pub fn to_winsize(&self) -> libc::winsize {
        libc::winsize {
            ws_row: self.rows,
            ws_col: self.cols,
            ws_xpixel: self.pixel_width,
            ws_ypixel: self.pixel_height,
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl From<libc::winsize> for WindowSize {
    fn from(ws: libc::winsize) -> Self {
        Self {
            rows: ws.ws_row,
            cols: ws.ws_col,
            pixel_width: ws.ws_xpixel,
            pixel_height: ws.ws_ypixel,
        }
    }
}

/// Query the window size of a terminal descriptor
pub fn window_size(fd: RawFd) -> nix::Result<WindowSize> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: TIOCGWINSZ fills the winsize struct we own
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ as libc::c_ulong, &mut ws) };

    if result == -1 {
        return Err(nix::errno::Errno::last());
    }
    Ok(WindowSize::from(ws))
}

/// Set the window size of a terminal descriptor
pub fn set_window_size(fd: RawFd, size: WindowSize) -> nix::Result<()> {
    let ws = size.to_winsize();

    // SAFETY: TIOCSWINSZ reads the winsize struct we own
    let result = unsafe { libc::ioctl(fd, libc::TIOCSWINSZ as libc::c_ulong, &ws) };

    if result == -1 {
        return Err(nix::errno::Errno::last());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::io::AsRawFd;

    use nix::fcntl::OFlag;
    use nix::pty::posix_openpt;

    #[test]
    fn test_window_size_default() {
        let size = WindowSize::default();
        assert_eq!(size.cols, 80);
        assert_eq!(size.rows, 24);
    }

    #[test]
    fn test_window_size_new() {
        let size = WindowSize::new(120, 40);
        assert_eq!(size.cols, 120);
        assert_eq!(size.rows, 40);
        assert_eq!(size.pixel_width, 0);
        assert_eq!(size.pixel_height, 0);
    }

    #[test]
    fn test_winsize_round_trip() {
        let size = WindowSize::new(132, 50);
        let ws = size.to_winsize();
        assert_eq!(ws.ws_col, 132);
        assert_eq!(ws.ws_row, 50);
        assert_eq!(WindowSize::from(ws), size);
    }

    #[test]
    fn test_query_follows_set() {
        let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY).expect("open PTY master");
        let fd = master.as_raw_fd();

        set_window_size(fd, WindowSize::new(97, 41)).expect("set window size");
        let size = window_size(fd).expect("query window size");
        assert_eq!(size.cols, 97);
        assert_eq!(size.rows, 41);
    }

    #[test]
    fn test_query_fails_on_non_tty() {
        let devnull = std::fs::File::open("/dev/null").expect("open /dev/null");
        assert!(window_size(devnull.as_raw_fd()).is_err());
    }
}
