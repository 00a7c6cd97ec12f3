//! Raw-mode termios helpers
//!
//! Thin wrappers over the termios attribute calls plus the raw-mode flag
//! transformation a session applies when it opens.

use std::os::fd::BorrowedFd;
use std::os::unix::io::RawFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

/// Read the current attributes of a terminal descriptor
pub fn get_attributes(fd: RawFd) -> nix::Result<Termios> {
    // SAFETY: the caller keeps fd open for the duration of the call
    let fd = unsafe { BorrowedFd::borrow_raw(fd) };
    termios::tcgetattr(fd)
}

/// Apply attributes to a terminal descriptor immediately
pub fn set_attributes(fd: RawFd, attributes: &Termios) -> nix::Result<()> {
    // SAFETY: the caller keeps fd open for the duration of the call
    let fd = unsafe { BorrowedFd::borrow_raw(fd) };
    termios::tcsetattr(fd, SetArg::TCSANOW, attributes)
}

/// Switch a set of attributes to raw mode
///
/// Input translation, output post-processing, echo, canonical buffering,
/// and signal generation are disabled, the character size is forced to
/// 8 bits, and reads block until a single byte arrives.
pub fn make_raw(attributes: &mut Termios) {
    attributes.input_flags &= !(InputFlags::IGNBRK
        | InputFlags::BRKINT
        | InputFlags::PARMRK
        | InputFlags::ISTRIP
        | InputFlags::INLCR
        | InputFlags::IGNCR
        | InputFlags::ICRNL
        | InputFlags::IXON);
    attributes.output_flags &= !OutputFlags::OPOST;
    attributes.local_flags &= !(LocalFlags::ECHO
        | LocalFlags::ECHONL
        | LocalFlags::ICANON
        | LocalFlags::ISIG
        | LocalFlags::IEXTEN);
    attributes.control_flags &= !(ControlFlags::CSIZE | ControlFlags::PARENB);
    attributes.control_flags |= ControlFlags::CS8;
    attributes.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    attributes.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
}
