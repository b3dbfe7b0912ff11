//! Process-wide signal state.
//!
//! Signal handlers cannot receive parameters, so the foreground-only flag
//! lives here as a pair of atomics rather than in `ShellContext`:
//!
//! * `FOREGROUND_ONLY` — written only by the SIGTSTP handler, read by the
//!   parser through [`foreground_only`].
//! * `MODE_CHANGES` — bumped by the handler after every toggle so the main
//!   loop can notice (and log) transitions outside of signal context.
//!
//! The handler does nothing but flip the flag and `write(2)` fixed byte
//! strings: no allocation, no formatting, no locks.

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::error::{Result, ShellError};

static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);
static MODE_CHANGES: AtomicUsize = AtomicUsize::new(0);

const ENTER_MESSAGE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_MESSAGE: &[u8] = b"\nExiting foreground-only mode\n";
const PROMPT_MARKER: &[u8] = b": ";

pub fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

pub fn mode_changes() -> usize {
    MODE_CHANGES.load(Ordering::SeqCst)
}

/// 启动时调用一次：shell 忽略 SIGINT，SIGTSTP 切换前台模式
pub fn install() -> Result<()> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    let toggle = SigAction::new(
        SigHandler::Handler(handle_sigtstp),
        SaFlags::SA_RESTART,
        SigSet::all(),
    );

    unsafe {
        sigaction(Signal::SIGINT, &ignore).map_err(ShellError::Signal)?;
        sigaction(Signal::SIGTSTP, &toggle).map_err(ShellError::Signal)?;
    }
    Ok(())
}

/// Runs in the forked child before exec. Foreground children get the
/// default SIGINT so Ctrl-C kills them; background children keep it
/// ignored. No child reacts to SIGTSTP.
pub fn reset_for_child(foreground: bool) -> nix::Result<()> {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());

    unsafe {
        if foreground {
            sigaction(Signal::SIGINT, &default)?;
        }
        sigaction(Signal::SIGTSTP, &ignore)?;
    }
    Ok(())
}

extern "C" fn handle_sigtstp(_signo: libc::c_int) {
    let saved = errno::errno();
    toggle_foreground_only(libc::STDOUT_FILENO);
    errno::set_errno(saved);
}

/// Flips the mode and announces it on `fd`. Returns the new mode.
fn toggle_foreground_only(fd: RawFd) -> bool {
    let entering = !FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let message = if entering { ENTER_MESSAGE } else { EXIT_MESSAGE };
    write_raw(fd, message);
    write_raw(fd, PROMPT_MARKER);
    MODE_CHANGES.fetch_add(1, Ordering::SeqCst);
    entering
}

fn write_raw(fd: RawFd, bytes: &[u8]) {
    let mut written = 0;
    while written < bytes.len() {
        let rest = &bytes[written..];
        let n = unsafe { libc::write(fd, rest.as_ptr().cast(), rest.len()) };
        if n > 0 {
            written += n as usize;
        } else if n < 0 && errno::errno().0 == libc::EINTR {
            continue;
        } else {
            return;
        }
    }
}
