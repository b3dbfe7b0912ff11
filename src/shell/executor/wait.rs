use log::debug;
use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::sys::wait::WaitPidFlag as WF;
use nix::sys::wait::WaitStatus as WS;
use nix::unistd::Pid;
use std::fmt;

use crate::shell::error::{Result, ShellError};

/// `waitpid(-1, ...)`：任意子进程
pub const ANY_CHILD: Pid = Pid::from_raw(-1);

/// Final outcome of a child: it either exited or was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(i32),
}

impl Default for ChildStatus {
    fn default() -> Self {
        ChildStatus::Exited(0)
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Exited(code) => write!(f, "exit value {}", code),
            ChildStatus::Signaled(sig) => write!(f, "terminating signal {}", sig),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitEvent {
    Finished(Pid, ChildStatus),
    Stopped(Pid, i32),
    StillAlive,
}

impl WaitEvent {
    fn from_status(status: WS) -> Option<Self> {
        match status {
            WS::Exited(pid, code) => Some(WaitEvent::Finished(pid, ChildStatus::Exited(code))),
            WS::Signaled(pid, sig, _core_dumped) => {
                Some(WaitEvent::Finished(pid, ChildStatus::Signaled(sig as i32)))
            }
            WS::Stopped(pid, sig) => Some(WaitEvent::Stopped(pid, sig as i32)),
            WS::StillAlive => Some(WaitEvent::StillAlive),
            // Continued 以及 ptrace 事件都不是最终状态
            _ => None,
        }
    }
}

/// `block` 为真时等待到子进程结束或被停止；否则立即返回。
/// EINTR 会自动重试。
pub fn waitpidx(pid: Pid, block: bool) -> nix::Result<WaitEvent> {
    let options = if block { WF::WUNTRACED } else { WF::WNOHANG };
    loop {
        match waitpid(pid, Some(options)) {
            Ok(status) => {
                if let Some(event) = WaitEvent::from_status(status) {
                    return Ok(event);
                }
            }
            Err(Errno::EINTR) => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Blocks until the foreground child `pid` exits or is killed. A stop is
/// reported but does not end the wait.
pub fn wait_foreground(pid: Pid) -> Result<ChildStatus> {
    loop {
        let event = waitpidx(pid, true).map_err(|source| ShellError::Wait { pid, source })?;
        match event {
            WaitEvent::Finished(_, status) => {
                if let ChildStatus::Signaled(sig) = status {
                    println!("terminated by signal {}", sig);
                }
                debug!("前台进程 {} 结束: {:?}", pid, status);
                return Ok(status);
            }
            WaitEvent::Stopped(_, sig) => {
                println!("stopped by signal {}", sig);
            }
            WaitEvent::StillAlive => {}
        }
    }
}
