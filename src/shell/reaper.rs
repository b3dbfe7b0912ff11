use log::{debug, warn};
use nix::errno::Errno;
use nix::unistd::Pid;
use std::fmt;

use super::context::ShellContext;
use super::executor::wait::{waitpidx, WaitEvent, ANY_CHILD};
use super::executor::ChildStatus;

/// 一个已回收的后台子进程
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub pid: Pid,
    pub status: ChildStatus,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            ChildStatus::Exited(code) => {
                write!(f, "background pid {} is done. exit value {}", self.pid, code)
            }
            ChildStatus::Signaled(sig) => write!(
                f,
                "background pid {} is done. terminated by signal {}",
                self.pid, sig
            ),
        }
    }
}

/// Collects every background child that has already finished, without
/// blocking. Finished children are removed from the job table and their
/// status becomes the shell's last status.
pub fn reap(ctx: &mut ShellContext) -> Vec<Completion> {
    let mut finished = Vec::new();
    if ctx.jobs.is_empty() {
        return finished;
    }

    loop {
        match waitpidx(ANY_CHILD, false) {
            Ok(WaitEvent::Finished(pid, status)) => {
                if !ctx.jobs.remove(pid) {
                    warn!("回收了不在后台进程表中的子进程: {}", pid);
                }
                debug!("后台进程 {} 结束: {:?}", pid, status);
                ctx.last_status = status;
                finished.push(Completion { pid, status });
            }
            Ok(WaitEvent::Stopped(..)) => continue,
            Ok(WaitEvent::StillAlive) | Err(Errno::ECHILD) => break,
            Err(err) => {
                warn!("waitpid 轮询失败: {}", err);
                break;
            }
        }
    }
    finished
}
