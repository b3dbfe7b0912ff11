use nix::unistd::Pid;

use super::executor::ChildStatus;
use super::job_manager::JobTable;
use super::signals;

/// Shell 的全部运行状态，显式传给每个组件。
/// 前台模式标志例外，它由信号处理函数维护，见 `signals`。
#[derive(Debug)]
pub struct ShellContext {
    pub jobs: JobTable,
    pub last_status: ChildStatus,
    pid: Pid,
    running: bool,
}

impl ShellContext {
    pub fn new() -> Self {
        Self {
            jobs: JobTable::new(),
            last_status: ChildStatus::default(),
            pid: Pid::this(),
            running: true,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn foreground_only(&self) -> bool {
        signals::foreground_only()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for ShellContext {
    fn default() -> Self {
        Self::new()
    }
}
