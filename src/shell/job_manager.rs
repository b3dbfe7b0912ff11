use nix::unistd::Pid;

/// 后台进程表，按启动顺序保存尚未回收的子进程
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    pids: Vec<Pid>,
}

impl JobTable {
    pub fn new() -> Self {
        Self { pids: Vec::new() }
    }

    /// Adds `pid` at the end. Returns `false` if it is already tracked.
    pub fn append(&mut self, pid: Pid) -> bool {
        if self.contains(pid) {
            return false;
        }
        self.pids.push(pid);
        true
    }

    /// Removes the first entry equal to `pid`, keeping the order of the rest.
    pub fn remove(&mut self, pid: Pid) -> bool {
        match self.pids.iter().position(|&p| p == pid) {
            Some(pos) => {
                self.pids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.pids.contains(&pid)
    }

    pub fn pids(&self) -> &[Pid] {
        &self.pids
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    /// 依次把每个 pid 交给 `f` 处理，并清空进程表
    pub fn drain_each<F: FnMut(Pid)>(&mut self, mut f: F) {
        for pid in std::mem::take(&mut self.pids) {
            f(pid);
        }
    }
}
