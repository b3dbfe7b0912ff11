use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use std::env;
use std::io::{self, Write};

use crate::shell::context::ShellContext;
use crate::shell::error::{Result, ShellError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Status,
    /// 调试用：列出后台进程表
    BackgroundPids,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::Cd),
            "status" => Some(Builtin::Status),
            "bp" => Some(Builtin::BackgroundPids),
            _ => None,
        }
    }

    pub fn run(self, ctx: &mut ShellContext, args: &[String], out: &mut dyn Write) -> Result<()> {
        match self {
            Builtin::Exit => {
                builtin_exit(ctx);
                Ok(())
            }
            Builtin::Cd => builtin_cd(args.get(1).map(String::as_str)),
            Builtin::Status => Ok(builtin_status(ctx, out)?),
            Builtin::BackgroundPids => Ok(builtin_bp(ctx, out)?),
        }
    }
}

/// 向所有后台进程发送 SIGTERM，清空进程表并结束主循环
pub fn builtin_exit(ctx: &mut ShellContext) {
    ctx.jobs.drain_each(|pid| match kill(pid, Signal::SIGTERM) {
        Ok(()) => debug!("已向 {} 发送 SIGTERM", pid),
        Err(Errno::ESRCH) => debug!("进程 {} 已不存在", pid),
        Err(err) => warn!("无法终止进程 {}: {}", pid, err),
    });
    ctx.stop();
}

fn builtin_cd(path: Option<&str>) -> Result<()> {
    let target = match path {
        Some(path) => shellexpand::tilde(path).into_owned(),
        None => env::var("HOME").map_err(|_| ShellError::HomeNotSet)?,
    };

    env::set_current_dir(&target).map_err(|source| ShellError::ChangeDirectory {
        path: target.clone(),
        source,
    })?;
    debug!("切换目录: {}", target);
    Ok(())
}

fn builtin_status(ctx: &ShellContext, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", ctx.last_status)
}

fn builtin_bp(ctx: &ShellContext, out: &mut dyn Write) -> io::Result<()> {
    if ctx.jobs.is_empty() {
        return writeln!(out, "no background pids at this time");
    }
    writeln!(out, "bg pid tracker:")?;
    for (index, pid) in ctx.jobs.pids().iter().enumerate() {
        writeln!(out, "[{}] {}", index, pid)?;
    }
    Ok(())
}
