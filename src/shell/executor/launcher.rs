use log::{debug, error};
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2, execvp, fork, ForkResult};
use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::process;

use super::wait::wait_foreground;
use crate::shell::context::ShellContext;
use crate::shell::error::{Result, ShellError};
use crate::shell::parser::ParsedCommand;
use crate::shell::signals;

const NULL_DEVICE: &str = "/dev/null";

/// 子进程启动参数，fork 之前准备好，避免在子进程里分配
struct ChildSetup<'a> {
    argv: Vec<CString>,
    input: Option<&'a str>,
    output: Option<&'a str>,
    background: bool,
}

impl<'a> ChildSetup<'a> {
    fn from_command(command: &'a ParsedCommand) -> Result<Self> {
        let argv = command
            .arguments
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| ShellError::InvalidArgument {
                program: command.program().unwrap_or_default().to_string(),
            })?;

        Ok(Self {
            argv,
            input: command.input.as_deref(),
            output: command.output.as_deref(),
            background: command.background,
        })
    }

    fn program(&self) -> String {
        self.argv
            .first()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Runs an external command. Foreground commands are waited for and their
/// status recorded; background commands are announced and tracked.
pub fn launch(ctx: &mut ShellContext, command: &ParsedCommand) -> Result<()> {
    let setup = ChildSetup::from_command(command)?;
    if setup.argv.is_empty() {
        return Ok(());
    }

    // fork 前清空缓冲区，防止子进程重复输出
    io::stdout().flush()?;

    match unsafe { fork() } {
        Ok(ForkResult::Child) => run_child(&setup),
        Ok(ForkResult::Parent { child }) => {
            if setup.background {
                println!("background pid is {}", child);
                ctx.jobs.append(child);
                debug!(
                    "后台进程 {} 已启动: {:?} (共 {} 个)",
                    child,
                    command.arguments,
                    ctx.jobs.len()
                );
            } else {
                debug!("前台进程 {} 已启动: {:?}", child, command.arguments);
                ctx.last_status = wait_foreground(child)?;
            }
            Ok(())
        }
        Err(err) => {
            error!("fork 失败: {}", err);
            Err(ShellError::Fork(err))
        }
    }
}

/// 子进程：重定向、恢复信号、替换进程映像。任何失败都以状态 1 退出。
fn run_child(setup: &ChildSetup<'_>) -> ! {
    if let Err(message) = apply_redirections(setup) {
        eprintln!("{}", message);
        process::exit(1);
    }

    if let Err(err) = signals::reset_for_child(!setup.background) {
        eprintln!("{}: cannot reset signals: {}", setup.program(), err.desc());
        process::exit(1);
    }

    let err = match execvp(&setup.argv[0], &setup.argv) {
        Ok(never) => match never {},
        Err(err) => err,
    };
    eprintln!("{}: {}", setup.program(), err.desc());
    process::exit(1);
}

/// 显式重定向优先；后台命令未重定向的流接到空设备
fn apply_redirections(setup: &ChildSetup<'_>) -> std::result::Result<(), String> {
    if let Some(path) = setup.output {
        redirect(path, output_flags(), libc::STDOUT_FILENO)
            .map_err(|_| format!("cannot open {} for output", path))?;
    }

    if let Some(path) = setup.input {
        redirect(path, OFlag::O_RDONLY, libc::STDIN_FILENO)
            .map_err(|_| format!("cannot open {} for input", path))?;
    }

    if setup.background {
        if setup.input.is_none() {
            redirect(NULL_DEVICE, OFlag::O_RDONLY, libc::STDIN_FILENO)
                .map_err(|_| format!("cannot set {} for input", NULL_DEVICE))?;
        }
        if setup.output.is_none() {
            redirect(NULL_DEVICE, OFlag::O_WRONLY, libc::STDOUT_FILENO)
                .map_err(|_| format!("cannot set {} for output", NULL_DEVICE))?;
        }
    }
    Ok(())
}

fn output_flags() -> OFlag {
    OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC
}

fn redirect(path: &str, flags: OFlag, target: RawFd) -> nix::Result<()> {
    let fd = open(path, flags, Mode::from_bits_truncate(0o644))?;
    if fd != target {
        dup2(fd, target)?;
        close(fd)?;
    }
    Ok(())
}
