#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

pub struct ShellRun {
    pub pid: u32,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Feeds `lines` to a fresh shell running in `dir`, followed by `exit`.
pub fn run_shell(dir: &Path, lines: &[&str]) -> ShellRun {
    run_shell_with(dir, lines, true)
}

pub fn run_shell_with(dir: &Path, lines: &[&str], append_exit: bool) -> ShellRun {
    let started = Instant::now();
    let mut child = Command::new(env!("CARGO_BIN_EXE_smallsh"))
        .current_dir(dir)
        .env("HOME", dir)
        .env("SMALLSH_LOG_DIR", dir.join(".logs"))
        .env("SMALLSH_HISTORY", dir.join(".history"))
        .env("SMALLSH_LOG", "debug")
        .env("TERM", "xterm-256color")
        .env_remove("SMALLSH_LOG_STDERR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn smallsh");
    let pid = child.id();

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        for line in lines {
            writeln!(stdin, "{line}").expect("write line");
        }
        if append_exit {
            writeln!(stdin, "exit").expect("write exit");
        }
    }

    let output = child.wait_with_output().expect("wait output");
    ShellRun {
        pid,
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        elapsed: started.elapsed(),
    }
}

/// Extracts the pid from the first `background pid is N` line.
pub fn background_pid(stdout: &str) -> Option<u32> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("background pid is "))
        .and_then(|pid| pid.trim().parse().ok())
}

/// Writes a `sh` script into `dir` and returns the shell line that runs it.
pub fn script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write script");
    format!("sh {}", path.display())
}
