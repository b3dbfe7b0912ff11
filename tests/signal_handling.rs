#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{run_shell, script};

const ENTER: &str = "Entering foreground-only mode (& is now ignored)";
const EXIT: &str = "Exiting foreground-only mode";

#[test]
fn sigtstp_toggles_foreground_only_mode() {
    let dir = tempfile::tempdir().unwrap();
    let tstp = script(dir.path(), "tstp.sh", "kill -TSTP $PPID\n");
    let run = run_shell(
        dir.path(),
        &[&tstp, "sleep 0 &", "bp", &tstp, "echo ALIVE"],
    );

    let enter = run.stdout.find(ENTER).expect("enter announcement");
    let exit = run.stdout.find(EXIT).expect("exit announcement");
    assert!(enter < exit, "stdout was: {}", run.stdout);
    assert!(!run.stdout.contains("background pid is"), "stdout was: {}", run.stdout);
    assert!(
        run.stdout.contains("no background pids at this time"),
        "stdout was: {}",
        run.stdout
    );
    assert!(run.stdout.contains("ALIVE"), "stdout was: {}", run.stdout);
}

#[test]
fn background_allowed_again_after_leaving_foreground_only_mode() {
    let dir = tempfile::tempdir().unwrap();
    let tstp = script(dir.path(), "tstp.sh", "kill -TSTP $PPID\n");
    let run = run_shell(dir.path(), &[&tstp, &tstp, "sleep 0 &", "sleep 1"]);
    assert!(run.stdout.contains("background pid is"), "stdout was: {}", run.stdout);
}

#[test]
fn shell_survives_sigint() {
    let dir = tempfile::tempdir().unwrap();
    let int = script(dir.path(), "int.sh", "kill -INT $PPID\n");
    let run = run_shell(dir.path(), &[&int, "echo ALIVE"]);
    assert!(run.stdout.contains("ALIVE"), "stdout was: {}", run.stdout);
    assert!(run.status.success());
}

#[test]
fn foreground_child_is_killed_by_sigint() {
    let dir = tempfile::tempdir().unwrap();
    let self_int = script(dir.path(), "self_int.sh", "kill -INT $$\nsleep 5\n");
    let run = run_shell(dir.path(), &[&self_int, "status"]);
    assert!(
        run.stdout.contains("terminated by signal 2"),
        "stdout was: {}",
        run.stdout
    );
    assert!(
        run.stdout.contains("terminating signal 2"),
        "stdout was: {}",
        run.stdout
    );
}

#[test]
fn stopped_foreground_child_is_reported_and_still_waited_for() {
    let dir = tempfile::tempdir().unwrap();
    // 子进程先停住自己，再由后台 sh 发送 SIGCONT
    let stop = script(
        dir.path(),
        "stop.sh",
        "(sleep 1; kill -CONT $$) &\nkill -STOP $$\nexit 6\n",
    );
    let run = run_shell(dir.path(), &[&stop, "status"]);
    assert!(
        run.stdout.contains("stopped by signal 19") || run.stdout.contains("stopped by signal 17"),
        "stdout was: {}",
        run.stdout
    );
    assert!(run.stdout.contains("exit value 6"), "stdout was: {}", run.stdout);
}
