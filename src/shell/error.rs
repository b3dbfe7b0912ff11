use nix::errno::Errno;
use nix::unistd::Pid;
use rustyline::error::ReadlineError;
use std::io;
use thiserror::Error;

use super::parser::ParseError;

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("fork: {0}")]
    Fork(#[source] Errno),

    #[error("waitpid({pid}): {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: Errno,
    },

    #[error("cannot install signal handlers: {0}")]
    Signal(#[source] Errno),

    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("cd: {path}: {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cd: HOME not set")]
    HomeNotSet,

    #[error("{program}: argument contains a NUL byte")]
    InvalidArgument { program: String },

    #[error(transparent)]
    Readline(#[from] ReadlineError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// 致命错误会终止 shell，其余错误只报告给用户
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::Fork(_)
                | ShellError::Wait { .. }
                | ShellError::Signal(_)
                | ShellError::Readline(_)
                | ShellError::Io(_)
        )
    }
}
