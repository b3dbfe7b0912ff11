use std::fmt;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectOp {
    Input,  // <
    Output, // >
}

impl RedirectOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(RedirectOp::Input),
            ">" => Some(RedirectOp::Output),
            _ => None,
        }
    }
}

impl fmt::Display for RedirectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectOp::Input => write!(f, "<"),
            RedirectOp::Output => write!(f, ">"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("expected a path after '{0}'")]
    MissingPath(RedirectOp),
}

/// 一行输入解析后的命令，每行重新构造，执行后丢弃
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub arguments: Vec<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub background: bool,
}

impl ParsedCommand {
    pub fn program(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// 空行和注释不执行任何操作
    pub fn is_noop(&self) -> bool {
        match self.program() {
            None => true,
            Some(program) => program.starts_with('#'),
        }
    }

    pub fn redirect(&mut self, op: RedirectOp, path: String) {
        match op {
            RedirectOp::Input => self.input = Some(path),
            RedirectOp::Output => self.output = Some(path),
        }
    }
}
