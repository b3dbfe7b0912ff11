use log::debug;
use std::io::{self, Write};

use super::builtins::Builtin;
use super::launcher;
use crate::shell::context::ShellContext;
use crate::shell::error::Result;
use crate::shell::parser::ParsedCommand;

/// 分发命令：内建命令直接执行，其余交给 launcher
pub fn execute(ctx: &mut ShellContext, command: &ParsedCommand) -> Result<()> {
    if command.is_noop() {
        return Ok(());
    }

    let program = command.program().unwrap_or_default();
    if let Some(builtin) = Builtin::lookup(program) {
        debug!("执行内建命令: {:?}", command);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        builtin.run(ctx, &command.arguments, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    debug!("执行外部命令: {:?}", command);
    launcher::launch(ctx, command)
}
