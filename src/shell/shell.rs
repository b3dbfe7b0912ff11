use log::{debug, error, info, warn};
use std::io::Write;

use crate::shell::context::ShellContext;
use crate::shell::error::{Result, ShellError};
use crate::shell::executor::{self, builtins};
use crate::shell::parser::{expand_pid, Parser};
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::shell::{reaper, signals};
use crate::utils::config::Config;
use crate::utils::theme::Theme;

pub struct Shell<'a> {
    theme: Theme,
    readline: ReadlineManager<'a>,
    ctx: ShellContext,
    seen_mode_changes: usize,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            theme: Theme::new(),
            readline: ReadlineManager::new(config)?,
            ctx: ShellContext::new(),
            seen_mode_changes: signals::mode_changes(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        debug!("初始化 smallsh, pid {}", self.ctx.pid());

        // shell 自身忽略 Ctrl-C，Ctrl-Z 切换前台模式
        signals::install()?;
        self.readline.load_history();
        debug!("smallsh 准备就绪...");

        let result = self.run_loop();
        self.readline.save_history();

        debug!("退出 smallsh...");
        result
    }

    fn run_loop(&mut self) -> Result<()> {
        while self.ctx.is_running() {
            // 显示提示符之前先回收已结束的后台进程
            for completion in reaper::reap(&mut self.ctx) {
                println!("{}", completion);
            }
            self.log_mode_change();
            std::io::stdout().flush()?;

            match self.readline.readline(&self.theme.prompt) {
                Ok(line) => self.handle_input(&line)?,
                Err(ReadlineError::Interrupted) => {
                    println!();
                }
                Err(ReadlineError::Eof) => {
                    warn!("接收到 EOF，退出 smallsh...");
                    builtins::builtin_exit(&mut self.ctx);
                }
                Err(err) => {
                    error!("读取输入失败: {}", err);
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, line: &str) -> Result<()> {
        let line = expand_pid(line, self.ctx.pid().as_raw() as u32);

        let mut parser = Parser::new(&line, self.ctx.foreground_only());
        let command = match parser.parse_command() {
            Ok(command) => command,
            Err(err) => {
                debug!("解析失败: {:?}", err);
                self.report(err.into());
                return Ok(());
            }
        };

        if command.is_noop() {
            return Ok(());
        }
        self.readline.add_history(line.trim())?;

        match executor::execute(&mut self.ctx, &command) {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => {
                error!("致命错误: {}", err);
                Err(err)
            }
            Err(err) => {
                self.report(err);
                Ok(())
            }
        }
    }

    fn report(&self, err: ShellError) {
        warn!("命令失败: {}", err);
        eprintln!("{}", self.theme.error(format!("smallsh: {}", err)));
    }

    fn log_mode_change(&mut self) {
        let changes = signals::mode_changes();
        if changes != self.seen_mode_changes {
            info!(
                "前台模式切换 {} 次, 当前 foreground_only = {}",
                changes - self.seen_mode_changes,
                self.ctx.foreground_only()
            );
            self.seen_mode_changes = changes;
        }
    }
}
