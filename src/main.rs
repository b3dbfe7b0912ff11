use log::{debug, error};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::shell::Shell;
use crate::utils::config::Config;
use crate::utils::log::init_logger;

mod shell;
mod utils;

fn main() -> ExitCode {
    let config = Config::new();
    init_logger(&config);
    debug!("配置加载成功 {}", config.config_dir.display());

    // 退出时恢复启动目录
    let start_dir = env::var_os("PWD")
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok());

    let code = match Shell::new(&config).and_then(|mut shell| shell.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("smallsh 异常退出: {}", err);
            eprintln!("{}: {}", config.name, err);
            ExitCode::FAILURE
        }
    };

    if let Some(dir) = start_dir {
        if let Err(err) = env::set_current_dir(&dir) {
            debug!("无法恢复启动目录 {}: {}", dir.display(), err);
        }
    }
    code
}
