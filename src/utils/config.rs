use dotenv::dotenv;
use log::warn;
use rustyline::EditMode;
use std::env;
use std::fs;
use std::path::PathBuf;

pub struct Config {
    pub name: String,
    pub config_dir: PathBuf,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: PathBuf,
    pub log_to_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = Config::get_config_dir();
        Config {
            name: String::from(env!("CARGO_PKG_NAME")),
            history_file: config_dir.join(".smallsh_history"),
            logger_dir: config_dir.join("logs"),
            config_dir,
            editor_mode: String::from("emacs"),
            logger_level: String::from("warn"),
            log_to_stderr: false,
        }
    }
}

impl Config {
    fn get_config_dir() -> PathBuf {
        if let Ok(home) = env::var("HOME") {
            PathBuf::from(home).join(".config/smallsh")
        } else {
            env::temp_dir().join("smallsh")
        }
    }

    pub fn new() -> Self {
        // 优先加载 .env 文件
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        let mut config = Config::default();

        if let Ok(history) = env::var("SMALLSH_HISTORY") {
            config.history_file = PathBuf::from(history);
        }

        if let Ok(editor) = env::var("SMALLSH_EDITOR") {
            config.editor_mode = editor;
        }

        if let Ok(level) = env::var("SMALLSH_LOG") {
            config.logger_level = level;
        }

        if let Ok(dir) = env::var("SMALLSH_LOG_DIR") {
            config.logger_dir = PathBuf::from(dir);
        }

        if let Ok(flag) = env::var("SMALLSH_LOG_STDERR") {
            config.log_to_stderr = Self::parse_flag(&flag);
        }

        // 历史文件目录创建失败不影响 shell 运行
        if let Some(parent) = config.history_file.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("无法创建历史记录目录 {}: {}", parent.display(), err);
            }
        }

        config
    }

    fn parse_flag(value: &str) -> bool {
        matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}
