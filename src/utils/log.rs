use crate::utils::config::Config;
use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::process;

pub fn init_logger(config: &Config) {
    let mut level = match &config.logger_level {
        level if level.eq_ignore_ascii_case("error") => LevelFilter::Error,
        level if level.eq_ignore_ascii_case("warn") => LevelFilter::Warn,
        level if level.eq_ignore_ascii_case("info") => LevelFilter::Info,
        level if level.eq_ignore_ascii_case("debug") => LevelFilter::Debug,
        level if level.eq_ignore_ascii_case("trace") => LevelFilter::Trace,
        level if level.eq_ignore_ascii_case("off") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    };

    // 标准输出留给命令本身，日志只写文件和 stderr
    let mut writers: Vec<Box<dyn Write + Send + Sync>> = Vec::new();
    match open_log_file(config) {
        Ok(file) => writers.push(Box::new(file)),
        Err(err) => {
            eprintln!(
                "{}: cannot open log file in {}: {}",
                config.name,
                config.logger_dir.display(),
                err
            );
            level = LevelFilter::Error;
        }
    }
    if config.log_to_stderr || writers.is_empty() {
        writers.push(Box::new(io::stderr()));
    }

    let result = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[PID:{}][{}] {} - {}",
                process::id(),
                record.level(),
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(MultiWriter { writers })))
        .filter(Some(config.name.as_str()), level)
        .filter(None, LevelFilter::Warn)
        .try_init();

    match result {
        Ok(()) => log::debug!("日志级别设置为: {}", level),
        Err(err) => eprintln!("{}: logger already initialised: {}", config.name, err),
    }
}

fn open_log_file(config: &Config) -> io::Result<File> {
    fs::create_dir_all(&config.logger_dir)?;
    let date = Local::now().format("%Y-%m-%d");
    let log_file = config
        .logger_dir
        .join(format!("{}_{}.log", config.name, date));
    OpenOptions::new().create(true).append(true).open(log_file)
}

struct MultiWriter {
    writers: Vec<Box<dyn Write + Send + Sync>>,
}

impl Write for MultiWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for writer in &mut self.writers {
            writer.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for writer in &mut self.writers {
            writer.flush()?;
        }
        Ok(())
    }
}
