mod context;
mod error;
mod executor;
mod job_manager;
mod parser;
mod readline;
mod reaper;
#[allow(clippy::module_inception)]
mod shell;
mod signals;

pub use shell::Shell;
