pub mod ast;
pub mod expand;
#[allow(clippy::module_inception)]
pub mod parser;

pub use ast::{ParseError, ParsedCommand};
pub use expand::expand_pid;
pub use parser::Parser;
