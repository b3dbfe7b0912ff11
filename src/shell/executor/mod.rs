pub mod builtins;
#[allow(clippy::module_inception)]
pub mod executor;
pub mod launcher;
pub mod wait;

pub use executor::execute;
pub use wait::ChildStatus;
