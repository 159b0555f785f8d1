//! The service-level API, including the main actor, commands, and handle.
//!
//! 服务级API，包括主actor、命令和句柄。

pub mod actor;
pub mod command;
pub mod handle;
mod registry;

pub use command::{ServiceCommand, TimerElapsed};
pub use handle::TimerService;
