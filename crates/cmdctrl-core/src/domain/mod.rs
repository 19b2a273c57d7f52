//! Domain types for a single lifecycle invocation.

mod command;
mod process;

pub use command::Command;
pub use process::{LifecycleSignal, ProcessId};
