//! Core domain types and port definitions for cmdctrl.
//!
//! This crate is pure: it performs no signal delivery and no pidfile I/O.
//! It defines what a lifecycle invocation is made of:
//!
//! - [`Command`] - the verb parsed from the command line
//! - [`ProcessId`] / [`LifecycleSignal`] - how a target process is addressed
//! - [`LifecycleSettings`] - resolved startup configuration
//! - [`LifecycleHost`] - the port the dispatcher drives
//! - the error taxonomy and the exit codes it maps to
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod settings;

pub use domain::{Command, LifecycleSignal, ProcessId};
pub use error::{
    DispatchError, EXIT_RUNTIME_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR, InitError, PidfileError,
    SignalError, UsageError,
};
pub use paths::{PathError, normalize_user_path};
pub use ports::LifecycleHost;
pub use settings::LifecycleSettings;
