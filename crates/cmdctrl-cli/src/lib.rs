//! Lifecycle command line for long-running servers.
//!
//! A server calls [`simple_start`] at the top of `main`:
//!
//! ```no_run
//! let started = cmdctrl::simple_start();
//! // only `start` (or a `restart` with nothing to restart) gets here
//! let runtime = started.runtime().expect("runtime");
//! runtime.block_on(async { /* serve */ });
//! ```
//!
//! `stop`, `kill` and `restart` signal the instance named by the pidfile and
//! exit; `start` initializes this process (dev restarter, output
//! redirection, pidfile) and returns.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the demo binary.
use anyhow as _;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod parser;
pub mod start;
pub mod usage;

pub use dispatch::{Dispatcher, Outcome};
pub use error::CliError;
pub use parser::{Cli, LifecycleArgs};
pub use start::{Flow, Started, report, run, simple_start};
