//! The port the lifecycle dispatcher drives.
//!
//! The dispatcher owns the decision table (which verb does what, and when
//! `restart` falls back to a fresh start). Everything that touches the OS
//! sits behind [`LifecycleHost`] so the table can be exercised without
//! signalling real processes.

use crate::domain::{LifecycleSignal, ProcessId};
use crate::error::{InitError, PidfileError, SignalError};
use crate::settings::LifecycleSettings;

/// OS-facing collaborators of the dispatcher.
///
/// Each method is attempted exactly once per dispatch; implementations must
/// not retry.
pub trait LifecycleHost {
    /// Resolve the running instance from the pidfile.
    fn read_pid(&self, settings: &LifecycleSettings) -> Result<ProcessId, PidfileError>;

    /// Hand `signal` to the OS for delivery to `pid`. Returns once the OS
    /// accepted it, not when the target reacted.
    fn send_signal(&self, pid: ProcessId, signal: LifecycleSignal) -> Result<(), SignalError>;

    /// Initialize the current process: dev restarter, output redirection,
    /// then the pidfile.
    fn prestart(&self, settings: &LifecycleSettings) -> Result<(), InitError>;
}
