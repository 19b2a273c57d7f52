//! The production implementation of the dispatcher's port.

use cmdctrl_core::{
    InitError, LifecycleHost, LifecycleSettings, LifecycleSignal, PidfileError, ProcessId,
    SignalError,
};

use crate::init::prestart;
use crate::pidfile::Pidfile;
use crate::process::ProcessHandle;

/// Real pidfile, real signals, real initialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl LifecycleHost for SystemHost {
    fn read_pid(&self, settings: &LifecycleSettings) -> Result<ProcessId, PidfileError> {
        Pidfile::from_settings(settings)?.read()
    }

    fn send_signal(&self, pid: ProcessId, signal: LifecycleSignal) -> Result<(), SignalError> {
        ProcessHandle::new(pid).send(signal)
    }

    fn prestart(&self, settings: &LifecycleSettings) -> Result<(), InitError> {
        prestart(settings)
    }
}
