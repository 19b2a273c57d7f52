//! Signal delivery to a process identified by pid.

use std::io;
use std::sync::LazyLock;

use cmdctrl_core::{LifecycleSignal, ProcessId, SignalError};
use tracing::debug;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

static CURRENT: LazyLock<Option<ProcessHandle>> =
    LazyLock::new(|| ProcessId::current().map(ProcessHandle::new));

/// Control over the process identified by the wrapped pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessHandle {
    pid: ProcessId,
}

impl ProcessHandle {
    pub const fn new(pid: ProcessId) -> Self {
        Self { pid }
    }

    /// Handle for the calling process, created once per program run.
    ///
    /// `None` when the OS id of this process is not a valid signal target.
    pub fn current() -> Option<Self> {
        *CURRENT
    }

    pub const fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Ask the process to stop gracefully (SIGTERM).
    pub fn stop(&self) -> Result<(), SignalError> {
        self.send(LifecycleSignal::Terminate)
    }

    /// Ask the process to restart gracefully (SIGUSR2).
    pub fn restart(&self) -> Result<(), SignalError> {
        self.send(LifecycleSignal::Restart)
    }

    /// Kill the process, dropping whatever it was doing (SIGKILL).
    pub fn kill(&self) -> Result<(), SignalError> {
        self.send(LifecycleSignal::Kill)
    }

    /// Hand `signal` to the OS for delivery.
    ///
    /// # Returns
    /// - `Ok(())` once the OS accepted the signal
    /// - `SignalError::ProcessNotFound` if the pid does not exist
    /// - `SignalError::Delivery` for any other refusal
    pub fn send(&self, signal: LifecycleSignal) -> Result<(), SignalError> {
        debug!(pid = %self.pid, %signal, catchable = signal.is_catchable(), "sending signal");

        #[cfg(unix)]
        {
            send_unix(self.pid, signal)
        }

        #[cfg(not(unix))]
        {
            Err(SignalError::Delivery {
                pid: self.pid,
                signal,
                source: io::Error::new(
                    io::ErrorKind::Unsupported,
                    "signal delivery is only supported on Unix",
                ),
            })
        }
    }
}

#[cfg(unix)]
const fn to_nix(signal: LifecycleSignal) -> Signal {
    match signal {
        LifecycleSignal::Terminate => Signal::SIGTERM,
        LifecycleSignal::Restart => Signal::SIGUSR2,
        LifecycleSignal::Kill => Signal::SIGKILL,
    }
}

#[cfg(unix)]
fn send_unix(pid: ProcessId, signal: LifecycleSignal) -> Result<(), SignalError> {
    match signal::kill(Pid::from_raw(pid.as_raw()), to_nix(signal)) {
        Ok(()) => Ok(()),
        Err(Errno::ESRCH) => Err(SignalError::ProcessNotFound { pid, signal }),
        Err(errno) => Err(SignalError::Delivery {
            pid,
            signal,
            source: io::Error::from(errno),
        }),
    }
}
