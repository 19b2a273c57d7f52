//! Error taxonomy for lifecycle dispatch and the exit codes it maps to.
//!
//! Every error here is terminal for the invoking process except a
//! [`PidfileError`] or [`SignalError`] raised during `restart`, which the
//! dispatcher converts into a fresh start.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{LifecycleSignal, ProcessId};

/// Exit status for a completed command.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status when no command, or an unknown one, was given.
pub const EXIT_USAGE_ERROR: i32 = 1;

/// Exit status for any failure propagated from initialization, the pidfile,
/// or signal delivery.
pub const EXIT_RUNTIME_ERROR: i32 = 2;

/// The command line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("no command was specified")]
    MissingCommand,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A flag or environment value was rejected by the parser.
    #[error("{0}")]
    InvalidArguments(String),
}

/// The pidfile could not be used.
#[derive(Debug, Error)]
pub enum PidfileError {
    #[error("pidfile not configured")]
    NotConfigured,

    /// Missing or unreadable; the OS message is kept verbatim.
    #[error("read pidfile {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse pidfile {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("write pidfile {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("remove pidfile {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The OS did not accept a signal for delivery.
#[derive(Debug, Error)]
pub enum SignalError {
    /// No process with that id exists.
    #[error("signal {signal} to process {pid}: no such process")]
    ProcessNotFound {
        pid: ProcessId,
        signal: LifecycleSignal,
    },

    /// Any other refusal, such as a permission error.
    #[error("signal {signal} to process {pid}: {source}")]
    Delivery {
        pid: ProcessId,
        signal: LifecycleSignal,
        #[source]
        source: io::Error,
    },
}

impl SignalError {
    pub const fn pid(&self) -> ProcessId {
        match self {
            Self::ProcessNotFound { pid, .. } | Self::Delivery { pid, .. } => *pid,
        }
    }
}

/// Process initialization during `start` failed.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("redirect {stream} to {}: {source}", path.display())]
    Redirect {
        stream: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("activate dev restarter: {0}")]
    DevRestarter(#[source] io::Error),

    #[error("process id {0} cannot be recorded as a signal target")]
    UnaddressableProcess(u32),

    #[error(transparent)]
    Pidfile(#[from] PidfileError),
}

/// Anything that ends a lifecycle invocation early.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Pidfile(#[from] PidfileError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Init(#[from] InitError),
}

impl DispatchError {
    /// Map the error to the process exit status.
    ///
    /// Usage errors and runtime errors must stay distinguishable to callers
    /// such as init scripts.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => EXIT_USAGE_ERROR,
            Self::Pidfile(_) | Self::Signal(_) | Self::Init(_) => EXIT_RUNTIME_ERROR,
        }
    }

    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
