//! Process addressing: ids and the signals the dispatcher can send.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// A positive OS process id.
///
/// `0` is rejected because signalling it addresses the caller's whole
/// process group, and ids above `i32::MAX` are rejected because they turn
/// negative when handed to `kill(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(NonZeroU32);

impl ProcessId {
    /// Largest id accepted.
    pub const MAX: u32 = i32::MAX as u32;

    /// Wrap a raw id, returning `None` when it cannot address a single process.
    pub const fn new(raw: u32) -> Option<Self> {
        if raw > Self::MAX {
            return None;
        }
        match NonZeroU32::new(raw) {
            Some(pid) => Some(Self(pid)),
            None => None,
        }
    }

    /// The id of the calling process, or `None` if the OS reported one that
    /// cannot be signalled on its own.
    pub fn current() -> Option<Self> {
        Self::new(std::process::id())
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The id as the signed type `kill(2)` expects. Always positive.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_raw(self) -> i32 {
        self.0.get() as i32
    }
}

impl FromStr for ProcessId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u32 = s
            .parse()
            .map_err(|e| format!("invalid process id {s:?}: {e}"))?;
        Self::new(raw).ok_or_else(|| format!("invalid process id {s:?}: out of range"))
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A control signal the lifecycle layer delivers.
///
/// The exact numbers are a platform contract the target must share:
/// on Unix these are SIGTERM, SIGUSR2 and SIGKILL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleSignal {
    /// Graceful termination requested.
    Terminate,
    /// Graceful restart requested; the target reloads in place.
    Restart,
    /// Unconditional, non-catchable termination.
    Kill,
}

impl LifecycleSignal {
    /// The conventional Unix name of the signal.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Terminate => "SIGTERM",
            Self::Restart => "SIGUSR2",
            Self::Kill => "SIGKILL",
        }
    }

    /// Whether the target can install a handler for this signal.
    pub const fn is_catchable(self) -> bool {
        !matches!(self, Self::Kill)
    }
}

impl fmt::Display for LifecycleSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
