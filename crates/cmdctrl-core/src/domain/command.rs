//! The lifecycle verb given as the first positional argument.

use std::fmt;
use std::str::FromStr;

use crate::error::UsageError;

/// A lifecycle verb.
///
/// Derived once per invocation and never persisted. Parsing is exact and
/// case-sensitive: `Start` is an unknown command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Initialize this process and hand control back to the caller.
    Start,
    /// Ask the running instance to terminate gracefully.
    Stop,
    /// Kill the running instance unconditionally.
    Kill,
    /// Ask the running instance to restart in place, or start fresh.
    Restart,
}

impl Command {
    /// Every accepted verb, in the order shown in usage text.
    pub const ALL: [Self; 4] = [Self::Start, Self::Stop, Self::Kill, Self::Restart];

    /// The verb as typed on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Kill => "kill",
            Self::Restart => "restart",
        }
    }

    /// Resolve the verb from an optional first positional argument.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, UsageError> {
        arg.ok_or(UsageError::MissingCommand)?.parse()
    }

    /// `{start|stop|kill|restart}`, for usage lines.
    pub fn choices() -> String {
        let verbs: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
        format!("{{{}}}", verbs.join("|"))
    }
}

impl FromStr for Command {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UsageError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
