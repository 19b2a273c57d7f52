//! CLI-specific error types and mappings.
//!
//! Every way an invocation can end early, and the exit code it maps to.

use std::path::PathBuf;

use clap::error::ErrorKind;
use cmdctrl_core::{DispatchError, EXIT_SUCCESS, EXIT_USAGE_ERROR, UsageError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing failed, or help/version was requested.
    #[error(transparent)]
    Args(#[from] clap::Error),

    /// The `--config` file could not be loaded.
    #[error("load config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// Verb validation or execution failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl CliError {
    /// Map error to the process exit code.
    ///
    /// - 0: help or version was printed
    /// - 1: usage error (bad flags, missing or unknown verb, bad config file)
    /// - 2: runtime error (pidfile, signal delivery, initialization)
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Args(e) if is_informational(e.kind()) => EXIT_SUCCESS,
            Self::Args(_) | Self::Config { .. } => EXIT_USAGE_ERROR,
            Self::Dispatch(e) => e.exit_code(),
        }
    }

    /// Whether the caller should follow the message with the usage text.
    pub const fn wants_usage(&self) -> bool {
        match self {
            Self::Dispatch(e) => e.is_usage(),
            Self::Args(_) | Self::Config { .. } => false,
        }
    }
}

impl From<UsageError> for CliError {
    fn from(err: UsageError) -> Self {
        Self::Dispatch(DispatchError::Usage(err))
    }
}

const fn is_informational(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdctrl_core::{EXIT_RUNTIME_ERROR, PidfileError};

    #[test]
    fn usage_errors_exit_one_and_show_usage() {
        let err = CliError::from(UsageError::MissingCommand);
        assert_eq!(err.exit_code(), EXIT_USAGE_ERROR);
        assert!(err.wants_usage());
        assert_eq!(err.to_string(), "no command was specified");
    }

    #[test]
    fn runtime_errors_exit_two_without_usage() {
        let err = CliError::from(DispatchError::Pidfile(PidfileError::NotConfigured));
        assert_eq!(err.exit_code(), EXIT_RUNTIME_ERROR);
        assert!(!err.wants_usage());
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = CliError::from(clap::Error::new(ErrorKind::DisplayHelp));
        assert_eq!(err.exit_code(), EXIT_SUCCESS);

        let err = CliError::from(clap::Error::new(ErrorKind::InvalidValue));
        assert_eq!(err.exit_code(), EXIT_USAGE_ERROR);
    }
}
