//! Resolved lifecycle configuration.
//!
//! These are pure domain values. Layering flags, environment and config
//! files into a `LifecycleSettings` is the CLI adapter's job.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Startup configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// File to redirect standard output to; `None` leaves it unchanged.
    pub stdout: Option<PathBuf>,
    /// File to redirect standard error to; `None` leaves it unchanged.
    pub stderr: Option<PathBuf>,
    /// Parallelism hint for the server's runtime.
    pub max_procs: NonZeroUsize,
    /// Watch the executable and restart on change.
    pub dev_restarter: bool,
    /// Where the running instance records its pid.
    pub pidfile: Option<PathBuf>,
}

impl LifecycleSettings {
    /// Settings that leave outputs alone, disable the dev restarter and
    /// configure no pidfile.
    #[must_use]
    pub const fn new(max_procs: NonZeroUsize) -> Self {
        Self {
            stdout: None,
            stderr: None,
            max_procs,
            dev_restarter: false,
            pidfile: None,
        }
    }

    #[must_use]
    pub fn with_stdout(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_stderr(mut self, path: impl Into<PathBuf>) -> Self {
        self.stderr = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_pidfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.pidfile = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_dev_restarter(mut self, enabled: bool) -> Self {
        self.dev_restarter = enabled;
        self
    }

    pub fn pidfile(&self) -> Option<&Path> {
        self.pidfile.as_deref()
    }

    /// Whether `start` has to touch stdout or stderr at all.
    pub const fn redirects_outputs(&self) -> bool {
        self.stdout.is_some() || self.stderr.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_settings_leave_everything_untouched() {
        let settings = LifecycleSettings::new(NonZeroUsize::MIN);
        assert!(!settings.redirects_outputs());
        assert!(!settings.dev_restarter);
        assert!(settings.pidfile().is_none());
    }

    #[test]
    fn builders_set_fields() {
        let settings = LifecycleSettings::new(NonZeroUsize::new(4).unwrap())
            .with_stderr("/tmp/err.log")
            .with_pidfile("/tmp/app.pid")
            .with_dev_restarter(true);
        assert!(settings.redirects_outputs());
        assert_eq!(settings.pidfile(), Some(Path::new("/tmp/app.pid")));
        assert_eq!(settings.max_procs.get(), 4);
        assert!(settings.stdout.is_none());
    }
}
