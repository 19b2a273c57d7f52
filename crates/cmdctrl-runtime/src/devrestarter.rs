//! Development-mode restarts on executable changes.
//!
//! After a rebuild replaces the binary on disk, the running server receives
//! the graceful restart signal (SIGUSR2), exactly as if an operator had run
//! `restart`. How it reloads is the server's business.

use std::fs;
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use tracing::{debug, info, warn};

use crate::process::ProcessHandle;

/// Polls a file's modification time and reacts when it changes.
#[derive(Debug, Clone)]
pub struct DevRestarter {
    path: PathBuf,
    interval: Duration,
}

impl DevRestarter {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    /// Watch `path` at the default interval.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            interval: Self::DEFAULT_INTERVAL,
        }
    }

    /// Watch the executable of the calling process.
    pub fn for_current_exe() -> io::Result<Self> {
        std::env::current_exe().map(Self::new)
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Send this process the restart signal whenever the watched file changes.
    ///
    /// The watcher thread is detached and lives as long as the process.
    pub fn activate(self) -> io::Result<()> {
        info!(path = %self.path.display(), "dev restarter enabled");
        self.spawn(|| {
            match ProcessHandle::current() {
                Some(me) => {
                    if let Err(e) = me.restart() {
                        warn!("dev restarter could not signal restart: {e}");
                    }
                }
                None => warn!(
                    pid = std::process::id(),
                    "dev restarter cannot address this process"
                ),
            }
            ControlFlow::Continue(())
        })?;
        Ok(())
    }

    /// Run `on_change` on a background thread after each observed change.
    ///
    /// The thread exits when `on_change` returns `ControlFlow::Break`.
    /// A file that is briefly missing (mid-replace) is not a change; the
    /// next successful stat with a new mtime is.
    pub fn spawn<F>(self, mut on_change: F) -> io::Result<JoinHandle<()>>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let mut last = modified(&self.path);

        thread::Builder::new()
            .name("cmdctrl-devrestarter".to_string())
            .spawn(move || {
                loop {
                    thread::sleep(self.interval);

                    let Some(current) = modified(&self.path) else {
                        continue;
                    };
                    if last == Some(current) {
                        continue;
                    }

                    last = Some(current);
                    debug!(path = %self.path.display(), "watched file changed");
                    if on_change().is_break() {
                        break;
                    }
                }
            })
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
