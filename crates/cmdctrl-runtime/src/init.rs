//! Process initialization performed by `start`.

use cmdctrl_core::{InitError, LifecycleSettings};
use tracing::info;

use crate::devrestarter::DevRestarter;
use crate::pidfile::Pidfile;
use crate::process::ProcessHandle;
use crate::stdfd::redirect_outputs;

/// Prepare the current process to run as the configured server instance.
///
/// # Order
/// 1. Activate the dev restarter (if enabled)
/// 2. Redirect stdout/stderr (if configured)
/// 3. Write the pidfile with the current pid
///
/// The pidfile comes last: its appearance tells other invocations that this
/// instance is ready to receive signals.
pub fn prestart(settings: &LifecycleSettings) -> Result<(), InitError> {
    if settings.dev_restarter {
        DevRestarter::for_current_exe()
            .and_then(DevRestarter::activate)
            .map_err(InitError::DevRestarter)?;
    }

    if settings.redirects_outputs() {
        redirect_outputs(settings.stdout.as_deref(), settings.stderr.as_deref())?;
    }

    let pidfile = Pidfile::from_settings(settings)?;
    let me = ProcessHandle::current()
        .ok_or_else(|| InitError::UnaddressableProcess(std::process::id()))?;
    pidfile.write(me.pid())?;

    info!(pid = %me.pid(), pidfile = %pidfile.path().display(), "process initialized");
    Ok(())
}
