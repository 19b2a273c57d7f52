//! The lifecycle decision table.
//!
//! | verb    | action                                                   |
//! |---------|----------------------------------------------------------|
//! | start   | initialize, hand control back to the server              |
//! | stop    | SIGTERM to the pidfile's process, exit                   |
//! | kill    | SIGKILL to the pidfile's process, exit                   |
//! | restart | SIGUSR2 to the pidfile's process, exit; on any failure   |
//! |         | print a notice and continue as `start`                   |

use std::io::Write;

use cmdctrl_core::{Command, DispatchError, LifecycleHost, LifecycleSettings, LifecycleSignal};
use tracing::debug;

/// What the caller should do after a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The verb is done; exit with success.
    Completed,
    /// The process is initialized; run the server.
    Started,
}

/// Runs one verb against a [`LifecycleHost`].
pub struct Dispatcher<'a, H: LifecycleHost> {
    host: &'a H,
    program: &'a str,
}

impl<'a, H: LifecycleHost> Dispatcher<'a, H> {
    /// `program` is the name used in the restart fallback notice.
    pub const fn new(host: &'a H, program: &'a str) -> Self {
        Self { host, program }
    }

    /// Execute `command`.
    ///
    /// `notice` receives the restart fallback line. It is written before
    /// initialization so it lands on the original stdout even when
    /// initialization redirects it.
    pub fn dispatch(
        &self,
        command: Command,
        settings: &LifecycleSettings,
        notice: &mut dyn Write,
    ) -> Result<Outcome, DispatchError> {
        debug!(%command, "dispatching");
        match command {
            Command::Start => self.start(settings),
            Command::Stop => self.signal(settings, LifecycleSignal::Terminate),
            Command::Kill => self.signal(settings, LifecycleSignal::Kill),
            Command::Restart => match self.signal(settings, LifecycleSignal::Restart) {
                Ok(outcome) => Ok(outcome),
                Err(e) => {
                    debug!(error = %e, "restart failed, falling back to start");
                    // Nothing useful to do if stdout is gone; carry on starting.
                    let _ = writeln!(notice, "{} restart error: {e}. trying fresh start.", self.program);
                    let _ = notice.flush();
                    self.start(settings)
                }
            },
        }
    }

    fn start(&self, settings: &LifecycleSettings) -> Result<Outcome, DispatchError> {
        self.host.prestart(settings)?;
        Ok(Outcome::Started)
    }

    fn signal(
        &self,
        settings: &LifecycleSettings,
        signal: LifecycleSignal,
    ) -> Result<Outcome, DispatchError> {
        let pid = self.host.read_pid(settings)?;
        self.host.send_signal(pid, signal)?;
        debug!(%pid, %signal, "signal delivered");
        Ok(Outcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdctrl_core::{InitError, PidfileError, ProcessId, SignalError};
    use mockall::mock;
    use mockall::predicate::eq;
    use std::io;
    use std::num::NonZeroUsize;
    use std::path::PathBuf;

    mock! {
        Host {}

        impl LifecycleHost for Host {
            fn read_pid(&self, settings: &LifecycleSettings) -> Result<ProcessId, PidfileError>;
            fn send_signal(&self, pid: ProcessId, signal: LifecycleSignal) -> Result<(), SignalError>;
            fn prestart(&self, settings: &LifecycleSettings) -> Result<(), InitError>;
        }
    }

    fn settings() -> LifecycleSettings {
        LifecycleSettings::new(NonZeroUsize::MIN).with_pidfile("/run/server.pid")
    }

    fn pid() -> ProcessId {
        ProcessId::new(4242).unwrap()
    }

    fn missing_pidfile() -> PidfileError {
        PidfileError::Read {
            path: PathBuf::from("/run/server.pid"),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
    }

    fn run(host: &MockHost, command: Command) -> (Result<Outcome, DispatchError>, String) {
        let mut notice = Vec::new();
        let result = Dispatcher::new(host, "server").dispatch(command, &settings(), &mut notice);
        (result, String::from_utf8(notice).unwrap())
    }

    #[test]
    fn start_initializes_and_signals_nothing() {
        let mut host = MockHost::new();
        host.expect_read_pid().never();
        host.expect_send_signal().never();
        host.expect_prestart().times(1).returning(|_| Ok(()));

        let (result, notice) = run(&host, Command::Start);
        assert_eq!(result.unwrap(), Outcome::Started);
        assert!(notice.is_empty());
    }

    #[test]
    fn stop_sends_terminate_to_pidfile_process() {
        let mut host = MockHost::new();
        host.expect_read_pid().times(1).returning(|_| Ok(pid()));
        host.expect_send_signal()
            .with(eq(pid()), eq(LifecycleSignal::Terminate))
            .times(1)
            .returning(|_, _| Ok(()));
        host.expect_prestart().never();

        let (result, notice) = run(&host, Command::Stop);
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert!(notice.is_empty());
    }

    #[test]
    fn kill_sends_kill() {
        let mut host = MockHost::new();
        host.expect_read_pid().returning(|_| Ok(pid()));
        host.expect_send_signal()
            .with(eq(pid()), eq(LifecycleSignal::Kill))
            .times(1)
            .returning(|_, _| Ok(()));
        host.expect_prestart().never();

        assert_eq!(run(&host, Command::Kill).0.unwrap(), Outcome::Completed);
    }

    #[test]
    fn stop_without_pidfile_is_a_runtime_error() {
        let mut host = MockHost::new();
        host.expect_read_pid().returning(|_| Err(missing_pidfile()));
        host.expect_send_signal().never();
        host.expect_prestart().never();

        let (result, notice) = run(&host, Command::Stop);
        let err = result.unwrap_err();
        assert!(matches!(err, DispatchError::Pidfile(_)));
        assert_eq!(err.exit_code(), cmdctrl_core::EXIT_RUNTIME_ERROR);
        assert!(notice.is_empty());
    }

    #[test]
    fn kill_of_vanished_process_is_not_retried() {
        let mut host = MockHost::new();
        host.expect_read_pid().returning(|_| Ok(pid()));
        host.expect_send_signal().times(1).returning(|pid, signal| {
            Err(SignalError::ProcessNotFound { pid, signal })
        });
        host.expect_prestart().never();

        let err = run(&host, Command::Kill).0.unwrap_err();
        assert_eq!(
            err.to_string(),
            "signal SIGKILL to process 4242: no such process"
        );
    }

    #[test]
    fn restart_signals_running_instance() {
        let mut host = MockHost::new();
        host.expect_read_pid().returning(|_| Ok(pid()));
        host.expect_send_signal()
            .with(eq(pid()), eq(LifecycleSignal::Restart))
            .times(1)
            .returning(|_, _| Ok(()));
        host.expect_prestart().never();

        let (result, notice) = run(&host, Command::Restart);
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert!(notice.is_empty());
    }

    #[test]
    fn restart_falls_back_to_start_when_pidfile_is_missing() {
        let mut host = MockHost::new();
        host.expect_read_pid().times(1).returning(|_| Err(missing_pidfile()));
        host.expect_send_signal().never();
        host.expect_prestart().times(1).returning(|_| Ok(()));

        let (result, notice) = run(&host, Command::Restart);
        assert_eq!(result.unwrap(), Outcome::Started);
        assert_eq!(
            notice,
            format!("server restart error: {}. trying fresh start.\n", missing_pidfile())
        );
    }

    #[test]
    fn restart_falls_back_to_start_when_process_is_gone() {
        let mut host = MockHost::new();
        host.expect_read_pid().returning(|_| Ok(pid()));
        host.expect_send_signal().times(1).returning(|pid, signal| {
            Err(SignalError::ProcessNotFound { pid, signal })
        });
        host.expect_prestart().times(1).returning(|_| Ok(()));

        let (result, notice) = run(&host, Command::Restart);
        assert_eq!(result.unwrap(), Outcome::Started);
        assert_eq!(
            notice,
            "server restart error: signal SIGUSR2 to process 4242: no such process. trying fresh start.\n"
        );
    }

    #[test]
    fn restart_fallback_surfaces_initialization_failure() {
        let mut host = MockHost::new();
        host.expect_read_pid().returning(|_| Err(PidfileError::NotConfigured));
        host.expect_send_signal().never();
        host.expect_prestart()
            .times(1)
            .returning(|_| Err(InitError::Pidfile(PidfileError::NotConfigured)));

        let (result, notice) = run(&host, Command::Restart);
        assert!(matches!(result, Err(DispatchError::Init(_))));
        assert!(notice.starts_with("server restart error: pidfile not configured."));
    }
}
