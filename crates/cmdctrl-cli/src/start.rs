//! The entry point servers call first thing in `main`.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process;

use cmdctrl_core::{Command, LifecycleHost, LifecycleSettings};
use cmdctrl_runtime::SystemHost;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::config::parse_layered;
use crate::dispatch::{Dispatcher, Outcome};
use crate::error::CliError;
use crate::logging::init_logging;
use crate::parser::Cli;
use crate::usage;

/// Returned to the server once the process is initialized and should serve.
#[derive(Debug, Clone)]
pub struct Started {
    /// `Start`, or `Restart` when no running instance could be signalled.
    pub command: Command,
    pub settings: LifecycleSettings,
    /// Positional arguments after the verb.
    pub args: Vec<String>,
}

impl Started {
    /// Whether this start is the fallback of a failed `restart`.
    pub fn fell_back(&self) -> bool {
        self.command == Command::Restart
    }

    /// A multi-threaded tokio runtime sized by the `--max-procs` hint.
    pub fn runtime(&self) -> io::Result<Runtime> {
        Builder::new_multi_thread()
            .worker_threads(self.settings.max_procs.get())
            .enable_all()
            .build()
    }
}

/// Result of a successful [`run`].
#[derive(Debug)]
pub enum Flow {
    /// The verb completed; exit with success.
    Exit,
    /// Initialization completed; run the server.
    Serve(Started),
}

/// Validate the verb and dispatch it against `host`.
///
/// `out` receives the restart fallback notice.
pub fn run<H: LifecycleHost>(
    program: &str,
    cli: Cli,
    host: &H,
    out: &mut dyn Write,
) -> Result<Flow, CliError> {
    let command = Command::from_arg(cli.command.as_deref())?;
    let settings = cli.lifecycle.to_settings()?;

    match Dispatcher::new(host, program).dispatch(command, &settings, out)? {
        Outcome::Completed => Ok(Flow::Exit),
        Outcome::Started => Ok(Flow::Serve(Started {
            command,
            settings,
            args: cli.args,
        })),
    }
}

/// Print `err` the way the command line reports it and return the exit code.
///
/// Help and version go to `out`; everything else goes to `errw`. Usage
/// errors are followed by the usage text.
pub fn report(err: &CliError, program: &str, out: &mut dyn Write, errw: &mut dyn Write) -> i32 {
    let code = err.exit_code();
    // Closed streams are not worth a second error; the exit code still reports.
    let _ = match err {
        CliError::Args(e) if code == cmdctrl_core::EXIT_SUCCESS => write!(out, "{e}"),
        CliError::Args(e) => write!(errw, "{e}"),
        _ if err.wants_usage() => {
            writeln!(errw, "{err}").and_then(|()| write!(errw, "{}", usage::render(program)))
        }
        _ => writeln!(errw, "{err}"),
    };
    code
}

/// Parse the process arguments and run the verb.
///
/// Returns only when this process should go on to serve: after `start`, or
/// after a `restart` that fell back to a fresh start. Every other path exits
/// the process with 0 (success), 1 (usage error) or 2 (runtime error).
pub fn simple_start() -> Started {
    let args: Vec<OsString> = env::args_os().collect();
    let program = usage::program_name(args.first().map(OsString::as_os_str));
    let mut out = io::stdout();
    let mut err = io::stderr();

    let result = parse_layered(args).and_then(|cli| {
        init_logging(cli.lifecycle.verbose);
        run(&program, cli, &SystemHost, &mut out)
    });

    let code = match result {
        Ok(Flow::Serve(started)) => {
            debug!(command = %started.command, "serving");
            return started;
        }
        Ok(Flow::Exit) => cmdctrl_core::EXIT_SUCCESS,
        Err(e) => report(&e, &program, &mut out, &mut err),
    };

    let _ = out.flush();
    let _ = err.flush();
    process::exit(code)
}
