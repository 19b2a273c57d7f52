//! Command-line definition: lifecycle options plus the verb.
//!
//! [`LifecycleArgs`] is a flattenable `clap::Args` group so servers with
//! their own flags can embed it in their parser.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use cmdctrl_core::{LifecycleSettings, UsageError, normalize_user_path};

/// Default parallelism hint: one worker per available CPU.
pub fn default_max_procs() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

/// Options shared by every lifecycle verb.
///
/// Precedence: explicit flag > environment > config file > default.
#[derive(Debug, Clone, Args)]
pub struct LifecycleArgs {
    /// File path to redirect stdout to
    #[arg(long, env = "CMDCTRL_STDOUT", value_name = "PATH")]
    pub stdout: Option<String>,

    /// File path to redirect stderr to
    #[arg(long, env = "CMDCTRL_STDERR", value_name = "PATH")]
    pub stderr: Option<String>,

    /// Parallelism hint for the server runtime
    #[arg(
        long = "max-procs",
        visible_alias = "gomaxprocs",
        env = "CMDCTRL_MAX_PROCS",
        value_name = "N",
        default_value_t = default_max_procs()
    )]
    pub max_procs: NonZeroUsize,

    /// If true the dev restarter will be enabled
    #[arg(
        long,
        env = "CMDCTRL_DEVRESTARTER",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub devrestarter: bool,

    /// Path of the pidfile identifying the running instance
    #[arg(long, env = "CMDCTRL_PIDFILE", value_name = "PATH")]
    pub pidfile: Option<String>,

    /// Config file with KEY=VALUE lines (lower precedence than environment)
    #[arg(long, env = "CMDCTRL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl LifecycleArgs {
    /// Resolve the options into domain settings.
    ///
    /// Empty path values mean "unset", so `CMDCTRL_STDOUT=` leaves stdout alone.
    pub fn to_settings(&self) -> Result<LifecycleSettings, UsageError> {
        let mut settings =
            LifecycleSettings::new(self.max_procs).with_dev_restarter(self.devrestarter);

        if let Some(path) = resolve_path("stdout", self.stdout.as_deref())? {
            settings = settings.with_stdout(path);
        }
        if let Some(path) = resolve_path("stderr", self.stderr.as_deref())? {
            settings = settings.with_stderr(path);
        }
        if let Some(path) = resolve_path("pidfile", self.pidfile.as_deref())? {
            settings = settings.with_pidfile(path);
        }

        Ok(settings)
    }
}

fn resolve_path(flag: &str, raw: Option<&str>) -> Result<Option<PathBuf>, UsageError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => normalize_user_path(value)
            .map(Some)
            .map_err(|e| UsageError::InvalidArguments(format!("--{flag}: {e}"))),
    }
}

/// Standard server command line: `[options] {start|stop|kill|restart} [args...]`.
#[derive(Debug, Clone, Parser)]
#[command(about = "Control the lifecycle of a long-running server")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub lifecycle: LifecycleArgs,

    /// One of start, stop, kill or restart
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Arguments passed through to the server on start
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
