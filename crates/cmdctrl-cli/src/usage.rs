//! Usage text shown with usage errors.

use std::ffi::OsStr;
use std::path::Path;

use clap::CommandFactory;
use cmdctrl_core::Command;

use crate::parser::Cli;

/// Name of the running program as invoked: the basename of argv[0].
pub fn program_name(arg0: Option<&OsStr>) -> String {
    arg0.and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// `usage: <program> [options...] {start|stop|kill|restart}` followed by the
/// option list.
pub fn render(program: &str) -> String {
    let mut command = Cli::command()
        .bin_name(program.to_string())
        .override_usage(format!("{program} [OPTIONS] {}", Command::choices()));
    command.render_help().to_string()
}
