//! Layered configuration: flag > environment > config file > default.
//!
//! Clap already resolves flag > environment > default. The config file slots
//! in below the environment by loading it into the process environment
//! without overriding keys that are already set, then parsing again.

use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Load `KEY=VALUE` lines from `path` into the environment.
///
/// Keys already present in the environment keep their value.
pub fn load_config_file(path: &Path) -> Result<(), CliError> {
    dotenvy::from_path(path).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config file");
    Ok(())
}

/// Parse `args` (including the program name) with all configuration layers.
pub fn parse_layered<I, T>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let cli = Cli::try_parse_from(&args)?;

    let Some(config) = cli.lifecycle.config.as_deref() else {
        return Ok(cli);
    };
    load_config_file(config)?;

    Ok(Cli::try_parse_from(&args)?)
}
