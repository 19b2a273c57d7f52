//! Redirect the process's standard output streams to files.
//!
//! Redirection replaces file descriptors 1 and 2 themselves, so output from
//! child processes and from code that bypasses Rust's `Stdout` lands in the
//! files too.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use cmdctrl_core::InitError;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    const fn name(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Point stdout and/or stderr at the given files.
///
/// Files are created if missing and appended to otherwise. `None` leaves a
/// stream unchanged. Both files are opened before either descriptor is
/// replaced, so a bad stderr path does not leave stdout half-redirected.
pub fn redirect_outputs(stdout: Option<&Path>, stderr: Option<&Path>) -> Result<(), InitError> {
    let stdout_file = stdout
        .map(|path| open_append(Stream::Stdout, path))
        .transpose()?;
    let stderr_file = stderr
        .map(|path| open_append(Stream::Stderr, path))
        .transpose()?;

    if let (Some(file), Some(path)) = (stdout_file, stdout) {
        replace(Stream::Stdout, &file, path)?;
    }
    if let (Some(file), Some(path)) = (stderr_file, stderr) {
        replace(Stream::Stderr, &file, path)?;
    }

    Ok(())
}

fn open_append(stream: Stream, path: &Path) -> Result<File, InitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| InitError::Redirect {
            stream: stream.name(),
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(unix)]
fn replace(stream: Stream, file: &File, path: &Path) -> Result<(), InitError> {
    use nix::unistd::dup2;
    use std::os::fd::AsRawFd;

    let target = match stream {
        Stream::Stdout => {
            // Anything still buffered belongs to the old destination.
            let _ = io::stdout().flush();
            io::stdout().as_raw_fd()
        }
        Stream::Stderr => {
            let _ = io::stderr().flush();
            io::stderr().as_raw_fd()
        }
    };

    dup2(file.as_raw_fd(), target).map_err(|errno| InitError::Redirect {
        stream: stream.name(),
        path: path.to_path_buf(),
        source: io::Error::from(errno),
    })?;

    debug!(stream = stream.name(), path = %path.display(), "redirected output");
    Ok(())
}

#[cfg(not(unix))]
fn replace(stream: Stream, _file: &File, path: &Path) -> Result<(), InitError> {
    Err(InitError::Redirect {
        stream: stream.name(),
        path: path.to_path_buf(),
        source: io::Error::new(
            io::ErrorKind::Unsupported,
            "output redirection is only supported on Unix",
        ),
    })
}
