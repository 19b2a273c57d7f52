//! Shared helpers for driving the demo server binary.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;
use std::time::{Duration, Instant};

const LIFECYCLE_ENV: &[&str] = &[
    "CMDCTRL_STDOUT",
    "CMDCTRL_STDERR",
    "CMDCTRL_MAX_PROCS",
    "CMDCTRL_DEVRESTARTER",
    "CMDCTRL_PIDFILE",
    "CMDCTRL_CONFIG",
    "RUST_LOG",
    "COUNT",
];

/// The demo binary with a clean lifecycle environment.
pub fn demo() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cmdctrl-demo"));
    for key in LIFECYCLE_ENV {
        cmd.env_remove(key);
    }
    cmd
}

/// Poll until `path` exists.
pub fn wait_for_file(path: &Path, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

pub fn read_pid(path: &Path) -> u32 {
    fs::read_to_string(path)
        .expect("pidfile unreadable")
        .trim()
        .parse()
        .expect("pidfile does not hold a pid")
}

/// The message a failed read of the missing `path` produces.
pub fn missing_pidfile_message(path: &Path) -> String {
    let os_error = fs::read_to_string(path).expect_err("pidfile should not exist");
    format!("read pidfile {}: {os_error}", path.display())
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
