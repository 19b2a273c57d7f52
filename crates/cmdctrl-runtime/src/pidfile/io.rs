//! Atomic pidfile I/O.
//!
//! Format: the decimal process id and nothing else.
//! ```text
//! <pid>
//! ```
//! Surrounding whitespace is tolerated on read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cmdctrl_core::{LifecycleSettings, PidfileError, ProcessId};
use tracing::debug;

/// A pidfile at a fixed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pidfile {
    path: PathBuf,
}

impl Pidfile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The pidfile configured in `settings`.
    pub fn from_settings(settings: &LifecycleSettings) -> Result<Self, PidfileError> {
        settings
            .pidfile()
            .map(Self::new)
            .ok_or(PidfileError::NotConfigured)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `pid`, replacing any previous record.
    ///
    /// # Atomicity
    /// 1. Write to `<name>.<writer pid>.tmp` next to the target
    /// 2. Rename over the target (atomic on Unix)
    pub fn write(&self, pid: ProcessId) -> Result<(), PidfileError> {
        let write_err = |source: io::Error| PidfileError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, pid.to_string()).map_err(write_err)?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        debug!(path = %self.path.display(), %pid, "wrote pidfile");
        Ok(())
    }

    /// Resolve the recorded pid.
    ///
    /// A missing file is reported as `PidfileError::Read` carrying the OS
    /// message; callers treat it as "not running".
    pub fn read(&self) -> Result<ProcessId, PidfileError> {
        let content = fs::read_to_string(&self.path).map_err(|source| PidfileError::Read {
            path: self.path.clone(),
            source,
        })?;

        content
            .trim()
            .parse::<ProcessId>()
            .map_err(|reason| PidfileError::Parse {
                path: self.path.clone(),
                reason,
            })
    }

    /// Delete the pidfile (idempotent - no error if missing).
    pub fn remove(&self) -> Result<(), PidfileError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PidfileError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "pidfile".into(), |n| n.to_string_lossy().into_owned());
        self.path
            .with_file_name(format!("{name}.{}.tmp", std::process::id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use tempfile::tempdir;

    fn pid(raw: u32) -> ProcessId {
        ProcessId::new(raw).unwrap()
    }

    #[test]
    fn roundtrip_pidfile() {
        let dir = tempdir().unwrap();
        let pidfile = Pidfile::new(dir.path().join("app.pid"));

        pidfile.write(pid(98765)).expect("write failed");
        assert_eq!(fs::read_to_string(pidfile.path()).unwrap(), "98765");
        assert_eq!(pidfile.read().expect("read failed"), pid(98765));

        pidfile.remove().expect("remove failed");
        assert!(!pidfile.path().exists());

        // Second remove should be idempotent
        pidfile.remove().expect("second remove failed");
    }

    #[test]
    fn write_replaces_previous_record_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let pidfile = Pidfile::new(dir.path().join("app.pid"));

        pidfile.write(pid(1)).unwrap();
        pidfile.write(pid(2)).unwrap();

        assert_eq!(pidfile.read().unwrap(), pid(2));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1, "temp file left behind: {entries:?}");
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let pidfile = Pidfile::new(dir.path().join("run/nested/app.pid"));
        pidfile.write(pid(42)).unwrap();
        assert_eq!(pidfile.read().unwrap(), pid(42));
    }

    #[test]
    fn missing_pidfile_keeps_path_and_os_message() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.pid");
        let os_error = fs::read_to_string(&path).unwrap_err();

        let err = Pidfile::new(&path).read().unwrap_err();
        assert!(matches!(err, PidfileError::Read { .. }));
        assert_eq!(
            err.to_string(),
            format!("read pidfile {}: {}", path.display(), os_error)
        );
    }

    #[test]
    fn read_tolerates_whitespace_and_rejects_garbage() {
        let dir = tempdir().unwrap();
        let pidfile = Pidfile::new(dir.path().join("app.pid"));

        fs::write(pidfile.path(), " 314\n").unwrap();
        assert_eq!(pidfile.read().unwrap(), pid(314));

        fs::write(pidfile.path(), "not-a-pid").unwrap();
        assert!(matches!(pidfile.read(), Err(PidfileError::Parse { .. })));

        fs::write(pidfile.path(), "0").unwrap();
        assert!(matches!(pidfile.read(), Err(PidfileError::Parse { .. })));
    }

    #[test]
    fn from_settings_requires_a_path() {
        let settings = LifecycleSettings::new(NonZeroUsize::MIN);
        assert!(matches!(
            Pidfile::from_settings(&settings),
            Err(PidfileError::NotConfigured)
        ));

        let settings = settings.with_pidfile("/tmp/x.pid");
        assert_eq!(
            Pidfile::from_settings(&settings).unwrap().path(),
            Path::new("/tmp/x.pid")
        );
    }
}
