use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Filename of the advisory lock, kept next to the store file.
const LOCK_FILE: &str = ".taskflow.lock";

/// How long `acquire` waits before giving up.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Advisory file lock serializing store mutations.
///
/// The list itself is single-actor (one process, one thread), but nothing
/// stops two `tf` invocations from racing each other's read-modify-write
/// cycle. Every write command holds this lock from load to save. Uses
/// platform-native flock on Unix.
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not lock {path}: another tf process may be writing")]
    Timeout { path: PathBuf },
}

impl StoreLock {
    /// Acquire the lock for `dir`, waiting up to the default timeout.
    pub fn acquire(dir: &Path) -> Result<Self, LockError> {
        Self::acquire_timeout(dir, DEFAULT_TIMEOUT)
    }

    /// Acquire the lock for `dir`, waiting up to `timeout`.
    pub fn acquire_timeout(dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| LockError::Create {
                path: path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        while try_lock(&file).is_err() {
            if start.elapsed() >= timeout {
                return Err(LockError::Timeout { path });
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        Ok(StoreLock { _file: file, path })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // flock is released when the file closes; the lock file itself is
        // disposable.
        let _ = fs::remove_file(&self.path);
    }
}

/// Try to acquire an exclusive flock on the file (non-blocking)
#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    // No flock on this platform; locking stays advisory.
    Ok(())
}
