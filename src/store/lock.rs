//! store::lock
//!
//! Cross-process lock for the data document.
//!
//! # Invariants
//!
//! - Every read-modify-write of the document happens with the lock held
//! - The lock is released on drop (RAII)
//! - Acquisition polls until a deadline instead of blocking forever, so a
//!   wedged process surfaces as a timeout rather than a hang

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use super::traits::StoreError;

/// Default timeout for lock acquisition.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Polling interval when waiting for the lock.
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// An exclusive lock on the data document.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    file: Option<File>,
}

impl StoreLock {
    /// Acquire the lock, polling until `timeout` expires.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockError` on timeout or I/O failure.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, StoreError> {
        let deadline = Instant::now() + timeout;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| lock_error(path, e.to_string()))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| lock_error(path, format!("cannot open: {}", e)))?;

        loop {
            match FileExt::try_lock_exclusive(&file) {
                Ok(()) => {
                    return Ok(Self {
                        path: path.to_path_buf(),
                        file: Some(file),
                    })
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if Instant::now() >= deadline {
                        return Err(lock_error(path, "timed out waiting for lock".into()));
                    }
                    thread::sleep(LOCK_POLL_INTERVAL);
                }
                Err(e) => return Err(lock_error(path, format!("lock failed: {}", e))),
            }
        }
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}

fn lock_error(path: &Path, message: String) -> StoreError {
    StoreError::LockError {
        path: path.to_path_buf(),
        message,
    }
}
