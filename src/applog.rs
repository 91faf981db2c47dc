//! applog
//!
//! The launch log.
//!
//! # Format
//!
//! One line per event, appended:
//!
//! ```text
//! [2024-05-01 09:30:12.044] [INFO] Launch requested for: C:\code\site
//! ```
//!
//! Timestamps are local time. Writing is best effort: a log that cannot be
//! written never fails the operation being logged.
//!
//! # Containment
//!
//! Reading, opening and relocating the log are only allowed while the log
//! path resolves inside the data directory. This keeps `log show` from being
//! pointed at arbitrary files through a hand-edited config.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::core::paths::LauncherPaths;

/// Text returned by [`LaunchLog::read_tail`] when nothing has been logged.
pub const EMPTY_LOG_MESSAGE: &str = "No log entries yet.";

/// Errors from log operations.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("log path '{path}' is outside the data directory '{data_dir}'")]
    OutsideDataDir { path: PathBuf, data_dir: PathBuf },

    #[error("log path '{0}' must not contain '..'")]
    ParentTraversal(PathBuf),

    #[error("log path '{0}' is used for launcher data")]
    ReservedPath(PathBuf),

    #[error("log path '{0}' is a directory")]
    IsDirectory(PathBuf),

    #[error("failed to read log '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open '{path}': {source}")]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        })
    }
}

/// Append-only launch log.
#[derive(Debug, Clone)]
pub struct LaunchLog {
    path: PathBuf,
    data_dir: PathBuf,
}

impl LaunchLog {
    pub fn new(path: PathBuf, data_dir: PathBuf) -> Self {
        Self { path, data_dir }
    }

    pub fn from_paths(paths: &LauncherPaths) -> Self {
        Self::new(paths.log_path(), paths.data_dir.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a line. Errors are swallowed.
    pub fn write(&self, level: Level, message: &str) {
        let line = format_line(&chrono::Local::now(), level, message);

        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            let _ = file.write_all(line.as_bytes());
        }
    }

    pub fn info(&self, message: &str) {
        self.write(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.write(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.write(Level::Error, message);
    }

    /// Last `lines` lines of the log.
    ///
    /// A log that does not exist yet reads as [`EMPTY_LOG_MESSAGE`].
    pub fn read_tail(&self, lines: usize) -> Result<String, LogError> {
        self.ensure_contained()?;

        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(tail(&content, lines)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(EMPTY_LOG_MESSAGE.to_string())
            }
            Err(e) => Err(LogError::ReadError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Directory containing the log.
    pub fn folder(&self) -> Result<PathBuf, LogError> {
        self.ensure_contained()?;
        Ok(self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.data_dir.clone()))
    }

    /// Open the log folder in the platform file manager.
    pub fn open_folder(&self) -> Result<PathBuf, LogError> {
        let folder = self.folder()?;
        fs::create_dir_all(&folder).map_err(|e| LogError::OpenError {
            path: folder.clone(),
            source: e,
        })?;
        open::that(&folder).map_err(|e| LogError::OpenError {
            path: folder.clone(),
            source: e,
        })?;
        Ok(folder)
    }

    /// Check a proposed new log location.
    ///
    /// Relative paths are taken relative to the data directory. The target
    /// must be a file path that is not one of the launcher's own data files.
    /// Returns the absolute path to store.
    pub fn validate_relocation(
        paths: &LauncherPaths,
        requested: &Path,
    ) -> Result<PathBuf, LogError> {
        let data_dir = &paths.data_dir;
        if requested
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(LogError::ParentTraversal(requested.to_path_buf()));
        }

        let absolute = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            data_dir.join(requested)
        };

        if !is_within(&absolute, data_dir) {
            return Err(LogError::OutsideDataDir {
                path: absolute,
                data_dir: data_dir.to_path_buf(),
            });
        }

        let target = canonical_best_effort(&absolute);
        if target == canonical_best_effort(data_dir) || absolute.is_dir() {
            return Err(LogError::IsDirectory(absolute));
        }
        if paths
            .reserved_paths()
            .iter()
            .any(|reserved| canonical_best_effort(reserved) == target)
        {
            return Err(LogError::ReservedPath(absolute));
        }
        Ok(absolute)
    }

    fn ensure_contained(&self) -> Result<(), LogError> {
        if is_within(&self.path, &self.data_dir) {
            Ok(())
        } else {
            Err(LogError::OutsideDataDir {
                path: self.path.clone(),
                data_dir: self.data_dir.clone(),
            })
        }
    }
}

fn format_line(now: &chrono::DateTime<chrono::Local>, level: Level, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        message
    )
}

fn tail(content: &str, n: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

/// Resolve symlinks as far as the path exists, keeping the rest verbatim.
fn canonical_best_effort(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return rest
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

fn is_within(path: &Path, root: &Path) -> bool {
    canonical_best_effort(path).starts_with(canonical_best_effort(root))
}
