//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! The launcher has a single user-level config file. It controls where data
//! lives and how sessions are started; the launch settings themselves
//! (executable path, flags, terminal profile) live in the data document.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment (`$LAUNCHDECK_HOME` for the data directory)
//! 4. CLI flags (`--data-dir`)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$LAUNCHDECK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/launchdeck/config.toml`
//! 3. `~/.launchdeck/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use launchdeck::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Tail lines: {}", config.log_tail_lines());
//! println!("Terminal: {}", config.terminal());
//! ```

pub mod schema;

pub use schema::{LaunchConfig, LauncherConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LAUNCHDECK_CONFIG";

/// Default release endpoint.
pub const DEFAULT_RELEASE_API: &str =
    "https://api.github.com/repos/arris138/Claudelauncher/releases/latest";

const DEFAULT_TAIL_LINES: usize = 100;
const DEFAULT_TERMINAL: &str = "wt";
const DEFAULT_FALLBACK_SHELL: &str = "pwsh";
const DEFAULT_PROBE_MS: u64 = 500;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with accessor defaults applied.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: LauncherConfig,
    /// Path the config was loaded from, if any file existed
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Wrap an in-memory config that was not read from disk.
    pub fn from_file(file: LauncherConfig) -> Self {
        Self { file, path: None }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: LauncherConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        // 1. Check $LAUNCHDECK_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/launchdeck/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("launchdeck/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.launchdeck/config.toml
        let path = dirs::home_dir()?.join(".launchdeck/config.toml");
        path.exists().then_some(path)
    }

    /// Where the config should be written.
    ///
    /// The loaded file if there was one, else `$LAUNCHDECK_CONFIG` if set,
    /// else `~/.launchdeck/config.toml`.
    pub fn write_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".launchdeck/config.toml"))
    }

    /// Validate and write the config atomically, returning the path written.
    pub fn save(&mut self) -> Result<PathBuf, ConfigError> {
        self.file.validate()?;
        let path = self.write_path()?;
        write_config_atomic(&path, &self.file)?;
        self.path = Some(path.clone());
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Configured data directory, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        self.file.data_dir.as_deref()
    }

    /// Configured log file, if any.
    pub fn log_path(&self) -> Option<&Path> {
        self.file.log_path.as_deref()
    }

    /// Default number of lines for `log show`.
    pub fn log_tail_lines(&self) -> usize {
        self.file.log_tail_lines.unwrap_or(DEFAULT_TAIL_LINES)
    }

    /// Whether the release check may run. Defaults to `true`.
    pub fn check_updates(&self) -> bool {
        self.file.check_updates.unwrap_or(true)
    }

    pub fn release_api(&self) -> &str {
        self.file
            .release_api
            .as_deref()
            .unwrap_or(DEFAULT_RELEASE_API)
    }

    /// Terminal program. Defaults to "wt".
    pub fn terminal(&self) -> &str {
        self.file
            .launch
            .as_ref()
            .and_then(|l| l.terminal.as_deref())
            .unwrap_or(DEFAULT_TERMINAL)
    }

    /// Fallback shell. Defaults to "pwsh".
    pub fn fallback_shell(&self) -> &str {
        self.file
            .launch
            .as_ref()
            .and_then(|l| l.fallback_shell.as_deref())
            .unwrap_or(DEFAULT_FALLBACK_SHELL)
    }

    /// Probe window after spawning the terminal. Defaults to 500ms.
    pub fn probe_ms(&self) -> u64 {
        self.file
            .launch
            .as_ref()
            .and_then(|l| l.probe_ms)
            .unwrap_or(DEFAULT_PROBE_MS)
    }

    /// Path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Write a config file atomically.
fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    // Write to temp file in same directory (for atomic rename)
    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
