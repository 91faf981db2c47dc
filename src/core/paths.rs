//! core::paths
//!
//! Centralized path routing for launcher storage locations.
//!
//! # Storage Layout
//!
//! Everything the launcher writes lives under the data directory:
//! - `launchdeck-data.json` - Projects and settings document
//! - `launchdeck-data.json.lock` - Advisory lock for the document
//! - `logs/launchdeck.log` - Launch log (unless relocated)
//!
//! # Data Directory Resolution
//!
//! 1. `--data-dir` on the command line
//! 2. `$LAUNCHDECK_HOME`
//! 3. `data_dir` in the config file
//! 4. The platform data directory (`dirs::data_dir()/launchdeck`)
//! 5. `~/.launchdeck`
//!
//! # Example
//!
//! ```
//! use launchdeck::core::paths::LauncherPaths;
//! use std::path::PathBuf;
//!
//! let paths = LauncherPaths::new(PathBuf::from("/data"));
//! assert_eq!(paths.store_path(), PathBuf::from("/data/launchdeck-data.json"));
//! assert_eq!(paths.default_log_path(), PathBuf::from("/data/logs/launchdeck.log"));
//! ```

use std::path::{Path, PathBuf};

use super::config::{Config, ConfigError};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "LAUNCHDECK_HOME";

/// File name of the data document.
pub const STORE_FILE: &str = "launchdeck-data.json";

/// File name of the launch log.
pub const LOG_FILE: &str = "launchdeck.log";

/// Resolved storage locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherPaths {
    /// Root of all launcher data.
    pub data_dir: PathBuf,
    /// Log file location, if relocated away from the default.
    log_override: Option<PathBuf>,
}

impl LauncherPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            log_override: None,
        }
    }

    /// Resolve paths from the CLI override, environment and config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if no location can be determined.
    pub fn resolve(cli_data_dir: Option<&Path>, config: &Config) -> Result<Self, ConfigError> {
        let data_dir = match cli_data_dir {
            Some(dir) => dir.to_path_buf(),
            None => match std::env::var_os(HOME_ENV) {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => match config.data_dir() {
                    Some(dir) => dir.to_path_buf(),
                    None => Self::platform_default()?,
                },
            },
        };

        Ok(Self {
            data_dir,
            log_override: config.log_path().map(Path::to_path_buf),
        })
    }

    fn platform_default() -> Result<PathBuf, ConfigError> {
        if let Some(dir) = dirs::data_dir() {
            return Ok(dir.join("launchdeck"));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".launchdeck"))
    }

    /// Use a specific log file instead of the default.
    pub fn with_log_path(mut self, path: PathBuf) -> Self {
        self.log_override = Some(path);
        self
    }

    /// Path of the data document.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    /// Path of the advisory lock guarding the data document.
    pub fn store_lock_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.lock", STORE_FILE))
    }

    /// Files the launcher owns inside the data directory.
    pub fn reserved_paths(&self) -> Vec<PathBuf> {
        let store = self.store_path();
        vec![
            store.with_extension("json.tmp"),
            self.store_lock_path(),
            store,
        ]
    }

    /// Directory holding the default log file.
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Log location when not relocated.
    pub fn default_log_path(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE)
    }

    /// Effective log location.
    pub fn log_path(&self) -> PathBuf {
        self.log_override
            .clone()
            .unwrap_or_else(|| self.default_log_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LauncherConfig;

    #[test]
    fn layout() {
        let paths = LauncherPaths::new(PathBuf::from("/d"));
        assert_eq!(paths.store_path(), PathBuf::from("/d/launchdeck-data.json"));
        assert_eq!(
            paths.store_lock_path(),
            PathBuf::from("/d/launchdeck-data.json.lock")
        );
        assert_eq!(paths.log_path(), PathBuf::from("/d/logs/launchdeck.log"));
    }

    #[test]
    fn cli_override_wins() {
        let config = Config::from_file(LauncherConfig {
            data_dir: Some(PathBuf::from("/from-config")),
            ..Default::default()
        });
        let paths = LauncherPaths::resolve(Some(Path::new("/from-cli")), &config).unwrap();
        assert_eq!(paths.data_dir, PathBuf::from("/from-cli"));
    }

    #[test]
    fn log_override_from_config() {
        let config = Config::from_file(LauncherConfig {
            log_path: Some(PathBuf::from("/d/logs/custom.log")),
            ..Default::default()
        });
        let paths = LauncherPaths::resolve(Some(Path::new("/d")), &config).unwrap();
        assert_eq!(paths.log_path(), PathBuf::from("/d/logs/custom.log"));
        assert_eq!(paths.default_log_path(), PathBuf::from("/d/logs/launchdeck.log"));
    }
}
