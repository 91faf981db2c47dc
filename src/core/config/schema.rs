//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Launcher Config
//!
//! Located at (in order of precedence):
//! 1. `$LAUNCHDECK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/launchdeck/config.toml`
//! 3. `~/.launchdeck/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing so a typo surfaces at load time
//! instead of in the middle of a launch.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Launcher configuration.
///
/// # Example
///
/// ```toml
/// data_dir = "/home/me/.local/share/launchdeck"
/// log_tail_lines = 200
/// check_updates = true
///
/// [launch]
/// terminal = "wt"
/// fallback_shell = "pwsh"
/// probe_ms = 500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Override for the app data directory
    pub data_dir: Option<PathBuf>,

    /// Override for the launch log file; must live inside the data directory
    pub log_path: Option<PathBuf>,

    /// Lines shown by `log show` when `-n` is not given
    pub log_tail_lines: Option<usize>,

    /// Whether `update` may contact the release endpoint
    pub check_updates: Option<bool>,

    /// Release endpoint returning `{tag_name, html_url}`
    pub release_api: Option<String>,

    /// Launch settings
    pub launch: Option<LaunchConfig>,
}

impl LauncherConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_tail_lines == Some(0) {
            return Err(ConfigError::InvalidValue(
                "log_tail_lines must be at least 1".to_string(),
            ));
        }

        if let Some(api) = &self.release_api {
            if !(api.starts_with("https://") || api.starts_with("http://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "release_api must be an http(s) URL, got '{}'",
                    api
                )));
            }
        }

        if let Some(launch) = &self.launch {
            launch.validate()?;
        }

        Ok(())
    }
}

/// How sessions are started.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Terminal program that opens a new tab (default "wt")
    pub terminal: Option<String>,

    /// Shell used for pre-launch commands and as the fallback (default "pwsh")
    pub fallback_shell: Option<String>,

    /// Milliseconds to wait before checking whether the terminal died
    pub probe_ms: Option<u64>,
}

impl LaunchConfig {
    /// Validate the launch configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("launch.terminal", &self.terminal),
            ("launch.fallback_shell", &self.fallback_shell),
        ] {
            if let Some(program) = value {
                if program.trim().is_empty() {
                    return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
                }
            }
        }

        if let Some(ms) = self.probe_ms {
            if ms > 10_000 {
                return Err(ConfigError::InvalidValue(format!(
                    "launch.probe_ms must be at most 10000, got {}",
                    ms
                )));
            }
        }

        Ok(())
    }
}
