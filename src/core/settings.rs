//! core::settings
//!
//! Process-wide launcher settings.
//!
//! # Persisted Form
//!
//! Settings are stored under the `"settings"` key of the data document with
//! camelCase field names:
//!
//! ```json
//! {
//!   "claudePath": "claude",
//!   "terminalProfile": "PowerShell",
//!   "globalFlags": [{ "flagName": "--verbose", "enabled": false }],
//!   "customFlags": ["--model=opus"],
//!   "remoteControl": false
//! }
//! ```
//!
//! Every field has a default, so a partial object read from disk is merged
//! over [`GlobalSettings::default`] field by field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::flags::BUILT_IN_FLAGS;
use super::types::{FlagName, TypeError};

/// Executable name used until path detection finds something better.
pub const DEFAULT_CLAUDE_PATH: &str = "claude";

/// Terminal profile used for new tabs.
pub const DEFAULT_TERMINAL_PROFILE: &str = "PowerShell";

/// Errors from settings mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown global flag: {0}")]
    UnknownGlobalFlag(String),

    #[error("unknown custom flag: {0}")]
    UnknownCustomFlag(String),

    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    InvalidFlag(#[from] TypeError),
}

/// Default on/off state of a built-in flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFlagState {
    pub flag_name: String,
    pub enabled: bool,
}

impl GlobalFlagState {
    pub fn new(flag_name: impl Into<String>, enabled: bool) -> Self {
        Self {
            flag_name: flag_name.into(),
            enabled,
        }
    }
}

/// Launcher-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Path to the assistant executable.
    pub claude_path: String,

    /// Terminal profile to open the session in.
    pub terminal_profile: String,

    /// Default state of each built-in flag, in display order.
    pub global_flags: Vec<GlobalFlagState>,

    /// User-defined flags, on unless a project turns them off.
    pub custom_flags: Vec<String>,

    /// Start the assistant in remote-control mode.
    pub remote_control: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            claude_path: DEFAULT_CLAUDE_PATH.to_string(),
            terminal_profile: DEFAULT_TERMINAL_PROFILE.to_string(),
            global_flags: BUILT_IN_FLAGS
                .iter()
                .map(|def| GlobalFlagState::new(def.name, false))
                .collect(),
            custom_flags: Vec::new(),
            remote_control: false,
        }
    }
}

impl GlobalSettings {
    /// Keys accepted by [`GlobalSettings::set_value`].
    pub const KEYS: &'static [&'static str] = &["claude-path", "terminal-profile", "remote-control"];

    /// Whether the executable path is still the undetected default.
    pub fn needs_path_detection(&self) -> bool {
        self.claude_path == DEFAULT_CLAUDE_PATH
    }

    /// Ensure every built-in flag has a global entry.
    ///
    /// Settings written before a flag joined the catalog lack its entry;
    /// missing ones are appended disabled. Returns true if anything was added.
    pub fn ensure_builtin_flags(&mut self) -> bool {
        let mut changed = false;
        for def in BUILT_IN_FLAGS {
            if !self.global_flags.iter().any(|gf| gf.flag_name == def.name) {
                self.global_flags.push(GlobalFlagState::new(def.name, false));
                changed = true;
            }
        }
        changed
    }

    /// Flip a global flag's default. Returns the new value.
    pub fn toggle_global_flag(&mut self, name: &str) -> Result<bool, SettingsError> {
        let gf = self
            .global_flags
            .iter_mut()
            .find(|gf| gf.flag_name == name)
            .ok_or_else(|| SettingsError::UnknownGlobalFlag(name.to_string()))?;
        gf.enabled = !gf.enabled;
        Ok(gf.enabled)
    }

    /// Whether a global flag is enabled by default.
    pub fn global_flag_enabled(&self, name: &str) -> Option<bool> {
        self.global_flags
            .iter()
            .find(|gf| gf.flag_name == name)
            .map(|gf| gf.enabled)
    }

    /// Add a custom flag. Returns false if it was already present.
    pub fn add_custom_flag(&mut self, flag: &str) -> Result<bool, SettingsError> {
        let flag = FlagName::new(flag.trim())?;
        if self.custom_flags.iter().any(|f| f == flag.as_str()) {
            return Ok(false);
        }
        self.custom_flags.push(flag.into());
        Ok(true)
    }

    /// Remove a custom flag.
    pub fn remove_custom_flag(&mut self, flag: &str) -> Result<(), SettingsError> {
        let before = self.custom_flags.len();
        self.custom_flags.retain(|f| f != flag);
        if self.custom_flags.len() == before {
            return Err(SettingsError::UnknownCustomFlag(flag.to_string()));
        }
        Ok(())
    }

    /// Set a scalar setting by key.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "claude-path" | "claudePath" => {
                if value.trim().is_empty() {
                    return Err(SettingsError::InvalidValue {
                        key: key.to_string(),
                        message: "path cannot be empty".to_string(),
                    });
                }
                self.claude_path = value.trim().to_string();
            }
            "terminal-profile" | "terminalProfile" => {
                self.terminal_profile = value.trim().to_string();
            }
            "remote-control" | "remoteControl" => {
                self.remote_control = parse_bool(value).ok_or_else(|| {
                    SettingsError::InvalidValue {
                        key: key.to_string(),
                        message: format!("expected true or false, got '{}'", value),
                    }
                })?;
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
