//! launch
//!
//! Starting an assistant session for a project.
//!
//! # Pipeline
//!
//! 1. [`LaunchRequest::for_project`] assembles the request from the global
//!    settings and the project (flags come from [`crate::core::flags::resolve`]).
//! 2. [`validate::validate`] rejects anything that could smuggle shell syntax
//!    into the terminal command line, or that points at missing paths.
//! 3. [`command`] builds the terminal invocation and the shell fallback.
//! 4. A [`Launcher`] spawns it. [`SystemLauncher`] is the real one;
//!    [`MockLauncher`] records requests for tests.
//!
//! Every outcome is a [`LaunchResult`]; launch failures are data, not errors,
//! so they can be logged and shown the same way as successes.

pub mod command;
pub mod detect;
pub mod mock;
pub mod spawn;
pub mod validate;

pub use detect::detect_claude_path;
pub use mock::MockLauncher;
pub use spawn::SystemLauncher;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::flags::resolve;
use crate::core::project::{Project, ProjectError, ProjectList};
use crate::core::settings::GlobalSettings;
use crate::core::types::ProjectId;

/// Reasons a launch is refused or fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("claude path contains invalid characters")]
    UnsafeClaudePath,

    #[error("project path contains invalid characters")]
    UnsafeProjectPath,

    #[error("terminal profile contains invalid characters")]
    UnsafeProfile,

    #[error("invalid flag rejected: {0}")]
    UnsafeFlag(String),

    #[error("pre-launch command contains line breaks")]
    UnsafePreLaunch,

    #[error("project directory does not exist: {0}")]
    MissingProjectDir(PathBuf),

    #[error("claude executable not found: {0}")]
    MissingExecutable(String),

    #[error("{program} exited with code: {code}")]
    TerminalExited { program: String, code: String },

    #[error("failed to start {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("{program} fallback also failed: {message}")]
    FallbackFailed { program: String, message: String },
}

/// Everything needed to start one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub claude_path: String,
    pub project_path: String,
    pub terminal_profile: String,
    pub flags: Vec<String>,
    pub remote_control: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_launch_command: Option<String>,
}

impl LaunchRequest {
    /// Build the request for a project under the current settings.
    pub fn for_project(settings: &GlobalSettings, project: &Project) -> Self {
        Self {
            claude_path: settings.claude_path.clone(),
            project_path: project.path.clone(),
            terminal_profile: settings.terminal_profile.clone(),
            flags: resolve(settings, &project.flag_overrides),
            remote_control: settings.remote_control,
            pre_launch_command: project
                .pre_launch_command
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }
}

/// Outcome of a launch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResult {
    pub success: bool,
    /// Command line that was started or attempted. Empty when the request
    /// was refused before anything ran.
    #[serde(default)]
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LaunchResult {
    pub fn started(command: impl Into<String>) -> Self {
        Self {
            success: true,
            command: command.into(),
            error: None,
        }
    }

    pub fn failed(command: impl Into<String>, error: &LaunchError) -> Self {
        Self {
            success: false,
            command: command.into(),
            error: Some(error.to_string()),
        }
    }
}

/// Something that can start a session.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Validate and start the session described by `request`.
    async fn launch(&self, request: &LaunchRequest) -> LaunchResult;
}

/// Launch a project and record the launch time on success.
///
/// The caller persists `projects` afterwards.
pub async fn launch_project(
    launcher: &dyn Launcher,
    settings: &GlobalSettings,
    projects: &mut ProjectList,
    id: &ProjectId,
) -> Result<LaunchResult, ProjectError> {
    let request = LaunchRequest::for_project(settings, projects.get(id)?);
    let result = launcher.launch(&request).await;
    if result.success {
        projects.touch(id)?;
    }
    Ok(result)
}
