//! launch::spawn
//!
//! Spawning the terminal, with a shell fallback.
//!
//! # Probe
//!
//! Terminal launchers usually hand the tab to an already running window and
//! exit. A launcher that is missing or misconfigured exits with a failure
//! almost immediately, so after spawning we wait a short probe window and
//! check whether the child has already failed. If it has, or if it could not
//! be spawned at all, the session is started in a plain shell instead.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::{Child, Command};

use crate::applog::LaunchLog;
use crate::core::config::Config;

use super::command::TerminalCommand;
use super::validate::validate;
use super::{LaunchError, LaunchRequest, LaunchResult, Launcher};

/// Set inside a running assistant session; a nested session refuses to start
/// while it is inherited.
pub const SESSION_ENV: &str = "CLAUDECODE";

const DEFAULT_TERMINAL: &str = "wt";
const DEFAULT_SHELL: &str = "pwsh";
const DEFAULT_PROBE: Duration = Duration::from_millis(500);

/// Launcher that starts real processes.
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    terminal: String,
    shell: String,
    probe: Duration,
    log: LaunchLog,
}

impl SystemLauncher {
    pub fn new(log: LaunchLog) -> Self {
        Self {
            terminal: DEFAULT_TERMINAL.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            probe: DEFAULT_PROBE,
            log,
        }
    }

    /// Launcher using the programs and probe window from config.
    pub fn from_config(config: &Config, log: LaunchLog) -> Self {
        Self::new(log)
            .with_terminal(config.terminal())
            .with_shell(config.fallback_shell())
            .with_probe(Duration::from_millis(config.probe_ms()))
    }

    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = terminal.into();
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_probe(mut self, probe: Duration) -> Self {
        self.probe = probe;
        self
    }

    /// Spawn the terminal and fail if it dies within the probe window.
    async fn start_terminal(&self, command: &TerminalCommand) -> Result<(), LaunchError> {
        let mut child = spawn(command, None).map_err(|e| LaunchError::SpawnFailed {
            program: command.program.clone(),
            message: e.to_string(),
        })?;

        tokio::time::sleep(self.probe).await;

        match child.try_wait() {
            Ok(Some(status)) if !status.success() => Err(LaunchError::TerminalExited {
                program: command.program.clone(),
                code: status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
            }),
            // Still running, exited cleanly, or unknown: the tab is up.
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch(&self, request: &LaunchRequest) -> LaunchResult {
        self.log
            .info(&format!("Launch requested for: {}", request.project_path));

        if let Err(e) = validate(request) {
            self.log.error(&e.to_string());
            return LaunchResult::failed("", &e);
        }

        let primary = TerminalCommand::primary(request, &self.terminal, &self.shell);
        let primary_line = primary.display();
        self.log.info(&format!("Running: {primary_line}"));

        let failure = match self.start_terminal(&primary).await {
            Ok(()) => {
                self.log.info("Launch successful");
                return LaunchResult::started(primary_line);
            }
            Err(e) => e,
        };

        self.log
            .warn(&format!("{failure}, falling back to {}", self.shell));

        let fallback = TerminalCommand::fallback(request, &self.shell);
        let fallback_line = fallback.display();
        match spawn(&fallback, Some(Path::new(&request.project_path))) {
            Ok(_) => {
                self.log.info(&format!("Fallback launched: {fallback_line}"));
                LaunchResult::started(fallback_line)
            }
            Err(e) => {
                let error = LaunchError::FallbackFailed {
                    program: self.shell.clone(),
                    message: e.to_string(),
                };
                self.log.error(&error.to_string());
                LaunchResult::failed(fallback_line, &error)
            }
        }
    }
}

fn spawn(command: &TerminalCommand, dir: Option<&Path>) -> std::io::Result<Child> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .env_remove(SESSION_ENV)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd.spawn()
}
