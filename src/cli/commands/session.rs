//! Shared setup for commands that touch the data store.

use anyhow::{Context as _, Result};

use crate::applog::LaunchLog;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::paths::LauncherPaths;
use crate::core::project::Project;
use crate::core::settings::DEFAULT_CLAUDE_PATH;
use crate::core::types::ProjectId;
use crate::launch::detect_claude_path;
use crate::store::{AppData, AppStore, JsonFileStore};
use crate::ui::output::{self, Verbosity};

/// Config, paths, store and loaded data for one command.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub paths: LauncherPaths,
    pub store: AppStore,
    pub data: AppData,
    pub log: LaunchLog,
    pub verbosity: Verbosity,
}

impl Session {
    /// Load config and data.
    ///
    /// Store problems fall back to defaults with a warning. An undetected
    /// executable path is detected and persisted when detection finds one.
    pub fn open(ctx: &Context) -> Result<Self> {
        let verbosity = ctx.verbosity();
        let config = Config::load().context("Failed to load config")?;
        if let Some(path) = config.loaded_from() {
            output::debug(format!("config: {}", path.display()), verbosity);
        }

        let paths = LauncherPaths::resolve(ctx.data_dir.as_deref(), &config)
            .context("Failed to determine data directory")?;
        output::debug(format!("data dir: {}", paths.data_dir.display()), verbosity);

        let store = AppStore::new(Box::new(JsonFileStore::new(&paths)));
        let load = store.load();
        for warning in &load.warnings {
            output::warn(warning, verbosity);
        }

        let log = LaunchLog::from_paths(&paths);
        let mut session = Self {
            config,
            paths,
            store,
            data: load.data,
            log,
            verbosity,
        };
        session.detect_executable()?;
        Ok(session)
    }

    fn detect_executable(&mut self) -> Result<()> {
        if !self.data.settings.needs_path_detection() {
            return Ok(());
        }
        let detected = detect_claude_path();
        if detected == DEFAULT_CLAUDE_PATH {
            return Ok(());
        }
        output::debug(format!("detected executable: {}", detected), self.verbosity);
        self.data.settings.claude_path = detected;
        self.save_settings()
    }

    /// Resolve a project query to its id.
    pub fn project_id(&self, query: &str) -> Result<ProjectId> {
        Ok(self.project(query)?.id.clone())
    }

    pub fn project(&self, query: &str) -> Result<&Project> {
        Ok(self.data.projects.find(query)?)
    }

    /// Persist projects, reporting any pruned overrides.
    pub fn save_projects(&mut self) -> Result<()> {
        let report = self
            .store
            .save_projects(&mut self.data.projects, &self.data.settings)
            .context("Failed to save projects")?;
        for (project, flag) in &report.pruned {
            output::print(
                format!("Dropped stale override {} from {}", flag, project),
                self.verbosity,
            );
        }
        Ok(())
    }

    pub fn save_settings(&self) -> Result<()> {
        self.store
            .save_settings(&self.data.settings)
            .context("Failed to save settings")
    }
}
