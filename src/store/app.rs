//! store::app
//!
//! Typed access to projects and settings on top of a [`DocumentStore`].
//!
//! # Fallbacks
//!
//! Reading never fails outright. A missing key yields the default value; an
//! unreadable or malformed document yields defaults plus a warning so the
//! caller can tell the user without refusing to start. Projects are read
//! record by record: a malformed record is skipped with a warning and the
//! rest load normally.
//!
//! # Pruning
//!
//! Saving projects removes override keys that name neither a global nor a
//! custom flag. Such keys cannot affect a launch, and leaving them would let
//! stale entries pile up after custom flags are removed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::traits::{DocumentStore, StoreError};
use crate::core::project::{Project, ProjectList};
use crate::core::settings::GlobalSettings;

/// Store key holding the project array.
pub const PROJECTS_KEY: &str = "projects";

/// Store key holding the settings object.
pub const SETTINGS_KEY: &str = "settings";

/// Everything the launcher persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppData {
    pub projects: ProjectList,
    pub settings: GlobalSettings,
}

/// Result of loading app data.
#[derive(Debug)]
pub struct AppDataLoad {
    pub data: AppData,
    /// Problems that forced a fallback to defaults.
    pub warnings: Vec<String>,
}

/// Outcome of saving projects.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// `(project name, removed override key)` pairs.
    pub pruned: Vec<(String, String)>,
}

/// Typed facade over a document store.
pub struct AppStore {
    store: Box<dyn DocumentStore>,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore").finish_non_exhaustive()
    }
}

impl AppStore {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load projects and settings, falling back to defaults on any problem.
    pub fn load(&self) -> AppDataLoad {
        let mut warnings = Vec::new();

        let projects = self.read_projects(&mut warnings);

        let mut settings = self
            .read::<GlobalSettings>(SETTINGS_KEY)
            .unwrap_or_else(|e| {
                warnings.push(format!("using default settings: {}", e));
                None
            })
            .unwrap_or_default();
        settings.ensure_builtin_flags();

        AppDataLoad {
            data: AppData {
                projects: ProjectList::new(projects),
                settings,
            },
            warnings,
        }
    }

    /// Persist the project list, pruning overrides against `settings` first.
    pub fn save_projects(
        &self,
        projects: &mut ProjectList,
        settings: &GlobalSettings,
    ) -> Result<SaveReport, StoreError> {
        let mut report = SaveReport::default();
        for project in projects.iter_mut() {
            for key in project.flag_overrides.prune(settings) {
                report.pruned.push((project.name.clone(), key));
            }
        }
        self.write(PROJECTS_KEY, projects.as_slice())?;
        Ok(report)
    }

    /// Persist settings.
    pub fn save_settings(&self, settings: &GlobalSettings) -> Result<(), StoreError> {
        self.write(SETTINGS_KEY, settings)
    }

    fn read_projects(&self, warnings: &mut Vec<String>) -> Vec<Project> {
        let items = match self.store.get(PROJECTS_KEY) {
            Ok(None) | Ok(Some(Value::Null)) => return Vec::new(),
            Ok(Some(Value::Array(items))) => items,
            Ok(Some(_)) => {
                let e = StoreError::InvalidValue {
                    key: PROJECTS_KEY.to_string(),
                    message: "expected an array".to_string(),
                };
                warnings.push(format!("using empty project list: {}", e));
                return Vec::new();
            }
            Err(e) => {
                warnings.push(format!("using empty project list: {}", e));
                return Vec::new();
            }
        };

        let mut projects = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let label = item
                .get("name")
                .and_then(Value::as_str)
                .map(|name| format!("'{}'", name))
                .unwrap_or_else(|| format!("#{}", index + 1));
            match serde_json::from_value::<Project>(item) {
                Ok(project) => projects.push(project),
                Err(e) => warnings.push(format!("skipping project {}: {}", label, e)),
            }
        }
        projects
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StoreError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|e| StoreError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(key, value)
    }
}
