//! core::project
//!
//! Projects and the in-memory project list.
//!
//! A project is a working directory the assistant can be launched in, along
//! with its flag overrides and an optional pre-launch shell command. The
//! [`ProjectList`] owns every mutation so callers persist one value after each
//! change.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::flags::FlagOverrides;
use super::types::{ProjectId, UtcTimestamp};

/// Number of projects shown on the recents shelf.
pub const RECENT_LIMIT: usize = 3;

/// Errors from project list operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("no project matches '{0}'")]
    NotFound(String),

    #[error("'{query}' matches more than one project: {candidates}")]
    Ambiguous { query: String, candidates: String },

    #[error("project name cannot be empty")]
    EmptyName,

    #[error("project name or id is empty")]
    EmptyQuery,

    #[error("a project for '{0}' already exists")]
    DuplicatePath(String),
}

/// A launchable project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub flag_overrides: FlagOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_launch_command: Option<String>,
    pub created_at: UtcTimestamp,
    #[serde(default)]
    pub last_launched_at: Option<UtcTimestamp>,
}

impl Project {
    /// Create a new project with a fresh id and no overrides.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            path: path.into(),
            flag_overrides: FlagOverrides::new(),
            pre_launch_command: None,
            created_at: UtcTimestamp::now(),
            last_launched_at: None,
        }
    }

    /// Default display name for a path: its final component.
    pub fn name_from_path(path: &str) -> String {
        // Split on both separators so Windows paths name correctly everywhere.
        path.trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| path.to_string())
    }
}

/// Field to sort the project list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    #[default]
    LastLaunchedAt,
    CreatedAt,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "last-launched" | "lastLaunchedAt" => Ok(SortField::LastLaunchedAt),
            "created" | "createdAt" => Ok(SortField::CreatedAt),
            other => Err(format!(
                "invalid sort field '{}', must be one of: name, last-launched, created",
                other
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// How to order the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortConfig {
    fn compare(&self, a: &Project, b: &Project) -> Ordering {
        // Missing launch times compare as the empty string: before any time.
        let ord = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::LastLaunchedAt => a.last_launched_at.cmp(&b.last_launched_at),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortField::Name => "name",
            SortField::LastLaunchedAt => "last-launched",
            SortField::CreatedAt => "created",
        };
        f.write_str(s)
    }
}

/// The ordered collection of projects, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectList {
    projects: Vec<Project>,
}

impl ProjectList {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn into_vec(self) -> Vec<Project> {
        self.projects
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Add a project. The path must not already be registered.
    pub fn add(&mut self, name: &str, path: &str) -> Result<&Project, ProjectError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }
        if self.projects.iter().any(|p| p.path == path) {
            return Err(ProjectError::DuplicatePath(path.to_string()));
        }
        self.projects.push(Project::new(name, path));
        Ok(&self.projects[self.projects.len() - 1])
    }

    /// Remove a project, returning it.
    pub fn remove(&mut self, id: &ProjectId) -> Result<Project, ProjectError> {
        let idx = self.index_of(id)?;
        Ok(self.projects.remove(idx))
    }

    pub fn rename(&mut self, id: &ProjectId, name: &str) -> Result<(), ProjectError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Record a launch now.
    pub fn touch(&mut self, id: &ProjectId) -> Result<(), ProjectError> {
        self.get_mut(id)?.last_launched_at = Some(UtcTimestamp::now());
        Ok(())
    }

    /// Replace a project's overrides and pre-launch command.
    ///
    /// An empty command clears it.
    pub fn update_settings(
        &mut self,
        id: &ProjectId,
        overrides: FlagOverrides,
        pre_launch_command: &str,
    ) -> Result<(), ProjectError> {
        let project = self.get_mut(id)?;
        project.flag_overrides = overrides;
        let trimmed = pre_launch_command.trim();
        project.pre_launch_command = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(())
    }

    pub fn get(&self, id: &ProjectId) -> Result<&Project, ProjectError> {
        self.projects
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &ProjectId) -> Result<&mut Project, ProjectError> {
        self.projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }

    fn index_of(&self, id: &ProjectId) -> Result<usize, ProjectError> {
        self.projects
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }

    /// Find a project by exact id, exact name, or unique id prefix.
    pub fn find(&self, query: &str) -> Result<&Project, ProjectError> {
        if query.trim().is_empty() {
            return Err(ProjectError::EmptyQuery);
        }
        if let Some(p) = self.projects.iter().find(|p| p.id.as_str() == query) {
            return Ok(p);
        }

        let by_name: Vec<&Project> = self.projects.iter().filter(|p| p.name == query).collect();
        match by_name.len() {
            1 => return Ok(by_name[0]),
            0 => {}
            _ => return Err(ambiguous(query, &by_name)),
        }

        let by_prefix: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| p.id.as_str().starts_with(query))
            .collect();
        match by_prefix.len() {
            1 => Ok(by_prefix[0]),
            0 => Err(ProjectError::NotFound(query.to_string())),
            _ => Err(ambiguous(query, &by_prefix)),
        }
    }

    /// Projects ordered by `sort`. Ties keep insertion order.
    pub fn sorted(&self, sort: SortConfig) -> Vec<&Project> {
        let mut out: Vec<&Project> = self.projects.iter().collect();
        out.sort_by(|a, b| sort.compare(a, b));
        out
    }

    /// Most recently launched projects, newest first, at most [`RECENT_LIMIT`].
    pub fn recent(&self) -> Vec<&Project> {
        let mut launched: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| p.last_launched_at.is_some())
            .collect();
        launched.sort_by(|a, b| b.last_launched_at.cmp(&a.last_launched_at));
        launched.truncate(RECENT_LIMIT);
        launched
    }

    /// Iterate mutably, e.g. to prune every project's overrides.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Project> {
        self.projects.iter_mut()
    }
}

fn ambiguous(query: &str, matches: &[&Project]) -> ProjectError {
    ProjectError::Ambiguous {
        query: query.to_string(),
        candidates: matches
            .iter()
            .map(|p| format!("{} ({})", p.name, p.id.short()))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flags::FlagState;

    fn at(rfc3339: &str) -> UtcTimestamp {
        UtcTimestamp::from_datetime(
            chrono::DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&chrono::Utc),
        )
    }

    fn list_with(names: &[&str]) -> ProjectList {
        let mut list = ProjectList::default();
        for name in names {
            list.add(name, &format!("/work/{}", name)).unwrap();
        }
        list
    }

    #[test]
    fn add_creates_fresh_project() {
        let mut list = ProjectList::default();
        let project = list.add("api", "/work/api").unwrap().clone();
        assert_eq!(project.name, "api");
        assert_eq!(project.path, "/work/api");
        assert!(project.flag_overrides.is_empty());
        assert!(project.last_launched_at.is_none());
        assert!(project.pre_launch_command.is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn add_rejects_duplicates_and_empty_names() {
        let mut list = list_with(&["api"]);
        assert_eq!(
            list.add("other", "/work/api").unwrap_err(),
            ProjectError::DuplicatePath("/work/api".to_string())
        );
        assert_eq!(list.add("  ", "/x").unwrap_err(), ProjectError::EmptyName);
    }

    #[test]
    fn remove_and_rename() {
        let mut list = list_with(&["a", "b"]);
        let a = list.find("a").unwrap().id.clone();
        let b = list.find("b").unwrap().id.clone();

        list.rename(&b, "bee").unwrap();
        assert_eq!(list.get(&b).unwrap().name, "bee");

        let removed = list.remove(&a).unwrap();
        assert_eq!(removed.name, "a");
        assert!(list.get(&a).is_err());
        assert!(list.remove(&a).is_err());
    }

    #[test]
    fn update_settings_clears_empty_command() {
        let mut list = list_with(&["a"]);
        let id = list.find("a").unwrap().id.clone();

        let mut overrides = FlagOverrides::new();
        overrides.set("--verbose", FlagState::On);
        list.update_settings(&id, overrides.clone(), "nvm use 20")
            .unwrap();
        let p = list.get(&id).unwrap();
        assert_eq!(p.flag_overrides, overrides);
        assert_eq!(p.pre_launch_command.as_deref(), Some("nvm use 20"));

        list.update_settings(&id, FlagOverrides::new(), "   ").unwrap();
        assert!(list.get(&id).unwrap().pre_launch_command.is_none());
    }

    #[test]
    fn find_by_prefix_and_ambiguity() {
        let mut list = ProjectList::new(vec![
            Project {
                id: ProjectId::new("abc111").unwrap(),
                ..Project::new("one", "/1")
            },
            Project {
                id: ProjectId::new("abc222").unwrap(),
                ..Project::new("two", "/2")
            },
        ]);
        assert_eq!(list.find("abc1").unwrap().name, "one");
        assert!(matches!(
            list.find("abc"),
            Err(ProjectError::Ambiguous { .. })
        ));
        assert!(matches!(list.find("zzz"), Err(ProjectError::NotFound(_))));

        list.rename(&ProjectId::new("abc222").unwrap(), "one").unwrap();
        assert!(matches!(
            list.find("one"),
            Err(ProjectError::Ambiguous { .. })
        ));
    }

    #[test]
    fn blank_query_matches_nothing() {
        let list = list_with(&["only"]);
        assert_eq!(list.find("").unwrap_err(), ProjectError::EmptyQuery);
        assert_eq!(list.find("   ").unwrap_err(), ProjectError::EmptyQuery);
        assert_eq!(list.find("only").unwrap().name, "only");
    }

    #[test]
    fn sort_by_last_launched_puts_unlaunched_last_when_desc() {
        let mut list = list_with(&["never", "old", "new"]);
        list.iter_mut().for_each(|p| match p.name.as_str() {
            "old" => p.last_launched_at = Some(at("2024-01-01T00:00:00Z")),
            "new" => p.last_launched_at = Some(at("2024-06-01T00:00:00Z")),
            _ => {}
        });

        let names: Vec<_> = list
            .sorted(SortConfig::default())
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["new", "old", "never"]);

        let asc = SortConfig {
            field: SortField::LastLaunchedAt,
            direction: SortDirection::Asc,
        };
        let names: Vec<_> = list.sorted(asc).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["never", "old", "new"]);
    }

    #[test]
    fn sort_by_name() {
        let list = list_with(&["charlie", "alpha", "bravo"]);
        let sort = SortConfig {
            field: SortField::Name,
            direction: SortDirection::Asc,
        };
        let names: Vec<_> = list.sorted(sort).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn recent_is_newest_three() {
        let mut list = list_with(&["a", "b", "c", "d", "e"]);
        let times = [
            ("a", "2024-01-01T00:00:00Z"),
            ("b", "2024-01-05T00:00:00Z"),
            ("c", "2024-01-03T00:00:00Z"),
            ("d", "2024-01-04T00:00:00Z"),
        ];
        list.iter_mut().for_each(|p| {
            if let Some((_, t)) = times.iter().find(|(n, _)| *n == p.name) {
                p.last_launched_at = Some(at(t));
            }
        });

        let names: Vec<_> = list.recent().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "c"]);
    }

    #[test]
    fn recent_empty_when_nothing_launched() {
        let list = list_with(&["a"]);
        assert!(list.recent().is_empty());
    }

    #[test]
    fn name_from_path() {
        assert_eq!(Project::name_from_path("/work/my-app"), "my-app");
        assert_eq!(Project::name_from_path("/work/my-app/"), "my-app");
        assert_eq!(Project::name_from_path("C:\\code\\site"), "site");
    }

    #[test]
    fn persisted_form_round_trips_original_shape() {
        let json = r#"{
            "id": "7d1c",
            "name": "site",
            "path": "C:\\code\\site",
            "flagOverrides": {"--verbose": true, "--gone": null},
            "createdAt": "2024-02-01T10:00:00Z",
            "lastLaunchedAt": null
        }"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "7d1c");
        assert_eq!(p.flag_overrides.get("--verbose"), FlagState::On);
        assert_eq!(p.flag_overrides.len(), 1);
        assert!(p.pre_launch_command.is_none());
        assert!(p.last_launched_at.is_none());
    }
}
