//! Project list commands: add, remove, rename, list, recent, pre-launch

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use super::session::Session;
use crate::cli::args::SortArg;
use crate::cli::Context;
use crate::core::project::{Project, SortConfig, SortDirection};
use crate::ui::output;

/// Register a project directory.
pub fn add(ctx: &Context, path: &Path, name: Option<&str>) -> Result<()> {
    let absolute = absolute_path(path)?;
    if !absolute.is_dir() {
        bail!("Not a directory: {}", absolute.display());
    }
    let path_str = absolute.to_string_lossy().into_owned();
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| Project::name_from_path(&path_str));

    let mut session = Session::open(ctx)?;
    let id = session.data.projects.add(&name, &path_str)?.id.clone();
    session.save_projects()?;
    session.log.info(&format!("Project added: {} ({})", name, path_str));

    output::success(format!("Added {} ({})", name, id.short()), ctx.verbosity());
    Ok(())
}

/// Forget a project.
pub fn remove(ctx: &Context, query: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let id = session.project_id(query)?;
    let removed = session.data.projects.remove(&id)?;
    session.save_projects()?;

    output::success(format!("Removed {}", removed.name), ctx.verbosity());
    Ok(())
}

pub fn rename(ctx: &Context, query: &str, name: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let id = session.project_id(query)?;
    let old = session.project(query)?.name.clone();
    session.data.projects.rename(&id, name)?;
    session.save_projects()?;

    output::success(format!("Renamed {} to {}", old, name.trim()), ctx.verbosity());
    Ok(())
}

/// List projects in the requested order.
pub fn list(ctx: &Context, sort: SortArg, asc: bool, json: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    let config = SortConfig {
        field: sort.into(),
        direction: if asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    };
    let projects = session.data.projects.sorted(config);

    if json {
        output::json(&projects)?;
    } else if projects.is_empty() {
        output::print(
            "No projects yet. Add one with 'launchdeck add <path>'.",
            ctx.verbosity(),
        );
    } else {
        output::print(table(&projects), ctx.verbosity());
    }
    Ok(())
}

/// Show the most recently launched projects.
pub fn recent(ctx: &Context, json: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    let projects = session.data.projects.recent();

    if json {
        output::json(&projects)?;
    } else if projects.is_empty() {
        output::print("No launches yet.", ctx.verbosity());
    } else {
        output::print(table(&projects), ctx.verbosity());
    }
    Ok(())
}

/// Set or clear a project's pre-launch command.
pub fn pre_launch(ctx: &Context, query: &str, command: Option<&str>) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let id = session.project_id(query)?;
    let project = session.project(query)?;
    let overrides = project.flag_overrides.clone();
    let name = project.name.clone();

    session
        .data
        .projects
        .update_settings(&id, overrides, command.unwrap_or(""))?;
    session.save_projects()?;

    let message = match &session.data.projects.get(&id)?.pre_launch_command {
        Some(cmd) => format!("{}: pre-launch set to '{}'", name, cmd),
        None => format!("{}: pre-launch cleared", name),
    };
    output::success(message, ctx.verbosity());
    Ok(())
}

fn table(projects: &[&Project]) -> String {
    let mut rows = vec![vec![
        "ID".to_string(),
        "NAME".to_string(),
        "LAST LAUNCHED".to_string(),
        "PATH".to_string(),
    ]];
    rows.extend(projects.iter().map(|p| {
        vec![
            p.id.short().to_string(),
            p.name.clone(),
            p.last_launched_at
                .as_ref()
                .map(|t| t.display_local())
                .unwrap_or_else(|| "never".to_string()),
            p.path.clone(),
        ]
    }));
    output::format_table(&rows)
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to read current directory")?
            .join(path)
    };

    // Lexical cleanup of "." and ".."; canonicalize would add a verbatim
    // prefix on Windows that terminals reject.
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}
