//! flags command - Inspect and change per-project flag overrides

use anyhow::{bail, Result};

use super::session::Session;
use crate::cli::Context;
use crate::core::flags::{explain, resolve, FlagCatalog, FlagSource, FlagState};
use crate::core::settings::GlobalSettings;
use crate::ui::output;

/// Show each flag's source, override and outcome for a project.
pub fn show(ctx: &Context, query: &str, json: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    let project = session.project(query)?;
    let settings = &session.data.settings;
    let resolved = explain(settings, &project.flag_overrides);

    if json {
        let flags: Vec<serde_json::Value> = resolved
            .iter()
            .map(|flag| {
                serde_json::json!({
                    "name": flag.name,
                    "source": source_label(flag.source),
                    "default": flag.source.default_enabled(),
                    "state": flag.state.to_string(),
                    "enabled": flag.enabled,
                })
            })
            .collect();
        return Ok(output::json(&serde_json::json!({
            "project": project.name,
            "flags": flags,
            "launchFlags": resolve(settings, &project.flag_overrides),
        }))?);
    }

    let mut rows = vec![vec![
        "FLAG".to_string(),
        "SOURCE".to_string(),
        "DEFAULT".to_string(),
        "OVERRIDE".to_string(),
        "USED".to_string(),
    ]];
    rows.extend(resolved.iter().map(|flag| {
        vec![
            flag.name.clone(),
            source_label(flag.source).to_string(),
            on_off(flag.source.default_enabled()).to_string(),
            flag.state.to_string(),
            if flag.enabled { "yes" } else { "no" }.to_string(),
        ]
    }));

    let v = ctx.verbosity();
    output::print(format!("{}:", project.name), v);
    output::print(output::format_table(&rows), v);

    let launch_flags = resolve(settings, &project.flag_overrides);
    if launch_flags.is_empty() {
        output::print("Launch flags: (none)", v);
    } else {
        output::print(format!("Launch flags: {}", launch_flags.join(" ")), v);
    }
    Ok(())
}

/// Advance one flag to its next state.
pub fn cycle(ctx: &Context, query: &str, flag: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    ensure_known(&session.data.settings, flag)?;
    let id = session.project_id(query)?;

    let project = session.data.projects.get_mut(&id)?;
    let state = project.flag_overrides.cycle(flag);
    let name = project.name.clone();
    session.save_projects()?;

    output::success(format!("{}: {} -> {}", name, flag, state), ctx.verbosity());
    Ok(())
}

/// Set one flag's state directly.
pub fn set(ctx: &Context, query: &str, flag: &str, state: FlagState) -> Result<()> {
    let mut session = Session::open(ctx)?;
    ensure_known(&session.data.settings, flag)?;
    let id = session.project_id(query)?;

    let project = session.data.projects.get_mut(&id)?;
    project.flag_overrides.set(flag, state);
    let name = project.name.clone();
    session.save_projects()?;

    output::success(format!("{}: {} = {}", name, flag, state), ctx.verbosity());
    Ok(())
}

/// Remove overrides for flags that are no longer in the catalog.
pub fn prune(ctx: &Context, query: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let id = session.project_id(query)?;

    let settings = session.data.settings.clone();
    let project = session.data.projects.get_mut(&id)?;
    let removed = project.flag_overrides.prune(&settings);
    let name = project.name.clone();
    session.save_projects()?;

    let v = ctx.verbosity();
    if removed.is_empty() {
        output::print(format!("{}: nothing to prune", name), v);
    } else {
        output::success(format!("{}: removed {}", name, removed.join(", ")), v);
    }
    Ok(())
}

fn ensure_known(settings: &GlobalSettings, flag: &str) -> Result<()> {
    let catalog = FlagCatalog::from_settings(settings);
    if !catalog.contains(flag) {
        let known: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
        bail!("Unknown flag '{}'. Known flags: {}", flag, known.join(", "));
    }
    Ok(())
}

fn source_label(source: FlagSource) -> &'static str {
    match source {
        FlagSource::Global { .. } => "global",
        FlagSource::Custom => "custom",
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
