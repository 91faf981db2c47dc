//! launch command - Open an assistant session for a project

use anyhow::{bail, Result};

use super::session::Session;
use crate::cli::Context;
use crate::launch::command::TerminalCommand;
use crate::launch::validate::validate;
use crate::launch::{launch_project, LaunchRequest, SystemLauncher};
use crate::ui::output;

/// Launch a project, or print what would run with `dry_run`.
pub fn launch(ctx: &Context, query: &str, dry_run: bool, json: bool) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let id = session.project_id(query)?;
    let v = ctx.verbosity();

    if dry_run {
        let project = session.data.projects.get(&id)?;
        let request = LaunchRequest::for_project(&session.data.settings, project);
        let command = TerminalCommand::primary(
            &request,
            session.config.terminal(),
            session.config.fallback_shell(),
        );
        if json {
            return Ok(output::json(&serde_json::json!({
                "request": request,
                "command": command.display(),
                "valid": validate(&request).is_ok(),
            }))?);
        }
        if let Err(e) = validate(&request) {
            output::warn(format!("launch would be refused: {}", e), v);
        }
        output::print(command.display(), v);
        return Ok(());
    }

    let launcher = SystemLauncher::from_config(&session.config, session.log.clone());
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(launch_project(
        &launcher,
        &session.data.settings,
        &mut session.data.projects,
        &id,
    ))?;

    if json {
        output::json(&result)?;
    }

    if !result.success {
        bail!(
            "Launch failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    session.save_projects()?;
    if !json {
        let name = &session.data.projects.get(&id)?.name;
        output::success(format!("Launched {}", name), v);
        output::debug(&result.command, v);
    }
    Ok(())
}
