//! settings command - Show and change global settings

use anyhow::Result;

use super::session::Session;
use crate::cli::Context;
use crate::core::flags;
use crate::core::settings::DEFAULT_CLAUDE_PATH;
use crate::launch::detect_claude_path;
use crate::ui::output;

/// Show current settings.
pub fn show(ctx: &Context, json: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    let settings = &session.data.settings;

    if json {
        return Ok(output::json(settings)?);
    }

    let v = ctx.verbosity();
    output::print(format!("claude-path:      {}", settings.claude_path), v);
    output::print(format!("terminal-profile: {}", settings.terminal_profile), v);
    output::print(format!("remote-control:   {}", settings.remote_control), v);
    output::print("global flags:", v);
    for gf in &settings.global_flags {
        let label = flags::definition(&gf.flag_name)
            .map(|def| format!(" ({})", def.label))
            .unwrap_or_default();
        output::print(
            format!(
                "  [{}] {}{}",
                if gf.enabled { "x" } else { " " },
                gf.flag_name,
                label
            ),
            v,
        );
    }
    if settings.custom_flags.is_empty() {
        output::print("custom flags:     (none)", v);
    } else {
        output::print("custom flags:", v);
        output::print(output::format_list(&settings.custom_flags, "  "), v);
    }
    Ok(())
}

/// Set a scalar setting.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    session.data.settings.set_value(key, value)?;
    session.save_settings()?;

    output::success(format!("Set {} = {}", key, value.trim()), ctx.verbosity());
    Ok(())
}

/// Flip a built-in flag's global default.
pub fn toggle(ctx: &Context, flag: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let enabled = session.data.settings.toggle_global_flag(flag)?;
    session.save_settings()?;

    output::success(
        format!("{} is now {} by default", flag, if enabled { "on" } else { "off" }),
        ctx.verbosity(),
    );
    Ok(())
}

pub fn add_flag(ctx: &Context, flag: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    if session.data.settings.add_custom_flag(flag)? {
        session.save_settings()?;
        output::success(format!("Added custom flag {}", flag.trim()), ctx.verbosity());
    } else {
        output::warn(format!("{} is already a custom flag", flag.trim()), ctx.verbosity());
    }
    Ok(())
}

/// Remove a custom flag and drop project overrides that referenced it.
pub fn remove_flag(ctx: &Context, flag: &str) -> Result<()> {
    let mut session = Session::open(ctx)?;
    session.data.settings.remove_custom_flag(flag)?;
    session.save_settings()?;
    session.save_projects()?;

    output::success(format!("Removed custom flag {}", flag), ctx.verbosity());
    Ok(())
}

/// Look for the executable and store it if found.
pub fn detect(ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let detected = detect_claude_path();
    let v = ctx.verbosity();

    if detected == DEFAULT_CLAUDE_PATH {
        output::print(
            format!(
                "No install found; using '{}' from PATH",
                session.data.settings.claude_path
            ),
            v,
        );
        return Ok(());
    }

    if session.data.settings.claude_path != detected {
        session.data.settings.claude_path = detected.clone();
        session.save_settings()?;
    }
    output::success(format!("claude-path: {}", detected), v);
    Ok(())
}
