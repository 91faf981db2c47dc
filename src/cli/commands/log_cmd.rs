//! log command - Inspect and relocate the launch log

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::applog::LaunchLog;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::paths::LauncherPaths;
use crate::ui::output;

fn open_log(ctx: &Context) -> Result<(Config, LauncherPaths, LaunchLog)> {
    let config = Config::load().context("Failed to load config")?;
    let paths = LauncherPaths::resolve(ctx.data_dir.as_deref(), &config)
        .context("Failed to determine data directory")?;
    let log = LaunchLog::from_paths(&paths);
    Ok((config, paths, log))
}

/// Print the log file location.
pub fn path(ctx: &Context) -> Result<()> {
    let (_, _, log) = open_log(ctx)?;
    println!("{}", log.path().display());
    Ok(())
}

/// Print the last `lines` lines, or the configured default.
pub fn show(ctx: &Context, lines: Option<usize>) -> Result<()> {
    let (config, _, log) = open_log(ctx)?;
    let text = log
        .read_tail(lines.unwrap_or_else(|| config.log_tail_lines()))
        .context("Failed to read log")?;
    println!("{}", text);
    Ok(())
}

/// Open the log folder in the file manager.
pub fn open(ctx: &Context) -> Result<()> {
    let (_, _, log) = open_log(ctx)?;
    let folder = log.open_folder().context("Failed to open log folder")?;
    output::debug(format!("opened {}", folder.display()), ctx.verbosity());
    Ok(())
}

/// Store a new log location in the config file.
pub fn set_path(ctx: &Context, requested: &Path) -> Result<()> {
    let (mut config, paths, _) = open_log(ctx)?;
    let absolute = LaunchLog::validate_relocation(&paths, requested)?;

    config.file.log_path = Some(absolute.clone());
    let written = config.save().context("Failed to write config")?;

    let v = ctx.verbosity();
    output::success(format!("Log path set to {}", absolute.display()), v);
    output::debug(format!("config written to {}", written.display()), v);
    Ok(())
}
