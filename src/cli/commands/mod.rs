//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens a [`session::Session`] (config, paths, data store)
//! 2. Calls into the library to do the work
//! 3. Persists what changed and formats the result
//!
//! # Async Commands
//!
//! `launch` and `update` are async underneath (process probing and HTTP).
//! Their handlers create a tokio runtime and block on it so the rest of the
//! CLI stays synchronous.

mod completion;
mod flags_cmd;
mod launch_cmd;
mod log_cmd;
mod projects;
mod session;
mod settings_cmd;
mod update_cmd;

// Re-export command functions for testing and direct invocation
pub use completion::{completion, write_completion};
pub use launch_cmd::launch;
pub use projects::{add, list, pre_launch, recent, remove, rename};
pub use session::Session;
pub use update_cmd::update;

use crate::cli::args::{Command, FlagsAction, LogAction, ProjectAction, SettingsAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        // Projects
        Command::Add { path, name } => projects::add(ctx, &path, name.as_deref()),
        Command::Remove { project } => projects::remove(ctx, &project),
        Command::Rename { project, name } => projects::rename(ctx, &project, &name),
        Command::List {
            sort,
            asc,
            desc: _,
            json,
        } => projects::list(ctx, sort, asc, json),
        Command::Recent { json } => projects::recent(ctx, json),
        Command::Launch {
            project,
            dry_run,
            json,
        } => launch_cmd::launch(ctx, &project, dry_run, json),
        Command::Flags { action } => match action {
            FlagsAction::Show { project, json } => flags_cmd::show(ctx, &project, json),
            FlagsAction::Cycle { project, flag } => flags_cmd::cycle(ctx, &project, &flag),
            FlagsAction::Set {
                project,
                flag,
                state,
            } => flags_cmd::set(ctx, &project, &flag, state.into()),
            FlagsAction::Prune { project } => flags_cmd::prune(ctx, &project),
        },
        Command::Project { action } => match action {
            ProjectAction::PreLaunch { project, command } => {
                projects::pre_launch(ctx, &project, command.as_deref())
            }
        },

        // Settings
        Command::Settings { action } => match action {
            SettingsAction::Show { json } => settings_cmd::show(ctx, json),
            SettingsAction::Set { key, value } => settings_cmd::set(ctx, &key, &value),
            SettingsAction::Toggle { flag } => settings_cmd::toggle(ctx, &flag),
            SettingsAction::AddFlag { flag } => settings_cmd::add_flag(ctx, &flag),
            SettingsAction::RemoveFlag { flag } => settings_cmd::remove_flag(ctx, &flag),
            SettingsAction::Detect => settings_cmd::detect(ctx),
        },

        // Log and maintenance
        Command::Log { action } => match action {
            LogAction::Path => log_cmd::path(ctx),
            LogAction::Show { lines } => log_cmd::show(ctx, lines),
            LogAction::Open => log_cmd::open(ctx),
            LogAction::SetPath { path } => log_cmd::set_path(ctx, &path),
        },
        Command::Update { json } => update_cmd::update(ctx, json),
        Command::Completion { shell } => completion::completion(shell),
    }
}
