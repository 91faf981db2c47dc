//! cli
//!
//! Command-line interface layer for launchdeck.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Open the data store and config for the command
//! - Delegate to the library modules and format their results
//!
//! # Architecture
//!
//! The CLI layer is thin. Flag resolution, project bookkeeping and launching
//! live in [`crate::core`], [`crate::store`] and [`crate::launch`]; handlers
//! only wire them together and print.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Data directory override from `--data-dir`.
    pub data_dir: Option<PathBuf>,
    /// Debug output enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        data_dir: cli.data_dir.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
