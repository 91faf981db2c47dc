//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--data-dir <path>`: Use this data directory
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output
//!
//! # Flag Arguments
//!
//! Commands that take an assistant flag as a value (`flags cycle`,
//! `settings add-flag`, ...) accept values starting with `--`. Put `--`
//! before them if clap still reads one as an option.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::flags::FlagState;
use crate::core::project::SortField;

/// Launchdeck - keep a list of projects and open an assistant session in any of them
#[derive(Parser, Debug)]
#[command(name = "launchdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store projects, settings and the launch log in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // ========== Projects ==========
    /// Register a project directory
    #[command(
        name = "add",
        after_help = "\
EXAMPLES:
    # Register the current directory, named after its folder
    launchdeck add .

    # Register with an explicit name
    launchdeck add ~/code/api --name backend"
    )]
    Add {
        /// Project directory (must exist)
        path: PathBuf,

        /// Display name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Forget a project (the directory is not touched)
    Remove {
        /// Project name, id or id prefix
        project: String,
    },

    /// Rename a project
    Rename {
        /// Project name, id or id prefix
        project: String,

        /// New display name
        name: String,
    },

    /// List projects
    #[command(
        name = "list",
        alias = "ls",
        after_help = "\
EXAMPLES:
    # Most recently launched first (default)
    launchdeck list

    # Alphabetical
    launchdeck list --sort name --asc"
    )]
    List {
        /// Field to sort by
        #[arg(long, value_enum, default_value_t = SortArg::LastLaunched)]
        sort: SortArg,

        /// Ascending order
        #[arg(long, conflicts_with = "desc")]
        asc: bool,

        /// Descending order (default)
        #[arg(long)]
        desc: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most recently launched projects
    Recent {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open an assistant session in a project
    #[command(
        name = "launch",
        long_about = "Open an assistant session in a project.\n\n\
            The session starts in a new terminal tab with the flags resolved from the \
            global settings and the project's overrides. If the terminal cannot be \
            started, the session opens in a plain shell instead.",
        after_help = "\
EXAMPLES:
    # Launch by name
    launchdeck launch site

    # Show the command without running it
    launchdeck launch site --dry-run"
    )]
    Launch {
        /// Project name, id or id prefix
        project: String,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Output the launch result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect and change a project's flag overrides
    #[command(
        name = "flags",
        long_about = "Inspect and change a project's flag overrides.\n\n\
            Every flag a project can use has one of three states: global (follow the \
            global default), on, or off. Cycling moves global -> on -> off -> global.",
        after_help = "\
EXAMPLES:
    # Show resolved flags for a project
    launchdeck flags show site

    # Cycle one flag
    launchdeck flags cycle site -- --verbose

    # Force a flag off for this project
    launchdeck flags set site -- --dangerously-skip-permissions off"
    )]
    Flags {
        #[command(subcommand)]
        action: FlagsAction,
    },

    /// Per-project options
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    // ========== Settings ==========
    /// Show or change global settings
    #[command(
        name = "settings",
        after_help = "\
EXAMPLES:
    launchdeck settings show
    launchdeck settings set terminal-profile \"Ubuntu\"
    launchdeck settings toggle -- --verbose
    launchdeck settings add-flag -- --model=opus"
    )]
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Inspect the launch log
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Check for a newer release
    Update {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash
    launchdeck completion bash > ~/.local/share/bash-completion/completions/launchdeck

    # PowerShell
    launchdeck completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flag override subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FlagsAction {
    /// Show every flag with its override and the resulting launch flags
    Show {
        /// Project name, id or id prefix
        project: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Advance a flag: global -> on -> off -> global
    Cycle {
        /// Project name, id or id prefix
        project: String,

        /// Flag, e.g. --verbose
        #[arg(allow_hyphen_values = true)]
        flag: String,
    },
    /// Set a flag's override directly
    Set {
        /// Project name, id or id prefix
        project: String,

        /// Flag, e.g. --verbose
        #[arg(allow_hyphen_values = true)]
        flag: String,

        /// New state
        #[arg(value_enum)]
        state: FlagStateArg,
    },
    /// Drop overrides for flags that no longer exist
    Prune {
        /// Project name, id or id prefix
        project: String,
    },
}

/// Project option subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectAction {
    /// Set or clear the command run before the assistant starts
    PreLaunch {
        /// Project name, id or id prefix
        project: String,

        /// Shell command; omit or pass "" to clear
        #[arg(allow_hyphen_values = true)]
        command: Option<String>,
    },
}

/// Global settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsAction {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set claude-path, terminal-profile or remote-control
    Set {
        /// Setting key
        key: String,

        /// Value to set
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Flip a built-in flag's global default
    Toggle {
        /// Flag, e.g. --verbose
        #[arg(allow_hyphen_values = true)]
        flag: String,
    },
    /// Add a custom flag, on by default
    AddFlag {
        /// Flag, e.g. --model=opus
        #[arg(allow_hyphen_values = true)]
        flag: String,
    },
    /// Remove a custom flag
    RemoveFlag {
        /// Flag to remove
        #[arg(allow_hyphen_values = true)]
        flag: String,
    },
    /// Look for the assistant executable in its usual install locations
    Detect,
}

/// Launch log subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LogAction {
    /// Print the log file location
    Path,
    /// Print the last lines of the log
    Show {
        /// Number of lines
        #[arg(short = 'n', long)]
        lines: Option<usize>,
    },
    /// Open the log folder in the file manager
    Open,
    /// Move the log to another file inside the data directory
    SetPath {
        /// New log file, absolute or relative to the data directory
        path: PathBuf,
    },
}

/// Project list sort field
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    /// Display name
    Name,
    /// Last launch time
    LastLaunched,
    /// Registration time
    Created,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortField::Name,
            SortArg::LastLaunched => SortField::LastLaunchedAt,
            SortArg::Created => SortField::CreatedAt,
        }
    }
}

/// Flag override state
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStateArg {
    /// Follow the global default
    Global,
    /// Always pass the flag
    On,
    /// Never pass the flag
    Off,
}

impl From<FlagStateArg> for FlagState {
    fn from(arg: FlagStateArg) -> Self {
        match arg {
            FlagStateArg::Global => FlagState::Global,
            FlagStateArg::On => FlagState::On,
            FlagStateArg::Off => FlagState::Off,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}
