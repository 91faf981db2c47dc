//! Launchdeck - a project launcher for the Claude CLI
//!
//! Launchdeck keeps a list of project directories and opens an assistant
//! session in any of them, in a new terminal tab, with a set of command-line
//! flags resolved from global defaults and per-project overrides.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, wires modules together)
//! - [`core`] - Domain types, flag resolution, settings, projects, config
//! - [`store`] - Persistent key-value document and the typed app facade
//! - [`launch`] - Request validation, command construction, process spawning
//! - [`applog`] - The launch log file
//! - [`update`] - Release check against a remote endpoint
//! - [`ui`] - Console output
//!
//! # Flag Resolution
//!
//! Every launch computes its flags with [`core::flags::resolve`]: built-in
//! flags in catalog order, then custom flags in the order they were added,
//! each included if the project's override says so, or, with no override,
//! if its global default does. Custom flags default to on.

pub mod applog;
pub mod cli;
pub mod core;
pub mod launch;
pub mod store;
pub mod ui;
pub mod update;
