//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! All console output goes through this module so `--quiet` and `--debug`
//! behave the same in every command.

pub mod output;
