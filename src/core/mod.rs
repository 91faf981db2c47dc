//! core
//!
//! Core domain types, schemas, and logic for launchdeck.
//!
//! # Modules
//!
//! - [`types`] - Strong types: FlagName, ProjectId, UtcTimestamp
//! - [`flags`] - Flag catalog, tri-state overrides and resolution
//! - [`settings`] - Global settings and their mutations
//! - [`project`] - Projects, the project list, sorting and recents
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for launcher storage
//!
//! # Design Principles
//!
//! - Nothing here performs process or network I/O
//! - Persisted shapes are serde types with camelCase field names
//! - Resolution is deterministic: same settings and overrides, same flags

pub mod config;
pub mod flags;
pub mod paths;
pub mod project;
pub mod settings;
pub mod types;
