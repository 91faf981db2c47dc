//! store
//!
//! Persistent storage for projects and settings.
//!
//! # Architecture
//!
//! Data goes through the [`DocumentStore`] trait, a key-value interface over
//! JSON documents, with two implementations:
//!
//! - [`JsonFileStore`]: one JSON file in the data directory (default)
//! - [`MemoryStore`]: in-process map for tests
//!
//! [`AppStore`] sits on top and provides typed, defaulted access to the
//! `"projects"` and `"settings"` keys. Commands receive an `AppStore` rather
//! than reaching for a global, so tests can inject a memory store.
//!
//! # Example
//!
//! ```no_run
//! use launchdeck::core::paths::LauncherPaths;
//! use launchdeck::store::{AppStore, JsonFileStore};
//! use std::path::PathBuf;
//!
//! let paths = LauncherPaths::new(PathBuf::from("/tmp/launchdeck"));
//! let store = AppStore::new(Box::new(JsonFileStore::new(&paths)));
//! let load = store.load();
//! println!("{} projects", load.data.projects.len());
//! ```

mod app;
mod file_store;
mod lock;
mod memory;
mod traits;

pub use app::{AppData, AppDataLoad, AppStore, SaveReport, PROJECTS_KEY, SETTINGS_KEY};
pub use file_store::JsonFileStore;
pub use lock::{StoreLock, DEFAULT_LOCK_TIMEOUT};
pub use memory::MemoryStore;
pub use traits::{DocumentStore, StoreError};
