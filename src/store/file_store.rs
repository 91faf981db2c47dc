//! store::file_store
//!
//! JSON-file document store.
//!
//! # Format
//!
//! The document is a single pretty-printed JSON object whose top-level keys
//! are the store keys:
//!
//! ```json
//! {
//!   "projects": [ ... ],
//!   "settings": { ... }
//! }
//! ```
//!
//! # Durability
//!
//! - Writes are atomic (write to temp file, sync, rename)
//! - `set` and `delete` hold an exclusive [`StoreLock`] across the
//!   read-modify-write so concurrent launcher processes do not drop each
//!   other's keys

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Map, Value};

use super::lock::{StoreLock, DEFAULT_LOCK_TIMEOUT};
use super::traits::{DocumentStore, StoreError};
use crate::core::paths::LauncherPaths;

/// Document store backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock_timeout: Duration,
}

impl JsonFileStore {
    /// Create a store at the standard location under the data directory.
    pub fn new(paths: &LauncherPaths) -> Self {
        Self {
            path: paths.store_path(),
            lock_path: paths.store_lock_path(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Create a store at a custom path.
    ///
    /// The lock file sits next to it with a `.lock` suffix.
    pub fn with_path(path: PathBuf) -> Self {
        let mut lock_name = path.as_os_str().to_owned();
        lock_name.push(".lock");
        Self {
            lock_path: PathBuf::from(lock_name),
            path,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document. A missing or empty file is an empty document.
    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    /// Write the whole document atomically.
    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        let write_err = |message: String| StoreError::WriteError {
            path: self.path.clone(),
            message,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| write_err(format!("cannot create directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| write_err(format!("cannot serialize: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| write_err(format!("cannot create temp file: {}", e)))?;

            file.write_all(content.as_bytes())
                .map_err(|e| write_err(format!("cannot write: {}", e)))?;

            file.sync_all()
                .map_err(|e| write_err(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| write_err(format!("cannot rename temp file: {}", e)))?;

        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Map<String, Value>)) -> Result<(), StoreError> {
        let _lock = StoreLock::acquire(&self.lock_path, self.lock_timeout)?;
        let mut document = self.read_document()?;
        f(&mut document);
        self.write_document(&document)
    }
}

impl DocumentStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.modify(|doc| {
            doc.insert(key.to_string(), value);
        })
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.modify(|doc| {
            doc.remove(key);
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
