//! store::traits
//!
//! Document store trait definition.
//!
//! # Design
//!
//! The `DocumentStore` trait is a small key-value interface over JSON values.
//! Keys are logical names (`"projects"`, `"settings"`); values are whole JSON
//! documents. Every `set` is durable when it returns, so there is no separate
//! save step.
//!
//! # Example
//!
//! ```ignore
//! use launchdeck::store::{DocumentStore, StoreError};
//!
//! fn project_count(store: &dyn DocumentStore) -> Result<usize, StoreError> {
//!     Ok(store
//!         .get("projects")?
//!         .and_then(|v| v.as_array().map(Vec::len))
//!         .unwrap_or(0))
//! }
//! ```

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the backing document.
    #[error("failed to read store '{path}': {message}")]
    ReadError { path: PathBuf, message: String },

    /// The backing document is not a JSON object.
    #[error("store '{path}' is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Failed to write the backing document.
    #[error("failed to write store '{path}': {message}")]
    WriteError { path: PathBuf, message: String },

    /// Failed to take the store lock.
    #[error("failed to lock store '{path}': {message}")]
    LockError { path: PathBuf, message: String },

    /// A value did not have the expected shape.
    #[error("invalid value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Trait for key-value document stores.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait DocumentStore: Send + Sync {
    /// Get a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Set a value, overwriting any existing one, and persist it.
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}
