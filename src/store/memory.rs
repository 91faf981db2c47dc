//! store::memory
//!
//! In-memory document store for tests and dry runs.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::traits::{DocumentStore, StoreError};

/// Document store that keeps everything in a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads always fail, for exercising fallback paths.
    pub fn failing() -> Self {
        Self {
            values: Mutex::default(),
            fail_reads: true,
        }
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned map is still a valid map.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::ReadError {
                path: "<memory>".into(),
                message: "reads disabled".into(),
            });
        }
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.values().remove(key);
        Ok(())
    }
}
