use crate::{
    error::{FlowboardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

/// In-process storage, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    slots: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, as a full storage quota would
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    /// Returns the raw slot value without going through the async interface
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().slots.get(key).cloned()
    }

    /// Seeds a slot directly
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.inner.lock().slots.insert(key.to_string(), value.into());
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(FlowboardError::StorageError(format!(
                "quota exceeded writing {}",
                key
            )));
        }
        inner.slots.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.lock().slots.remove(key);
        Ok(())
    }
}
