use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Key-value storage for persisted values
///
/// Each key names a single slot holding one string value.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value in a slot, `None` if the slot is empty
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a slot, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Clears a slot; clearing an empty slot is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
