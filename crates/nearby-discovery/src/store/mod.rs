//! Persistent key-value storage for the location cache and saved places.
//!
//! Values are opaque bytes; callers own the encoding. Writes are
//! last-write-wins per key with no cross-key transactions.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the stored bytes, or `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}
