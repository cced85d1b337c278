mod memory_store;
mod persistence;
mod sqlite_store;

pub use memory_store::MemoryStore;
pub use persistence::{Persistence, AREAS_KEY, BIS_KEY, SAVES_KEY};
pub use sqlite_store::SqliteStore;

use crate::error::Result;

/// Flat string key-value storage holding serialized blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Write several entries. Backends that can should make this atomic.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
