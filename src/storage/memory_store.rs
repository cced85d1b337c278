use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::Result;

/// In-process store, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get("bis").unwrap().is_none());

        store.set("bis", "[]").unwrap();
        assert_eq!(store.get("bis").unwrap(), Some("[]".to_string()));
        assert_eq!(store.len(), 1);

        store.remove("bis").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_many() {
        let mut store = MemoryStore::new();
        store
            .set_many(&[("bis", "[]".to_string()), ("areas", "[]".to_string())])
            .unwrap();
        assert_eq!(store.len(), 2);
    }
}
