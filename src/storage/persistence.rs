//! Serialization of the working set and the saves list into a key-value store.

use serde::de::DeserializeOwned;

use super::KeyValueStore;
use crate::entity::{Area, BiItem, SaveData, WorkingSet};
use crate::error::Result;

pub const BIS_KEY: &str = "bis";
pub const AREAS_KEY: &str = "areas";
pub const SAVES_KEY: &str = "saves";

pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Write both collections. Each is stored as a JSON array under its key.
    pub fn save_snapshot(&mut self, bis: &[BiItem], areas: &[Area]) -> Result<()> {
        let entries = [
            (BIS_KEY, serde_json::to_string(bis)?),
            (AREAS_KEY, serde_json::to_string(areas)?),
        ];
        self.store.set_many(&entries)?;
        tracing::debug!(bis = bis.len(), areas = areas.len(), "saved working set");
        Ok(())
    }

    /// Read both collections. A missing, unreadable or corrupt entry yields
    /// an empty list.
    pub fn load_snapshot(&self) -> WorkingSet {
        let bis: Vec<BiItem> = self.read_list(BIS_KEY);
        let areas: Vec<Area> = self.read_list(AREAS_KEY);
        tracing::debug!(bis = bis.len(), areas = areas.len(), "loaded working set");
        WorkingSet { bis, areas }
    }

    pub fn save_saves(&mut self, saves: &[SaveData]) -> Result<()> {
        self.store.set(SAVES_KEY, &serde_json::to_string(saves)?)?;
        tracing::debug!(saves = saves.len(), "saved snapshots list");
        Ok(())
    }

    pub fn load_saves(&self) -> Vec<SaveData> {
        self.read_list(SAVES_KEY)
    }

    /// Remove every persisted entry.
    pub fn clear(&mut self) -> Result<()> {
        for key in [BIS_KEY, AREAS_KEY, SAVES_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "store unavailable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt entry ignored");
                Vec::new()
            }
        }
    }
}
