//! The collection of named snapshots.

use crate::entity::validate::normalize_name;
use crate::entity::{SaveData, WorkingSet};
use crate::error::{BidashError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveBook {
    saves: Vec<SaveData>,
}

impl SaveBook {
    pub fn new(saves: Vec<SaveData>) -> Self {
        Self { saves }
    }

    pub fn list(&self) -> &[SaveData] {
        &self.saves
    }

    pub fn len(&self) -> usize {
        self.saves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.is_empty()
    }

    /// Snapshot the working set under a new name.
    pub fn create(
        &mut self,
        name: &str,
        description: Option<String>,
        set: &WorkingSet,
    ) -> Result<&SaveData> {
        let name = normalize_name("Save name", name)?;
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let save = SaveData::capture(name, description, &set.bis, &set.areas);
        tracing::debug!(id = save.id(), bis = save.bis().len(), "created save");
        self.saves.push(save);
        let index = self.saves.len() - 1;
        Ok(&self.saves[index])
    }

    /// Find a save by id, falling back to an exact name match.
    pub fn get(&self, reference: &str) -> Result<&SaveData> {
        self.position(reference)
            .map(|index| &self.saves[index])
            .ok_or_else(|| BidashError::not_found("Save", reference))
    }

    pub fn delete(&mut self, reference: &str) -> Result<SaveData> {
        let index = self
            .position(reference)
            .ok_or_else(|| BidashError::not_found("Save", reference))?;
        Ok(self.saves.remove(index))
    }

    pub fn clear(&mut self) {
        self.saves.clear();
    }

    fn position(&self, reference: &str) -> Option<usize> {
        self.saves
            .iter()
            .position(|s| s.id() == reference)
            .or_else(|| self.saves.iter().position(|s| s.name() == reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BiItem, Status};

    fn set() -> WorkingSet {
        let mut bi = BiItem::new(1, "Vendas".to_string());
        bi.status = Status::outdated(None);
        WorkingSet::new(vec![bi], vec![])
    }

    #[test]
    fn test_create_and_get() {
        let mut book = SaveBook::default();
        let id = book
            .create("Janeiro", Some("  ".to_string()), &set())
            .unwrap()
            .id()
            .to_string();

        let save = book.get(&id).unwrap();
        assert_eq!(save.name(), "Janeiro");
        assert_eq!(save.description(), None);
        assert_eq!(save.stats().outdated, 1);
        assert_eq!(book.get("Janeiro").unwrap().id(), id);
    }

    #[test]
    fn test_create_requires_name() {
        let mut book = SaveBook::default();
        assert!(book.create("   ", None, &set()).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_delete() {
        let mut book = SaveBook::default();
        book.create("A", None, &set()).unwrap();
        book.create("B", None, &set()).unwrap();

        let removed = book.delete("A").unwrap();
        assert_eq!(removed.name(), "A");
        assert_eq!(book.len(), 1);
        assert!(matches!(
            book.delete("A"),
            Err(BidashError::EntityNotFound { kind: "Save", .. })
        ));
    }
}
