//! The live workspace: session, saves and the store they are written to.
//!
//! Every change goes through [`Workspace::edit`] or [`Workspace::edit_saves`]:
//! mutate in memory, then persist. A failed write does not undo the change;
//! the workspace keeps running in memory and reports
//! [`PersistOutcome::InMemoryOnly`].

mod saves;
mod session;

pub use saves::SaveBook;
pub use session::{AreaUpdate, BiDraft, BiUpdate, PageDraft, Session};

use crate::diff::{compare_sides, Comparison, ComparisonSide, SESSION_ID};
use crate::entity::WorkingSet;
use crate::error::Result;
use crate::storage::Persistence;
use crate::transfer::import_document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted,
    /// The store rejected the write; the change only exists in memory.
    InMemoryOnly,
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, PersistOutcome::Persisted)
    }
}

/// Result of a committed change.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed<T> {
    pub value: T,
    pub outcome: PersistOutcome,
}

pub struct Workspace {
    persistence: Persistence,
    session: Session,
    saves: SaveBook,
}

impl Workspace {
    /// Load the session and saves from the store. Unreadable entries start
    /// empty.
    pub fn open(persistence: Persistence) -> Self {
        let session = Session::new(persistence.load_snapshot());
        let saves = SaveBook::new(persistence.load_saves());
        Self {
            persistence,
            session,
            saves,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn saves(&self) -> &SaveBook {
        &self.saves
    }

    /// Apply a session change and persist the working set.
    pub fn edit<T, F>(&mut self, change: F) -> Result<Committed<T>>
    where
        F: FnOnce(&mut Session) -> Result<T>,
    {
        let value = change(&mut self.session)?;
        let set = self.session.working_set();
        let outcome = settle(
            "working set",
            self.persistence.save_snapshot(&set.bis, &set.areas),
        );
        Ok(Committed { value, outcome })
    }

    /// Apply a change to the saves list and persist it. The closure also
    /// sees the working set so it can snapshot it.
    pub fn edit_saves<T, F>(&mut self, change: F) -> Result<Committed<T>>
    where
        F: FnOnce(&mut SaveBook, &WorkingSet) -> Result<T>,
    {
        let value = change(&mut self.saves, self.session.working_set())?;
        let outcome = settle("saves", self.persistence.save_saves(self.saves.list()));
        Ok(Committed { value, outcome })
    }

    /// Replace the working set with the contents of an export document.
    /// An invalid document leaves the session untouched.
    pub fn import(&mut self, raw: &str) -> Result<Committed<WorkingSet>> {
        let imported = import_document(raw)?;
        self.edit(|session| {
            session.replace(imported);
            Ok(session.working_set().clone())
        })
    }

    /// Resolve a comparison side: `current` is the live session, anything
    /// else names a save by id or name.
    pub fn side(&self, reference: &str) -> Result<ComparisonSide<'_>> {
        if reference == SESSION_ID {
            return Ok(ComparisonSide::Session(self.session.bis()));
        }
        Ok(ComparisonSide::Save(self.saves.get(reference)?))
    }

    pub fn compare(&self, base: &str, comparison: &str) -> Result<Comparison> {
        Ok(compare_sides(&self.side(base)?, &self.side(comparison)?))
    }

    /// Drop the session and every save, in memory and in the store.
    pub fn clear(&mut self) -> PersistOutcome {
        self.session.clear();
        self.saves.clear();
        settle("everything", self.persistence.clear())
    }
}

fn settle(what: &str, result: Result<()>) -> PersistOutcome {
    match result {
        Ok(()) => PersistOutcome::Persisted,
        Err(e) => {
            tracing::warn!(error = %e, "could not persist {}, keeping changes in memory", what);
            PersistOutcome::InMemoryOnly
        }
    }
}
