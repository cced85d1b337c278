mod area;
mod bi_item;
mod criticality;
mod page;
mod save;
mod status;
pub mod validate;

pub use area::Area;
pub use bi_item::BiItem;
pub use criticality::Criticality;
pub use page::Page;
pub use save::{SaveData, SaveStats};
pub use status::{Status, StatusCategory, StatusKind, OUTDATED_MARKER};

use serde::{Deserialize, Serialize};

use crate::error::{BidashError, Result};

/// The live BI and area collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSet {
    pub bis: Vec<BiItem>,
    pub areas: Vec<Area>,
}

impl WorkingSet {
    pub fn new(bis: Vec<BiItem>, areas: Vec<Area>) -> Self {
        Self { bis, areas }
    }

    pub fn is_empty(&self) -> bool {
        self.bis.is_empty() && self.areas.is_empty()
    }
}

/// Next id for a collection: one past the largest id in use.
pub fn next_id<I>(ids: I) -> Result<u64>
where
    I: IntoIterator<Item = u64>,
{
    match ids.into_iter().max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            BidashError::validation(format!("No ids left after {}", max))
        }),
    }
}
