//! In-memory edits to the live working set.
//!
//! Every operation validates its whole input before touching the collections,
//! so a rejected edit leaves the session exactly as it was.

use crate::entity::validate::{normalize_date, normalize_link, normalize_name};
use crate::entity::{next_id, Area, BiItem, Criticality, Page, Status, WorkingSet};
use crate::error::{BidashError, Result};

/// Fields for a new BI.
#[derive(Debug, Clone, Default)]
pub struct BiDraft {
    pub name: String,
    pub owner: String,
    pub area: Vec<String>,
    pub status: Option<Status>,
    pub last_update: String,
    pub observations: String,
    pub usage: String,
    pub criticality: Criticality,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Update payload for a BI. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct BiUpdate {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub area: Option<Vec<String>>,
    pub status: Option<Status>,
    pub last_update: Option<String>,
    pub observations: Option<String>,
    pub usage: Option<String>,
    pub criticality: Option<Criticality>,
    pub description: Option<Option<String>>, // Some(None) to clear
    pub link: Option<Option<String>>,        // Some(None) to clear
}

/// Update payload for an area.
#[derive(Debug, Clone, Default)]
pub struct AreaUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Fields for a new page, or an update payload for an existing one.
/// Blank strings clear optional fields.
#[derive(Debug, Clone, Default)]
pub struct PageDraft {
    pub name: Option<String>,
    pub status: Option<Status>,
    pub criticality: Option<Criticality>,
    pub observations: Option<String>,
    pub owner: Option<String>,
    pub last_update: Option<String>,
    pub usage: Option<String>,
    pub description: Option<String>,
}

/// The live, editable collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    set: WorkingSet,
}

impl Session {
    pub fn new(set: WorkingSet) -> Self {
        Self { set }
    }

    pub fn bis(&self) -> &[BiItem] {
        &self.set.bis
    }

    pub fn areas(&self) -> &[Area] {
        &self.set.areas
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.set
    }

    pub fn bi(&self, id: u64) -> Result<&BiItem> {
        self.set
            .bis
            .iter()
            .find(|bi| bi.id == id)
            .ok_or_else(|| BidashError::not_found("BI", id))
    }

    pub fn area(&self, id: u64) -> Result<&Area> {
        self.set
            .areas
            .iter()
            .find(|area| area.id == id)
            .ok_or_else(|| BidashError::not_found("Area", id))
    }

    /// Replace everything, e.g. after an import.
    pub fn replace(&mut self, set: WorkingSet) {
        self.set = set;
    }

    pub fn clear(&mut self) {
        self.set = WorkingSet::default();
    }

    // ---- areas ----

    pub fn add_area(&mut self, name: &str, description: Option<String>) -> Result<Area> {
        let name = normalize_name("Area name", name)?;
        self.ensure_area_name_free(&name, None)?;

        let mut area = Area::new(next_id(self.set.areas.iter().map(|a| a.id))?, name);
        area.description = non_blank(description);
        self.set.areas.push(area.clone());
        Ok(area)
    }

    /// Apply an update. A rename is carried into every BI that referenced
    /// the old name.
    pub fn update_area(&mut self, id: u64, update: AreaUpdate) -> Result<Area> {
        let current = self.area(id)?.clone();

        let new_name = match update.name {
            Some(name) => {
                let name = normalize_name("Area name", &name)?;
                self.ensure_area_name_free(&name, Some(id))?;
                Some(name)
            }
            None => None,
        };

        if let Some(name) = &new_name {
            if *name != current.name {
                for bi in &mut self.set.bis {
                    for area in bi.area.iter_mut().filter(|a| **a == current.name) {
                        *area = name.clone();
                    }
                }
            }
        }

        let area = self
            .set
            .areas
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| BidashError::not_found("Area", id))?;
        if let Some(name) = new_name {
            area.name = name;
        }
        if let Some(description) = update.description {
            area.description = non_blank(description);
        }
        Ok(area.clone())
    }

    /// Names of the live BIs that still reference `area_name`.
    pub fn bis_using_area(&self, area_name: &str) -> Vec<String> {
        self.set
            .bis
            .iter()
            .filter(|bi| bi.in_area(area_name))
            .map(|bi| bi.name.clone())
            .collect()
    }

    /// Fail with `AreaInUse` if any BI still references the area.
    pub fn check_area_deletable(&self, id: u64) -> Result<()> {
        let area = self.area(id)?;
        let bis = self.bis_using_area(&area.name);
        if !bis.is_empty() {
            return Err(BidashError::AreaInUse {
                area: area.name.clone(),
                bis,
            });
        }
        Ok(())
    }

    pub fn delete_area(&mut self, id: u64) -> Result<Area> {
        self.check_area_deletable(id)?;
        let index = self
            .set
            .areas
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| BidashError::not_found("Area", id))?;
        Ok(self.set.areas.remove(index))
    }

    fn ensure_area_name_free(&self, name: &str, except: Option<u64>) -> Result<()> {
        let taken = self
            .set
            .areas
            .iter()
            .any(|a| a.name == name && Some(a.id) != except);
        if taken {
            return Err(BidashError::validation(format!(
                "Area '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    // ---- BIs ----

    pub fn add_bi(&mut self, draft: BiDraft) -> Result<BiItem> {
        let mut bi = BiItem::new(
            next_id(self.set.bis.iter().map(|b| b.id))?,
            normalize_name("BI name", &draft.name)?,
        );
        bi.last_update = normalize_date(&draft.last_update)?;
        bi.link = normalize_link(draft.link.as_deref())?;
        bi.owner = draft.owner.trim().to_string();
        bi.area = area_list(draft.area);
        bi.status = draft.status.unwrap_or_default();
        bi.observations = draft.observations;
        bi.usage = draft.usage;
        bi.criticality = draft.criticality;
        bi.description = non_blank(draft.description);

        self.set.bis.push(bi.clone());
        Ok(bi)
    }

    pub fn update_bi(&mut self, id: u64, update: BiUpdate) -> Result<BiItem> {
        let mut bi = self.bi(id)?.clone();

        if let Some(name) = update.name {
            bi.name = normalize_name("BI name", &name)?;
        }
        if let Some(date) = update.last_update {
            bi.last_update = normalize_date(&date)?;
        }
        if let Some(link) = update.link {
            bi.link = normalize_link(link.as_deref())?;
        }
        if let Some(owner) = update.owner {
            bi.owner = owner.trim().to_string();
        }
        if let Some(area) = update.area {
            bi.area = area_list(area);
        }
        if let Some(status) = update.status {
            bi.status = status;
        }
        if let Some(observations) = update.observations {
            bi.observations = observations;
        }
        if let Some(usage) = update.usage {
            bi.usage = usage;
        }
        if let Some(criticality) = update.criticality {
            bi.criticality = criticality;
        }
        if let Some(description) = update.description {
            bi.description = non_blank(description);
        }

        let slot = self.bi_mut(id)?;
        *slot = bi.clone();
        Ok(bi)
    }

    pub fn delete_bi(&mut self, id: u64) -> Result<BiItem> {
        let index = self
            .set
            .bis
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BidashError::not_found("BI", id))?;
        Ok(self.set.bis.remove(index))
    }

    // ---- pages ----

    pub fn add_page(&mut self, bi_id: u64, draft: PageDraft) -> Result<Page> {
        let name = normalize_name("Page name", draft.name.as_deref().unwrap_or_default())?;
        let bi = self.bi_mut(bi_id)?;

        let mut page = Page::new(next_id(bi.pages.iter().map(|p| p.id))?, name);
        apply_page_fields(&mut page, draft)?;
        bi.pages.push(page.clone());
        Ok(page)
    }

    pub fn update_page(&mut self, bi_id: u64, page_id: u64, draft: PageDraft) -> Result<Page> {
        let mut page = self
            .bi(bi_id)?
            .page(page_id)
            .cloned()
            .ok_or_else(|| BidashError::not_found("Page", page_id))?;

        if let Some(name) = draft.name.as_deref() {
            page.name = normalize_name("Page name", name)?;
        }
        apply_page_fields(&mut page, draft)?;

        let bi = self.bi_mut(bi_id)?;
        if let Some(slot) = bi.pages.iter_mut().find(|p| p.id == page_id) {
            *slot = page.clone();
        }
        Ok(page)
    }

    pub fn delete_page(&mut self, bi_id: u64, page_id: u64) -> Result<Page> {
        let bi = self.bi_mut(bi_id)?;
        let index = bi
            .pages
            .iter()
            .position(|p| p.id == page_id)
            .ok_or_else(|| BidashError::not_found("Page", page_id))?;
        Ok(bi.pages.remove(index))
    }

    fn bi_mut(&mut self, id: u64) -> Result<&mut BiItem> {
        self.set
            .bis
            .iter_mut()
            .find(|bi| bi.id == id)
            .ok_or_else(|| BidashError::not_found("BI", id))
    }
}

/// Copy the optional fields of a draft onto a page. The name is handled by
/// the caller.
fn apply_page_fields(page: &mut Page, draft: PageDraft) -> Result<()> {
    if let Some(date) = draft.last_update {
        let date = normalize_date(&date)?;
        page.last_update = (!date.is_empty()).then_some(date);
    }
    if let Some(status) = draft.status {
        page.status = Some(status);
    }
    if let Some(criticality) = draft.criticality {
        page.criticality = Some(criticality);
    }
    if let Some(observations) = draft.observations {
        page.observations = non_blank(Some(observations));
    }
    if let Some(owner) = draft.owner {
        page.owner = non_blank(Some(owner));
    }
    if let Some(usage) = draft.usage {
        page.usage = non_blank(Some(usage));
    }
    if let Some(description) = draft.description {
        page.description = non_blank(Some(description));
    }
    Ok(())
}

/// Trim area names, dropping blanks and repeats while keeping order.
fn area_list(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
