//! # Catalog Filter
//!
//! Applies a requirement object to a catalog. Every active constraint must
//! hold for a row to survive; absent constraints are never evaluated.
//! Surviving rows keep catalog order and carry their original row index.
//!
//! [`shortlist`] adds the two policies needed before selection: an empty
//! result falls back to the head of the unfiltered catalog, and the result is
//! capped at `limit` rows.

mod predicates;

use crate::catalog::{Catalog, CatalogRow, Category};
use crate::context::AdvisorContext;
use crate::requirements::{PcRequirements, Requirement};
use serde::Serialize;

/// A requirement type that can test rows of its category.
pub trait RowFilter: Requirement {
    type Row: CatalogRow;

    /// True when `row` satisfies every active constraint.
    fn matches(&self, row: &Self::Row) -> bool;
}

/// A catalog row together with its position in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistEntry<'a, R> {
    pub index: usize,
    #[serde(flatten)]
    pub row: &'a R,
}

/// Candidate rows for one category.
#[derive(Debug, Clone, Serialize)]
pub struct Shortlist<'a, R> {
    pub category: Category,
    pub entries: Vec<ShortlistEntry<'a, R>>,
    /// Set when filtering removed every row and the catalog head was used.
    pub fallback: bool,
}

impl<'a, R> Shortlist<'a, R> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `index` is one of the shortlisted catalog indices.
    pub fn contains_index(&self, index: usize) -> bool {
        self.entries.iter().any(|entry| entry.index == index)
    }

    pub fn get(&self, index: usize) -> Option<&'a R> {
        self.entries
            .iter()
            .find(|entry| entry.index == index)
            .map(|entry| entry.row)
    }
}

/// Rows that satisfy `requirement`, in catalog order. May be empty.
pub fn filter<'a, Q: RowFilter>(
    catalog: &'a Catalog<Q::Row>,
    requirement: &Q,
) -> Vec<ShortlistEntry<'a, Q::Row>> {
    catalog
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| requirement.matches(row))
        .map(|(index, row)| ShortlistEntry { index, row })
        .collect()
}

fn head<R>(catalog: &Catalog<R>, limit: usize) -> Vec<ShortlistEntry<'_, R>>
where
    R: CatalogRow,
{
    catalog
        .rows()
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, row)| ShortlistEntry { index, row })
        .collect()
}

/// Filter, fall back to the catalog head when nothing survives, then cap at `limit`.
///
/// A `None` or fully unconstrained requirement skips filtering.
pub fn shortlist<'a, Q: RowFilter>(
    catalog: &'a Catalog<Q::Row>,
    requirement: Option<&Q>,
    limit: usize,
) -> Shortlist<'a, Q::Row> {
    let category = Q::CATEGORY;
    let requirement = requirement.filter(|r| !r.is_unconstrained());

    let Some(requirement) = requirement else {
        return Shortlist {
            category,
            entries: head(catalog, limit),
            fallback: false,
        };
    };

    let mut entries = filter(catalog, requirement);
    let fallback = entries.is_empty();
    if fallback {
        tracing::debug!(
            category = %category,
            catalog_rows = catalog.len(),
            "No rows matched requirements, using catalog head"
        );
        entries = head(catalog, limit);
    } else {
        tracing::debug!(category = %category, matched = entries.len(), "Filtered catalog");
    }
    entries.truncate(limit);

    Shortlist {
        category,
        entries,
        fallback,
    }
}

/// One shortlist per category, serialized as a map keyed by category.
#[derive(Debug, Clone, Serialize)]
pub struct Shortlists<'a> {
    pub cpu: Shortlist<'a, crate::catalog::CpuRow>,
    pub cooler: Shortlist<'a, crate::catalog::CoolerRow>,
    pub storage: Shortlist<'a, crate::catalog::StorageRow>,
    pub memory: Shortlist<'a, crate::catalog::MemoryRow>,
    pub motherboard: Shortlist<'a, crate::catalog::MotherboardRow>,
}

impl<'a> Shortlists<'a> {
    pub fn build(context: &'a AdvisorContext, requirements: &PcRequirements, limit: usize) -> Self {
        let catalogs = &context.catalogs;
        Self {
            cpu: shortlist(&catalogs.cpu, requirements.cpu.as_ref(), limit),
            cooler: shortlist(&catalogs.cooler, requirements.cooler.as_ref(), limit),
            storage: shortlist(&catalogs.storage, requirements.storage.as_ref(), limit),
            memory: shortlist(&catalogs.memory, requirements.memory.as_ref(), limit),
            motherboard: shortlist(&catalogs.motherboard, requirements.motherboard.as_ref(), limit),
        }
    }

    /// Categories whose shortlist came from the fallback.
    pub fn fallback_categories(&self) -> Vec<Category> {
        [
            (Category::Cpu, self.cpu.fallback),
            (Category::Cooler, self.cooler.fallback),
            (Category::Storage, self.storage.fallback),
            (Category::Memory, self.memory.fallback),
            (Category::Motherboard, self.motherboard.fallback),
        ]
        .into_iter()
        .filter_map(|(category, fallback)| fallback.then_some(category))
        .collect()
    }

    /// Rows as sent for selection: `{category: [{index, ...row}]}`.
    pub fn to_prompt_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cpu": self.cpu.entries,
            "cooler": self.cooler.entries,
            "storage": self.storage.entries,
            "memory": self.memory.entries,
            "motherboard": self.motherboard.entries,
        })
    }
}
