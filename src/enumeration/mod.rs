//! Canonical value sets for categorical catalog columns.
//!
//! At startup every categorical column (microarchitecture, socket, color, ...)
//! is scanned once and its distinct values are mapped to normalized
//! identifiers. Those identifiers are the only values a requirement object may
//! reference, and the same normalization is applied to catalog cells when
//! filtering so spelling differences never matter.

mod normalize;

pub use normalize::{normalize, split_atoms};

use crate::catalog::{Catalog, CatalogRow, CatalogStore, Category};
use serde::Serialize;
use std::collections::BTreeMap;

/// Separator for multi-value cells such as `"Black / Gray"`.
pub const VALUE_DELIMITER: char = '/';

/// How a categorical column stores its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnShape {
    /// One value per cell.
    Single,
    /// Several `/`-delimited values per cell.
    Delimited,
}

/// Closed set of canonical identifiers observed in one catalog column.
///
/// Keyed by canonical identifier; the value is the first raw spelling seen in
/// alphabetical order, kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalSet {
    values: BTreeMap<String, String>,
}

impl CanonicalSet {
    /// Build from raw cell values. `None` cells are skipped.
    pub fn from_values<'a, I>(raw: I, shape: ColumnShape) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut atoms: Vec<&str> = Vec::new();
        for cell in raw.into_iter().flatten() {
            match shape {
                ColumnShape::Single => {
                    let trimmed = cell.trim();
                    if !trimmed.is_empty() {
                        atoms.push(trimmed);
                    }
                }
                ColumnShape::Delimited => atoms.extend(split_atoms(cell)),
            }
        }
        atoms.sort_unstable();
        atoms.dedup();

        let mut values = BTreeMap::new();
        for raw in atoms {
            values
                .entry(normalize(raw))
                .or_insert_with(|| raw.to_string());
        }
        Self { values }
    }

    /// Build from the named column of a catalog.
    pub fn from_column<R: CatalogRow>(catalog: &Catalog<R>, column: &str, shape: ColumnShape) -> Self {
        Self::from_values(catalog.rows().iter().map(|row| row.text(column)), shape)
    }

    /// Whether `canonical` is a member. The argument must already be normalized.
    pub fn contains(&self, canonical: &str) -> bool {
        self.values.contains_key(canonical)
    }

    /// Canonical identifiers in sorted order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Raw display spelling for a canonical identifier.
    pub fn display(&self, canonical: &str) -> Option<&str> {
        self.values.get(canonical).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A categorical column that gets an enumeration at startup.
#[derive(Debug, Clone, Copy)]
pub struct EnumeratedColumn {
    pub category: Category,
    pub column: &'static str,
    pub shape: ColumnShape,
}

/// Every categorical column the requirement schema refers to.
pub const ENUMERATED_COLUMNS: &[EnumeratedColumn] = &[
    EnumeratedColumn { category: Category::Cpu, column: "microarchitecture", shape: ColumnShape::Single },
    EnumeratedColumn { category: Category::Cpu, column: "integrated_graphics", shape: ColumnShape::Single },
    EnumeratedColumn { category: Category::Cooler, column: "color", shape: ColumnShape::Delimited },
    EnumeratedColumn { category: Category::Storage, column: "type", shape: ColumnShape::Single },
    EnumeratedColumn { category: Category::Storage, column: "form_factor", shape: ColumnShape::Single },
    EnumeratedColumn { category: Category::Storage, column: "interface", shape: ColumnShape::Single },
    EnumeratedColumn { category: Category::Memory, column: "color", shape: ColumnShape::Delimited },
    EnumeratedColumn { category: Category::Motherboard, column: "cpu_socket", shape: ColumnShape::Single },
    EnumeratedColumn { category: Category::Motherboard, column: "form_factor", shape: ColumnShape::Single },
    EnumeratedColumn { category: Category::Motherboard, column: "color", shape: ColumnShape::Delimited },
];

/// All canonical sets, keyed by category and column name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Enumerations {
    sets: BTreeMap<Category, BTreeMap<&'static str, CanonicalSet>>,
}

impl Enumerations {
    /// Scan every enumerated column of the store.
    pub fn build(store: &CatalogStore) -> Self {
        let mut enumerations = Self::default();
        for entry in ENUMERATED_COLUMNS {
            let set = match entry.category {
                Category::Cpu => CanonicalSet::from_column(&store.cpu, entry.column, entry.shape),
                Category::Cooler => CanonicalSet::from_column(&store.cooler, entry.column, entry.shape),
                Category::Storage => CanonicalSet::from_column(&store.storage, entry.column, entry.shape),
                Category::Memory => CanonicalSet::from_column(&store.memory, entry.column, entry.shape),
                Category::Motherboard => {
                    CanonicalSet::from_column(&store.motherboard, entry.column, entry.shape)
                }
            };
            tracing::debug!(
                category = %entry.category,
                column = entry.column,
                values = set.len(),
                "Built canonical value set"
            );
            enumerations.insert(entry.category, entry.column, set);
        }
        enumerations
    }

    pub fn insert(&mut self, category: Category, column: &'static str, set: CanonicalSet) {
        self.sets.entry(category).or_default().insert(column, set);
    }

    /// The canonical set for a column. Unknown columns yield an empty set.
    pub fn get(&self, category: Category, column: &str) -> &CanonicalSet {
        static EMPTY: CanonicalSet = CanonicalSet {
            values: BTreeMap::new(),
        };
        self.sets
            .get(&category)
            .and_then(|columns| columns.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Iterate over `(category, column, set)` in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &'static str, &CanonicalSet)> {
        self.sets.iter().flat_map(|(category, columns)| {
            columns
                .iter()
                .map(move |(column, set)| (*category, *column, set))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_sorted_and_deduplicated() {
        let cells = [Some("Zen 4"), Some("Raptor Lake"), None, Some("Zen 4"), Some("Zen 3")];
        let set = CanonicalSet::from_values(cells, ColumnShape::Single);

        let ids: Vec<_> = set.identifiers().collect();
        assert_eq!(ids, vec!["raptor_lake", "zen_3", "zen_4"]);
        assert_eq!(set.display("zen_4"), Some("Zen 4"));
    }

    #[test]
    fn test_delimited_colors_split_into_atoms() {
        let cells = [Some("Black / White"), Some("Black"), Some("Gray/ Black")];
        let set = CanonicalSet::from_values(cells, ColumnShape::Delimited);

        let ids: Vec<_> = set.identifiers().collect();
        assert_eq!(ids, vec!["black", "gray", "white"]);
        assert!(!set.contains("black_/_white"));
    }

    #[test]
    fn test_spellings_that_normalize_identically_merge() {
        let cells = [Some("Micro ATX"), Some("Micro-ATX"), Some("micro atx")];
        let set = CanonicalSet::from_values(cells, ColumnShape::Single);

        assert_eq!(set.len(), 1);
        assert!(set.contains("micro_atx"));
    }

    #[test]
    fn test_empty_column_yields_empty_set() {
        let set = CanonicalSet::from_values([None, None, Some("  ")], ColumnShape::Single);
        assert!(set.is_empty());
    }

    #[test]
    fn test_unknown_column_lookup_is_empty() {
        let enumerations = Enumerations::default();
        assert!(enumerations.get(Category::Cpu, "does_not_exist").is_empty());
    }

    #[test]
    fn test_canonical_set_serializes_as_map() {
        let set = CanonicalSet::from_values([Some("AM5")], ColumnShape::Single);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({"am5": "AM5"}));
    }
}
