//! # Catalog Store
//!
//! Five static hardware catalogs (CPU, cooler, storage, memory, motherboard)
//! loaded from CSV files once at startup and never mutated afterwards.
//!
//! Row order is significant: a row's position in its file is the `index`
//! identity that shortlists and model selections refer back to.
//!
//! ## Example
//!
//! ```
//! use build_advisor::catalog::{Catalog, CpuRow};
//!
//! let csv = "name,core_count,performance_core_clock,performance_core_boost_clock,microarchitecture,tdp,price\n\
//!            AMD Ryzen 7 7700X,8,4.5,5.4,Zen 4,105,299.99\n";
//! let catalog: Catalog<CpuRow> = Catalog::from_reader(csv.as_bytes()).unwrap();
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog.rows()[0].core_count, Some(8));
//! ```

pub(crate) mod cell;
pub mod error;
pub mod rows;

pub use error::CatalogError;
pub use rows::{CoolerRow, CpuRow, MemoryRow, MotherboardRow, StorageRow};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Component category. Declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cpu,
    Cooler,
    Storage,
    Memory,
    Motherboard,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Cpu,
        Category::Cooler,
        Category::Storage,
        Category::Memory,
        Category::Motherboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Cooler => "cooler",
            Category::Storage => "storage",
            Category::Memory => "memory",
            Category::Motherboard => "motherboard",
        }
    }

    /// File name of this category's catalog inside the catalog directory.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed catalog row.
pub trait CatalogRow: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const CATEGORY: Category;

    /// Header columns that must be present for the file to load.
    const REQUIRED_COLUMNS: &'static [&'static str];

    fn name(&self) -> &str;

    fn price(&self) -> Option<f64>;

    /// Text value of a string or categorical column, by column name.
    fn text(&self, column: &str) -> Option<&str>;
}

/// Header names accepted in place of a required column.
const COLUMN_ALIASES: &[(&str, &str)] = &[("name", "title")];

/// An ordered, read-only table of rows for one category.
#[derive(Debug, Clone)]
pub struct Catalog<R> {
    rows: Vec<R>,
}

impl<R: CatalogRow> Catalog<R> {
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Parse CSV content with a header row.
    pub fn from_reader<T: std::io::Read>(reader: T) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CatalogError::from_csv(R::CATEGORY, e))?
            .clone();
        for &column in R::REQUIRED_COLUMNS {
            let aliases = COLUMN_ALIASES
                .iter()
                .filter(|(canonical, _)| *canonical == column)
                .map(|(_, alias)| *alias);
            let present = std::iter::once(column)
                .chain(aliases)
                .any(|name| headers.iter().any(|h| h == name));
            if !present {
                return Err(CatalogError::MissingColumn {
                    category: R::CATEGORY,
                    column,
                });
            }
        }

        let rows = reader
            .deserialize::<R>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::from_csv(R::CATEGORY, e))?;

        Ok(Self { rows })
    }

    /// Load `<dir>/<category>.csv`.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let path = dir.join(R::CATEGORY.file_name());
        if !path.exists() {
            return Err(CatalogError::NotFound {
                category: R::CATEGORY,
                path,
            });
        }
        let file = std::fs::File::open(&path).map_err(|source| CatalogError::Io {
            category: R::CATEGORY,
            source,
        })?;
        let catalog = Self::from_reader(std::io::BufReader::new(file))?;

        tracing::info!(
            category = %R::CATEGORY,
            rows = catalog.len(),
            path = %path.display(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All five catalogs.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pub cpu: Catalog<CpuRow>,
    pub cooler: Catalog<CoolerRow>,
    pub storage: Catalog<StorageRow>,
    pub memory: Catalog<MemoryRow>,
    pub motherboard: Catalog<MotherboardRow>,
}

impl CatalogStore {
    /// Load every catalog from `dir`. Any failure aborts the whole load.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        Ok(Self {
            cpu: Catalog::load(dir)?,
            cooler: Catalog::load(dir)?,
            storage: Catalog::load(dir)?,
            memory: Catalog::load(dir)?,
            motherboard: Catalog::load(dir)?,
        })
    }

    /// Row count per category, in canonical order.
    pub fn row_counts(&self) -> Vec<(Category, usize)> {
        vec![
            (Category::Cpu, self.cpu.len()),
            (Category::Cooler, self.cooler.len()),
            (Category::Storage, self.storage.len()),
            (Category::Memory, self.memory.len()),
            (Category::Motherboard, self.motherboard.len()),
        ]
    }
}
