//! Catalog configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where catalogs live and how many rows each shortlist may hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory containing `cpu.csv`, `cooler.csv`, `storage.csv`,
    /// `memory.csv` and `motherboard.csv`.
    pub dir: PathBuf,
    pub shortlist_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            shortlist_limit: 10,
        }
    }
}
