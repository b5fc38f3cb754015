//! Process-wide immutable state: catalogs plus their canonical value sets.

use crate::catalog::{CatalogError, CatalogStore};
use crate::enumeration::Enumerations;
use std::path::Path;
use std::sync::Arc;

/// Everything a request needs to read, built once before serving.
///
/// Shared as `Arc<AdvisorContext>`; nothing in it is mutated after
/// construction, so concurrent reads need no locking.
#[derive(Debug)]
pub struct AdvisorContext {
    pub catalogs: CatalogStore,
    pub enumerations: Enumerations,
}

impl AdvisorContext {
    /// Derive enumerations from an already loaded store.
    pub fn new(catalogs: CatalogStore) -> Self {
        let enumerations = Enumerations::build(&catalogs);
        Self {
            catalogs,
            enumerations,
        }
    }

    /// Load catalogs from `dir` and build enumerations.
    pub fn load(dir: &Path) -> Result<Arc<Self>, CatalogError> {
        let catalogs = CatalogStore::load(dir)?;
        Ok(Arc::new(Self::new(catalogs)))
    }
}
