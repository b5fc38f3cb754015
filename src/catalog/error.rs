//! Catalog loading errors

use super::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading catalogs at startup.
///
/// Every variant is fatal: the server must not start with a partial catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog file not found for {category}: {path}")]
    NotFound { category: Category, path: PathBuf },

    #[error("Failed to read {category} catalog: {source}")]
    Io {
        category: Category,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {category} catalog: missing required column '{column}'")]
    MissingColumn {
        category: Category,
        column: &'static str,
    },

    #[error("Malformed {category} catalog at line {line}: {message}")]
    InvalidRow {
        category: Category,
        line: u64,
        message: String,
    },
}

impl CatalogError {
    pub(crate) fn from_csv(category: Category, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => CatalogError::Io { category, source },
            _ => CatalogError::InvalidRow {
                category,
                line,
                message,
            },
        }
    }
}
