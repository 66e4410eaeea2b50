//! # Catalog Repository
//!
//! `products.json`: a JSON object keyed by product code, entries in catalog
//! order.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreResult;
use crate::fs::{read_json, write_json_atomic};
use apotheca_core::Catalog;

/// Reads and writes the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    path: PathBuf,
}

impl CatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog. A missing file is an empty catalog.
    pub fn load(&self) -> StoreResult<Catalog> {
        let catalog: Catalog = read_json(&self.path)?.unwrap_or_default();
        debug!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Rewrites the whole catalog.
    pub fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        write_json_atomic(&self.path, catalog)
    }
}
