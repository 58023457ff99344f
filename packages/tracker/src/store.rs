//! Catalog Store: durable persistence of the catalog file.
//!
//! The whole mapping is read at the start of an invocation and rewritten
//! in one save; there is no partial/append persistence. Saves go through
//! a temp file in the same directory followed by a rename, so a failed
//! save leaves the previous file intact.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Catalog;

/// Default backing file name, relative to the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "product_catalog.json";

/// Durable key-value persistence of catalog entries keyed by source URL.
pub struct CatalogStore {
    path: PathBuf,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_FILE)
    }
}

impl CatalogStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog from disk.
    ///
    /// A missing or empty file yields an empty catalog. Unparsable
    /// content also yields an empty catalog, surfaced as a warning:
    /// a single search must not be blocked by stale corrupt state, at
    /// the cost of silently discarding the corrupt data.
    pub fn load(&self) -> Result<Catalog> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Catalog::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Catalog::new());
        }

        match serde_json::from_str(&content) {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Catalog file is unparsable, starting from an empty catalog"
                );
                Ok(Catalog::new())
            }
        }
    }

    /// Serialize the full mapping and replace the backing file.
    ///
    /// Writes to a temp file in the target directory and renames it into
    /// place. Errors propagate: a failed save means the invocation did
    /// not complete, and the previous on-disk state is untouched.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let json = serde_json::to_string_pretty(catalog)?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new_in(".")?,
        };

        use std::io::Write;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = catalog.len(),
            "Catalog saved"
        );
        Ok(())
    }
}
