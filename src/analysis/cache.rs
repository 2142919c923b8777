use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, SalesError};
use crate::types::{AggregatedSales, FileFingerprint};

use super::loader::load_sales;

/// Outcome of loading a file, shared between the cache and its callers.
pub type LoadResult = std::result::Result<Arc<AggregatedSales>, Arc<SalesError>>;

/// Holds the outcome of loading a single source file.
///
/// The entry is keyed on the file's fingerprint, which is re-read on every
/// access; a changed file is reloaded before being returned. A failed load
/// is remembered as well and is not retried until the file changes or the
/// entry is invalidated.
pub struct CacheManager {
    entry: Option<(FileFingerprint, LoadResult)>,
}

impl CacheManager {
    /// Create an empty cache
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Return the aggregated sales for `path`, loading them if the cached
    /// entry is missing or stale.
    pub fn get_or_load(&mut self, path: &Path) -> LoadResult {
        let fingerprint = fingerprint(path).map_err(Arc::new)?;

        if let Some((key, outcome)) = &self.entry {
            if *key == fingerprint {
                debug!(path = %path.display(), failed = outcome.is_err(), "Sales cache hit");
                return outcome.clone();
            }
            debug!(path = %path.display(), "Source file changed, reloading");
        }

        let outcome = load_sales(path).map(Arc::new).map_err(Arc::new);
        self.entry = Some((fingerprint, outcome.clone()));
        outcome
    }

    /// Whether a successful, up-to-date entry exists for `path`
    #[cfg(test)]
    pub(crate) fn is_cached(&self, path: &Path) -> bool {
        match (&self.entry, fingerprint(path)) {
            (Some((key, Ok(_))), Ok(current)) => *key == current,
            _ => false,
        }
    }

    /// Drop the cached entry, successful or not
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Identify the current contents of `path` by size and modification time.
pub fn fingerprint(path: &Path) -> Result<FileFingerprint> {
    let metadata = fs::metadata(path).map_err(|source| SalesError::DataLoad {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(FileFingerprint {
        path: path.to_path_buf(),
        len: metadata.len(),
        modified: metadata.modified().ok(),
    })
}
