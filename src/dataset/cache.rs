//! Load-once snapshot cache in front of the dataset loader.
//!
//! Entries are keyed by canonical path and invalidated when the file's
//! modification time or length changes. Snapshots are shared as
//! `Arc<Dataset>` and never mutated after insertion.
//!
//! The cache is for hosts that keep a process alive across many selections
//! over one dataset (a dashboard or service embedding the library). The
//! `stocklens` binary reads its dataset once per invocation and loads it
//! directly.

use super::loader::{load_dataset, Dataset};
use crate::error::{AnalyticsError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// What identifies one version of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSignature {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceSignature {
    pub fn of(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            AnalyticsError::missing_input(
                format!("cannot read {}: {e}", path.display()),
                Some(path.to_path_buf()),
            )
        })?;
        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    signature: SourceSignature,
    dataset: Arc<Dataset>,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for `path`, loading it on first use or
    /// after the file changed.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        self.get_or_load_with(path, load_dataset)
    }

    /// Like [`get_or_load`](Self::get_or_load) with a custom loader.
    pub fn get_or_load_with<F>(&mut self, path: &Path, loader: F) -> Result<Arc<Dataset>>
    where
        F: FnOnce(&Path) -> Result<Dataset>,
    {
        let key = canonical_key(path)?;
        let signature = SourceSignature::of(&key)?;

        if let Some(entry) = self.entries.get(&key) {
            if entry.signature == signature {
                self.hits += 1;
                log::debug!("Dataset cache hit for {}", key.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::debug!("Dataset {} changed on disk, reloading", key.display());
        }

        self.misses += 1;
        let dataset = Arc::new(loader(&key)?);
        self.entries.insert(
            key,
            CacheEntry {
                signature,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the snapshot for `path` and load it again.
    pub fn refresh(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        self.invalidate(path);
        self.get_or_load(path)
    }

    /// Forget `path`; returns whether an entry was present.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let key = canonical_key(path).unwrap_or_else(|_| path.to_path_buf());
        self.entries.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

fn canonical_key(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        AnalyticsError::missing_input(
            format!("dataset file not found: {} ({e})", path.display()),
            Some(path.to_path_buf()),
        )
    })
}
