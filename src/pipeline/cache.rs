//! Fingerprinted cache of the cleaned dataset
//!
//! The cleaned records are derived once per distinct source content. Each
//! [`DatasetCache::snapshot`] re-hashes the source and reloads only when the
//! digest differs from the cached one. Snapshots are shared read-only.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::{PipelineError, PipelineResult};
use super::loader::{read_source, CleanedDataset};

/// Hex blake3 digest of the source bytes
pub fn fingerprint_source(path: &Path) -> PipelineResult<String> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::unavailable(path, e))?;
    Ok(hex::encode(blake3::hash(&bytes).as_bytes()))
}

/// Read, clean and fingerprint a source file in one go.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> PipelineResult<CleanedDataset> {
    let fingerprint = fingerprint_source(path)?;
    let df = read_source(path, infer_schema_length)?;
    CleanedDataset::from_dataframe(&df, path, fingerprint)
}

/// Explicit, caller-owned cache of the cleaned dataset.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    infer_schema_length: usize,
    current: Arc<CleanedDataset>,
    loads: usize,
}

impl DatasetCache {
    /// Load the source for the first time.
    pub fn open(path: impl Into<PathBuf>, infer_schema_length: usize) -> PipelineResult<Self> {
        let path = path.into();
        let current = Arc::new(load_dataset(&path, infer_schema_length)?);
        Ok(Self {
            path,
            infer_schema_length,
            current,
            loads: 1,
        })
    }

    /// Current snapshot, reloading first if the source content changed.
    pub fn snapshot(&mut self) -> PipelineResult<Arc<CleanedDataset>> {
        let fingerprint = fingerprint_source(&self.path)?;
        if fingerprint != self.current.fingerprint {
            log::info!(
                "Source {} changed ({} -> {}), reloading",
                self.path.display(),
                short(&self.current.fingerprint),
                short(&fingerprint)
            );
            self.reload()?;
        }
        Ok(Arc::clone(&self.current))
    }

    /// Unconditionally reload the source.
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&mut self) -> PipelineResult<Arc<CleanedDataset>> {
        let dataset = load_dataset(&self.path, self.infer_schema_length)?;
        self.current = Arc::new(dataset);
        self.loads += 1;
        Ok(Arc::clone(&self.current))
    }

    /// Cached snapshot without checking the source
    pub fn cached(&self) -> Arc<CleanedDataset> {
        Arc::clone(&self.current)
    }

    /// Number of times the source has been read and cleaned
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

fn short(fingerprint: &str) -> &str {
    &fingerprint[..fingerprint.len().min(12)]
}
