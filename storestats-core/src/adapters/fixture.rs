//! Offline data suppliers
//!
//! `StaticSupplier` serves an in-memory dataset (tests, demos) and
//! `FileSupplier` serves a JSON snapshot previously written by `save_snapshot`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::result::{FetchError, Result};
use crate::ports::{DataSupplier, Dataset};

/// Supplier backed by a dataset held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSupplier {
    dataset: Dataset,
}

impl StaticSupplier {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl DataSupplier for StaticSupplier {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_all(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }
}

/// Supplier backed by a JSON snapshot on disk
#[derive(Debug, Clone)]
pub struct FileSupplier {
    path: PathBuf,
}

impl FileSupplier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataSupplier for FileSupplier {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_all(&self) -> Result<Dataset> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Read {
                resource: "snapshot".to_string(),
                message: format!("{}: {}", self.path.display(), e),
            })?;
        let dataset: Dataset = serde_json::from_str(&content)
            .map_err(|e| FetchError::decode("snapshot", e.to_string()))?;
        dataset.validate()?;
        tracing::debug!(path = %self.path.display(), "loaded dataset snapshot");
        Ok(dataset)
    }
}

/// Write a dataset snapshot as pretty JSON
pub fn save_snapshot(path: &Path, dataset: &Dataset) -> Result<()> {
    let content = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, content)?;
    Ok(())
}
