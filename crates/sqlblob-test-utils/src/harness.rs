// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary on-disk blob store for integration tests.

use std::path::{Path, PathBuf};

use sqlblob_config::{BlobConfig, StorageConfig};
use sqlblob_core::SqlblobError;
use sqlblob_storage::BlobStore;

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    chunk_size: usize,
    wal_mode: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            chunk_size: BlobConfig::default().chunk_size,
            wal_mode: true,
        }
    }

    /// Stream chunk size used by the store.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_wal(mut self, enabled: bool) -> Self {
        self.wal_mode = enabled;
        self
    }

    /// Create the temp directory and an initialized store inside it.
    pub async fn build(self) -> Result<TestHarness, SqlblobError> {
        let temp_dir = tempfile::TempDir::new()?;
        let db_path = temp_dir.path().join("test.db");

        let storage = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: self.wal_mode,
            busy_timeout_ms: 1_000,
        };
        let store = BlobStore::new(
            storage,
            BlobConfig {
                chunk_size: self.chunk_size,
            },
        );
        store.initialize().await?;
        tracing::debug!(path = %db_path.display(), "test harness ready");

        Ok(TestHarness {
            store,
            db_path,
            temp_dir,
        })
    }
}

/// An initialized [`BlobStore`] whose files are removed on drop.
pub struct TestHarness {
    pub store: BlobStore,
    db_path: PathBuf,
    temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// A path inside the harness's temp directory.
    pub fn scratch_path(&self, file_name: &str) -> PathBuf {
        self.temp_dir.path().join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_creates_database() {
        let harness = TestHarness::builder().with_chunk_size(8).build().await.unwrap();
        assert!(harness.db_path().exists());
        assert_eq!(harness.store.chunk_size(), 8);
        harness.store.health_check().await.unwrap();
    }
}
