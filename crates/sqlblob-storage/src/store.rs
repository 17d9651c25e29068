// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configured, lazily opened entry point to the blob table.

use std::path::Path;

use sqlblob_config::{BlobConfig, StorageConfig};
use sqlblob_core::{Blob, SqlblobError, ZeroBlob};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::database::{Database, map_call_err};
use crate::models::BlobEntry;
use crate::queries;

/// SQLite-backed named blob store.
///
/// Wraps a [`Database`] that is opened on the first call to
/// [`initialize`](Self::initialize); streaming operations use the configured
/// chunk size.
pub struct BlobStore {
    storage: StorageConfig,
    chunk_size: usize,
    db: OnceCell<Database>,
}

impl BlobStore {
    /// Create a store. The database is not opened until `initialize`.
    pub fn new(storage: StorageConfig, blob: BlobConfig) -> Self {
        Self {
            storage,
            chunk_size: blob.chunk_size,
            db: OnceCell::new(),
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    pub fn db(&self) -> Result<&Database, SqlblobError> {
        self.db.get().ok_or_else(|| SqlblobError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub async fn initialize(&self) -> Result<(), SqlblobError> {
        let db = Database::open_with_config(&self.storage).await?;
        self.db.set(db).map_err(|_| SqlblobError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.storage.database_path, "blob store initialized");
        Ok(())
    }

    /// Run a trivial query against the database.
    pub async fn health_check(&self) -> Result<(), SqlblobError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), SqlblobError> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_call_err)
    }

    /// Checkpoint the WAL. The connection stays usable.
    pub async fn checkpoint(&self) -> Result<(), SqlblobError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), SqlblobError> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_call_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    pub async fn allocate(&self, name: &str, size: ZeroBlob) -> Result<i64, SqlblobError> {
        queries::blobs::allocate(self.db()?, name, size).await
    }

    pub async fn insert(&self, name: &str, blob: &Blob) -> Result<i64, SqlblobError> {
        queries::blobs::insert(self.db()?, name, blob).await
    }

    pub async fn get(&self, name: &str) -> Result<Option<Blob>, SqlblobError> {
        queries::blobs::get(self.db()?, name).await
    }

    pub async fn find(&self, name: &str) -> Result<Option<BlobEntry>, SqlblobError> {
        queries::blobs::find(self.db()?, name).await
    }

    pub async fn list(&self) -> Result<Vec<BlobEntry>, SqlblobError> {
        queries::blobs::list(self.db()?).await
    }

    pub async fn delete(&self, name: &str) -> Result<bool, SqlblobError> {
        queries::blobs::delete(self.db()?, name).await
    }

    pub async fn write_stream(&self, name: &str, data: Vec<u8>) -> Result<(), SqlblobError> {
        queries::blobs::write_stream(self.db()?, name, data, self.chunk_size).await
    }

    pub async fn read_stream(&self, name: &str) -> Result<Blob, SqlblobError> {
        queries::blobs::read_stream(self.db()?, name, self.chunk_size).await
    }

    pub async fn import_file(&self, name: &str, path: &Path) -> Result<BlobEntry, SqlblobError> {
        queries::blobs::import_file(self.db()?, name, path, self.chunk_size).await
    }

    pub async fn export_file(&self, name: &str, path: &Path) -> Result<u64, SqlblobError> {
        queries::blobs::export_file(self.db()?, name, path, self.chunk_size).await
    }
}
