// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management: PRAGMA setup, migrations, and lifecycle.
//!
//! Every statement runs on tokio-rusqlite's single background thread, so the
//! `Database` is the only writer. Do NOT open extra connections for writes.

use std::path::Path;
use std::time::Duration;

use sqlblob_config::StorageConfig;
use sqlblob_core::SqlblobError;
use tracing::debug;

use crate::migrations;

/// Handle to the sqlblob SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` with default storage settings.
    pub async fn open(path: &str) -> Result<Self, SqlblobError> {
        let config = StorageConfig {
            database_path: path.to_string(),
            ..StorageConfig::default()
        };
        Self::open_with_config(&config).await
    }

    /// Open (or create) the database described by `config`.
    ///
    /// Missing parent directories are created. PRAGMAs are applied and
    /// pending migrations run before this returns.
    pub async fn open_with_config(config: &StorageConfig) -> Result<Self, SqlblobError> {
        let path = Path::new(&config.database_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| SqlblobError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(config.wal_mode, config.busy_timeout_ms).await?;
        debug!(path = %config.database_path, wal = config.wal_mode, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database. WAL does not apply in memory.
    pub async fn open_in_memory() -> Result<Self, SqlblobError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| SqlblobError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(false, StorageConfig::default().busy_timeout_ms)
            .await?;
        Ok(db)
    }

    async fn prepare(&self, wal_mode: bool, busy_timeout_ms: u64) -> Result<(), SqlblobError> {
        self.conn
            .call(move |conn| -> Result<(), SqlblobError> {
                if wal_mode {
                    conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
                }
                conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
                conn.execute_batch("PRAGMA foreign_keys = ON;")?;
                migrations::run_migrations(conn)
            })
            .await
            .map_err(map_call_err)
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), SqlblobError> {
        self.conn
            .call(|conn| -> Result<(), SqlblobError> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_call_err)?;
        self.conn.close().await.map_err(|e| SqlblobError::Storage {
            source: Box::new(e),
        })?;
        debug!("database closed");
        Ok(())
    }
}

/// Unwrap the closure's own error, or wrap a connection-level failure.
pub(crate) fn map_call_err(e: tokio_rusqlite::Error<SqlblobError>) -> SqlblobError {
    match e {
        tokio_rusqlite::Error::Error(inner) => inner,
        other => SqlblobError::Storage {
            source: other.to_string().into(),
        },
    }
}
