// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named blob operations on the `blobs` table.
//!
//! Whole-value reads and writes bind [`Blob`] directly. The `*_stream` and
//! file operations go through a [`BlobStream`](sqlblob_core::BlobStream) and
//! move at most `chunk_size` bytes per engine call.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use sqlblob_core::{Blob, SqlblobError, ZeroBlob};
use tracing::debug;

use crate::database::{Database, map_call_err};
use crate::handle::{BlobLocation, OpenMode, open_blob};
use crate::models::BlobEntry;

const TABLE: &str = "blobs";
const DATA_COLUMN: &str = "data";

fn location(id: i64) -> BlobLocation {
    BlobLocation::new(TABLE, DATA_COLUMN, id)
}

fn find_sync(conn: &Connection, name: &str) -> Result<Option<BlobEntry>, SqlblobError> {
    Ok(conn
        .query_row(
            "SELECT id, name, length(data), created_at FROM blobs WHERE name = ?1",
            params![name],
            BlobEntry::from_row,
        )
        .optional()?)
}

fn require(conn: &Connection, name: &str) -> Result<BlobEntry, SqlblobError> {
    find_sync(conn, name)?.ok_or_else(|| SqlblobError::NotFound {
        name: name.to_string(),
    })
}

/// Insert a zero-filled blob of `size` bytes. Returns the new row id.
pub async fn allocate(db: &Database, name: &str, size: ZeroBlob) -> Result<i64, SqlblobError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<i64, SqlblobError> {
            conn.execute(
                "INSERT INTO blobs (name, data) VALUES (?1, ?2)",
                params![name, size],
            )?;
            debug!(%name, bytes = size.count(), "blob allocated");
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_call_err)
}

/// Insert a complete blob value. Returns the new row id.
pub async fn insert(db: &Database, name: &str, blob: &Blob) -> Result<i64, SqlblobError> {
    let name = name.to_string();
    let blob = blob.clone();
    db.connection()
        .call(move |conn| -> Result<i64, SqlblobError> {
            conn.execute(
                "INSERT INTO blobs (name, data) VALUES (?1, ?2)",
                params![name, blob],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_call_err)
}

/// Fetch a whole blob value in one statement.
pub async fn get(db: &Database, name: &str) -> Result<Option<Blob>, SqlblobError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Blob>, SqlblobError> {
            Ok(conn
                .query_row(
                    "SELECT data FROM blobs WHERE name = ?1",
                    params![name],
                    |row| row.get(0),
                )
                .optional()?)
        })
        .await
        .map_err(map_call_err)
}

/// Metadata for one blob.
pub async fn find(db: &Database, name: &str) -> Result<Option<BlobEntry>, SqlblobError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| find_sync(conn, &name))
        .await
        .map_err(map_call_err)
}

/// Metadata for every blob, ordered by name.
pub async fn list(db: &Database) -> Result<Vec<BlobEntry>, SqlblobError> {
    db.connection()
        .call(|conn| -> Result<Vec<BlobEntry>, SqlblobError> {
            let mut stmt = conn.prepare(
                "SELECT id, name, length(data), created_at FROM blobs ORDER BY name ASC",
            )?;
            let entries = stmt
                .query_map([], BlobEntry::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(entries)
        })
        .await
        .map_err(map_call_err)
}

/// Delete a blob. Returns whether a row was removed.
pub async fn delete(db: &Database, name: &str) -> Result<bool, SqlblobError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, SqlblobError> {
            let removed = conn.execute("DELETE FROM blobs WHERE name = ?1", params![name])?;
            Ok(removed > 0)
        })
        .await
        .map_err(map_call_err)
}

/// Write `data` into an existing blob from offset 0, `chunk_size` bytes at a time.
///
/// The blob keeps its size: `data` longer than the blob fails with a
/// [`BlobError::Write`](sqlblob_core::BlobError::Write) after the chunks that fit.
pub async fn write_stream(
    db: &Database,
    name: &str,
    data: Vec<u8>,
    chunk_size: usize,
) -> Result<(), SqlblobError> {
    let name = name.to_string();
    let chunk_size = chunk_size.max(1);
    db.connection()
        .call(move |conn| -> Result<(), SqlblobError> {
            let entry = require(conn, &name)?;
            let mut stream = open_blob(conn, &location(entry.id), OpenMode::ReadWrite)?;
            for chunk in data.chunks(chunk_size) {
                stream.write(chunk)?;
            }
            stream.try_close()?;
            Ok(())
        })
        .await
        .map_err(map_call_err)
}

/// Read a whole blob through a stream, `chunk_size` bytes at a time.
pub async fn read_stream(db: &Database, name: &str, chunk_size: usize) -> Result<Blob, SqlblobError> {
    let name = name.to_string();
    let chunk_size = chunk_size.max(1);
    db.connection()
        .call(move |conn| -> Result<Blob, SqlblobError> {
            let entry = require(conn, &name)?;
            let mut stream = open_blob(conn, &location(entry.id), OpenMode::ReadOnly)?;
            let mut out = Vec::with_capacity(entry.size as usize);
            let mut buf = vec![0u8; chunk_size];
            loop {
                let n = stream.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                out.extend_from_slice(&buf[..n]);
            }
            Ok(Blob::new(out))
        })
        .await
        .map_err(map_call_err)
}

/// Store the file at `path` as a new blob named `name`.
///
/// The row is preallocated with a [`ZeroBlob`] of the file's length and filled
/// through a stream, inside one transaction.
pub async fn import_file(
    db: &Database,
    name: &str,
    path: &Path,
    chunk_size: usize,
) -> Result<BlobEntry, SqlblobError> {
    let name = name.to_string();
    let path = path.to_path_buf();
    let chunk_size = chunk_size.max(1);
    db.connection()
        .call(move |conn| -> Result<BlobEntry, SqlblobError> {
            let mut file = File::open(&path)?;
            let len = file.metadata()?.len();

            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO blobs (name, data) VALUES (?1, ?2)",
                params![name, ZeroBlob::new(len)],
            )?;
            let id = tx.last_insert_rowid();

            let mut stream = open_blob(&tx, &location(id), OpenMode::ReadWrite)?;
            let mut buf = vec![0u8; chunk_size];
            loop {
                let n = file.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                stream.write(&buf[..n])?;
            }
            stream.try_close()?;
            drop(stream);

            let entry = require(&tx, &name)?;
            tx.commit()?;
            debug!(%name, bytes = entry.size, path = %path.display(), "file imported");
            Ok(entry)
        })
        .await
        .map_err(map_call_err)
}

/// Write the blob named `name` to a new file at `path`. Returns bytes written.
pub async fn export_file(
    db: &Database,
    name: &str,
    path: &Path,
    chunk_size: usize,
) -> Result<u64, SqlblobError> {
    let name = name.to_string();
    let path = path.to_path_buf();
    let chunk_size = chunk_size.max(1);
    db.connection()
        .call(move |conn| -> Result<u64, SqlblobError> {
            let entry = require(conn, &name)?;
            let mut stream = open_blob(conn, &location(entry.id), OpenMode::ReadOnly)?;
            let mut file = File::create(&path)?;
            let mut buf = vec![0u8; chunk_size];
            let mut written = 0u64;
            loop {
                let n = stream.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                file.write_all(&buf[..n])?;
                written += n as u64;
            }
            file.flush()?;
            debug!(%name, bytes = written, path = %path.display(), "blob exported");
            Ok(written)
        })
        .await
        .map_err(map_call_err)
}
