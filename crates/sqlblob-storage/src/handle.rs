// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`BlobHandle`] capability.
//!
//! Wraps `rusqlite::blob::Blob`, which in turn wraps `sqlite3_blob_*`. A handle
//! borrows its connection, so a stream can never outlive the connection it
//! was opened on.

use rusqlite::blob::Blob as RawBlob;
use rusqlite::{Connection, MAIN_DB};
use sqlblob_core::{BlobHandle, BlobStream, EngineError, SqlblobError};

/// Row and column of one BLOB cell in the `main` schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLocation {
    pub table: String,
    pub column: String,
    pub rowid: i64,
}

impl BlobLocation {
    pub fn new(table: impl Into<String>, column: impl Into<String>, rowid: i64) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            rowid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    ReadOnly,
    ReadWrite,
}

/// An open `sqlite3_blob` handle.
pub struct SqliteBlobHandle<'conn> {
    blob: RawBlob<'conn>,
}

impl<'conn> SqliteBlobHandle<'conn> {
    /// Open the cell at `location`.
    ///
    /// Fails if the row does not exist, the column is not a BLOB or TEXT
    /// value, or a read-write handle is requested on an indexed column.
    pub fn open(
        conn: &'conn Connection,
        location: &BlobLocation,
        mode: OpenMode,
    ) -> Result<Self, SqlblobError> {
        let blob = conn.blob_open(
            MAIN_DB,
            location.table.as_str(),
            location.column.as_str(),
            location.rowid,
            mode == OpenMode::ReadOnly,
        )?;
        Ok(Self { blob })
    }
}

impl BlobHandle for SqliteBlobHandle<'_> {
    fn byte_len(&self) -> u64 {
        self.blob.len() as u64
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<(), EngineError> {
        let offset = to_position(offset)?;
        self.blob.read_at_exact(buf, offset).map_err(engine_error)
    }

    fn write_at(&mut self, data: &[u8], offset: u64) -> Result<(), EngineError> {
        let offset = to_position(offset)?;
        self.blob.write_at(data, offset).map_err(engine_error)
    }

    fn release(self) -> Result<(), EngineError> {
        self.blob.close().map_err(engine_error)
    }
}

/// Open a [`BlobStream`] on the cell at `location`.
pub fn open_blob<'conn>(
    conn: &'conn Connection,
    location: &BlobLocation,
    mode: OpenMode,
) -> Result<BlobStream<SqliteBlobHandle<'conn>>, SqlblobError> {
    SqliteBlobHandle::open(conn, location, mode).map(BlobStream::new)
}

fn to_position(offset: u64) -> Result<usize, EngineError> {
    usize::try_from(offset)
        .map_err(|_| EngineError::new(rusqlite::ffi::SQLITE_TOOBIG, "blob offset out of range"))
}

/// Keep SQLite's extended result code. rusqlite's own bounds check
/// (`BlobSizeError`) reports as `SQLITE_ERROR`, matching what
/// `sqlite3_blob_write` returns for an out-of-range write.
fn engine_error(e: rusqlite::Error) -> EngineError {
    let code = match &e {
        rusqlite::Error::SqliteFailure(err, _) => err.extended_code,
        _ => rusqlite::ffi::SQLITE_ERROR,
    };
    EngineError::new(code, e.to_string())
}
