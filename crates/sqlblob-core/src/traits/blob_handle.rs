// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Native BLOB handle capability provided by a storage engine binding.

use crate::error::EngineError;

/// An open handle onto one BLOB cell of one row.
///
/// Implementations wrap the engine's incremental BLOB I/O calls. The cell has
/// a fixed length for the lifetime of the handle; the engine itself rejects
/// reads and writes that fall outside it.
pub trait BlobHandle {
    /// Length of the underlying BLOB in bytes.
    fn byte_len(&self) -> u64;

    /// Fill all of `buf` with bytes starting at `offset`.
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<(), EngineError>;

    /// Write all of `data` starting at `offset`.
    ///
    /// Must fail if `offset + data.len()` exceeds [`byte_len`](Self::byte_len).
    /// A handle that accepts such a write leaves the stream's cursor past the
    /// end, where reads report end of BLOB.
    fn write_at(&mut self, data: &[u8], offset: u64) -> Result<(), EngineError>;

    /// Release the native handle.
    fn release(self) -> Result<(), EngineError>
    where
        Self: Sized;
}
