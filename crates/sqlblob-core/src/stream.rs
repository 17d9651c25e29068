// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Incremental, cursor-based I/O over one open BLOB handle.
//!
//! A [`BlobStream`] is either Open (it owns a handle) or Closed. The transition
//! happens once, through [`BlobStream::close`], [`BlobStream::try_close`], or
//! drop, and the handle is released exactly once. Reads and writes never retry:
//! an engine failure is returned as-is and leaves the cursor where it was.

use std::fmt;
use std::io;

use tracing::debug;

use crate::error::BlobError;
use crate::traits::BlobHandle;

/// Sequential reader/writer over a fixed-size BLOB cell.
pub struct BlobStream<H: BlobHandle> {
    handle: Option<H>,
    offset: u64,
    size: u64,
}

impl<H: BlobHandle> BlobStream<H> {
    /// Take ownership of an open handle. The cursor starts at 0.
    pub fn new(handle: H) -> Self {
        let size = handle.byte_len();
        debug!(size, "blob stream opened");
        Self {
            handle: Some(handle),
            offset: 0,
            size,
        }
    }

    /// Length of the underlying BLOB, fixed while the stream exists.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Current cursor position.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.offset)
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    /// Read up to `buf.len()` bytes at the cursor.
    ///
    /// Returns the number of bytes placed at the front of `buf`, which is
    /// `min(buf.len(), remaining())`. `Ok(0)` at the end of the BLOB.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, BlobError> {
        let (offset, size) = (self.offset, self.size);
        let handle = self.handle.as_mut().ok_or(BlobError::ClosedHandle)?;

        if offset >= size {
            return Ok(0);
        }

        // Bounded by buf.len(), so the cast cannot truncate.
        let count = (size - offset).min(buf.len() as u64) as usize;

        handle
            .read_at(&mut buf[..count], offset)
            .map_err(|e| BlobError::Read {
                code: e.code,
                message: format!(
                    "Error reading SQLite blob: count:{count} offset:{offset} size:{size}: {}",
                    e.message
                ),
            })?;

        self.offset += count as u64;
        Ok(count)
    }

    /// Write all of `data` at the cursor.
    ///
    /// Writing past [`size`](Self::size) is rejected by the engine, not here.
    pub fn write(&mut self, data: &[u8]) -> Result<(), BlobError> {
        let (offset, size) = (self.offset, self.size);
        let handle = self.handle.as_mut().ok_or(BlobError::ClosedHandle)?;

        handle.write_at(data, offset).map_err(|e| BlobError::Write {
            code: e.code,
            message: format!(
                "Error writing SQLite blob: count:{} offset:{offset} size:{size}: {}",
                data.len(),
                e.message
            ),
        })?;

        self.offset += data.len() as u64;
        Ok(())
    }

    /// Release the handle if still open. Safe to call any number of times.
    ///
    /// A failure reported by the engine while releasing is ignored; the stream
    /// is Closed afterwards either way. Use [`try_close`](Self::try_close) to
    /// observe it.
    pub fn close(&mut self) {
        let _ = self.try_close();
    }

    /// Like [`close`](Self::close), but surfaces an engine release failure.
    ///
    /// The stream is Closed after this returns, whatever the result.
    pub fn try_close(&mut self) -> Result<(), BlobError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        debug!(offset = self.offset, size = self.size, "blob stream closed");
        handle.release().map_err(|e| BlobError::Close {
            code: e.code,
            message: format!("Error closing SQLite blob: {}", e.message),
        })
    }
}

impl<H: BlobHandle> Drop for BlobStream<H> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<H: BlobHandle> fmt::Debug for BlobStream<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobStream")
            .field("open", &!self.is_closed())
            .field("offset", &self.offset)
            .field("size", &self.size)
            .finish()
    }
}

impl<H: BlobHandle> io::Read for BlobStream<H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        BlobStream::read(self, buf).map_err(io::Error::other)
    }
}

impl<H: BlobHandle> io::Write for BlobStream<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        BlobStream::write(self, buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
