// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! BLOB value types shared across the sqlblob crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable SQLite BLOB value.
///
/// Produced from BLOB result columns and usable as a bind parameter. The
/// [`Display`](fmt::Display) form is the SQL BLOB literal `x'<hex>'`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blob {
    bytes: Vec<u8>,
}

impl Blob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copy `len` bytes starting at `ptr` into a new `Blob`.
    ///
    /// The source region is not retained after this call returns.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null, aligned, and valid for reads of `len` bytes.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        // SAFETY: upheld by the caller.
        let region = unsafe { std::slice::from_raw_parts(ptr, len) };
        Self::from(region)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Lowercase, zero-padded hex of every byte with no separators.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x'{}'", self.to_hex())
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Request for an all-zero BLOB of `count` bytes.
///
/// Bound as a parameter to preallocate storage that is later filled in
/// through a [`crate::BlobStream`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZeroBlob {
    count: u64,
}

impl ZeroBlob {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl From<u64> for ZeroBlob {
    fn from(count: u64) -> Self {
        Self::new(count)
    }
}

/// Negative counts wrap to large unsigned values; binding such a value to a
/// statement fails because it exceeds SQLite's BLOB size limit.
impl From<i64> for ZeroBlob {
    fn from(count: i64) -> Self {
        Self::new(count as u64)
    }
}
