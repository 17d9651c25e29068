// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for sqlblob.
//!
//! Provides the [`Blob`] and [`ZeroBlob`] value types, the engine-agnostic
//! [`BlobStream`] for incremental BLOB I/O, the [`BlobHandle`] capability a
//! storage binding implements, and the error types shared by the workspace.
//!
//! Enable the `rusqlite` feature for `ToSql`/`FromSql` conversions.

pub mod error;
pub mod stream;
pub mod traits;
pub mod types;

#[cfg(feature = "rusqlite")]
mod sql;

pub use error::{BlobError, EngineError, SqlblobError};
pub use stream::BlobStream;
pub use traits::BlobHandle;
pub use types::{Blob, ZeroBlob};
