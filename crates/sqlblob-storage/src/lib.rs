// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite binding for sqlblob.
//!
//! Provides WAL-mode database setup with embedded migrations, the SQLite
//! [`BlobHandle`](sqlblob_core::BlobHandle) behind [`open_blob`], and named
//! blob operations on the `blobs` table, streamed in configurable chunks.
//!
//! The linked SQLite is selected with the `bundled` (default) or `sqlcipher`
//! feature.

pub mod database;
pub mod handle;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use database::Database;
pub use handle::{BlobLocation, OpenMode, SqliteBlobHandle, open_blob};
pub use models::BlobEntry;
pub use store::BlobStore;
