// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for sqlblob integration tests.
//!
//! - [`MockBlobHandle`] - in-memory BLOB handle with scripted engine failures
//!   and call counters
//! - [`TestHarness`] - a [`BlobStore`](sqlblob_storage::BlobStore) on a
//!   temporary on-disk database

pub mod harness;
pub mod mock_handle;

pub use harness::TestHarness;
pub use mock_handle::{MockBlobHandle, MockProbe};
