// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the storage engine capabilities sqlblob consumes.

pub mod blob_handle;

pub use blob_handle::BlobHandle;
