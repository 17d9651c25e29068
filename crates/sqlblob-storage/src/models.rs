// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the `blobs` table.

use serde::{Deserialize, Serialize};

/// Metadata for one stored blob. The content itself is fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobEntry {
    pub id: i64,
    pub name: String,
    pub size: u64,
    pub created_at: String,
}

impl BlobEntry {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            size: row.get::<_, i64>(2)? as u64,
            created_at: row.get(3)?,
        })
    }
}
