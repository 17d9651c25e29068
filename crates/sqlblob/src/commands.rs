// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command writes its human-readable output to `out` so it can be
//! captured in tests.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;
use sqlblob_core::{SqlblobError, ZeroBlob};
use sqlblob_storage::BlobStore;
use tracing::info;

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a file as a new blob.
    Put { name: String, file: PathBuf },
    /// Write a blob out to a file.
    Get { name: String, file: PathBuf },
    /// Print a blob as an SQL literal (x'..').
    Cat { name: String },
    /// List stored blobs.
    Ls,
    /// Delete a blob.
    Rm { name: String },
    /// Preallocate a zero-filled blob of the given size.
    Alloc { name: String, bytes: u64 },
}

pub async fn run(
    command: Command,
    store: &BlobStore,
    out: &mut impl Write,
) -> Result<(), SqlblobError> {
    match command {
        Command::Put { name, file } => {
            let entry = store.import_file(&name, &file).await?;
            info!(name = %entry.name, bytes = entry.size, "stored");
            writeln!(out, "{}\t{} bytes", entry.name, entry.size)?;
        }
        Command::Get { name, file } => {
            let written = store.export_file(&name, &file).await?;
            info!(%name, bytes = written, "exported");
            writeln!(out, "{written} bytes written to {}", file.display())?;
        }
        Command::Cat { name } => {
            let blob = store
                .get(&name)
                .await?
                .ok_or(SqlblobError::NotFound { name })?;
            writeln!(out, "{blob}")?;
        }
        Command::Ls => {
            for entry in store.list().await? {
                writeln!(out, "{}\t{}\t{}", entry.name, entry.size, entry.created_at)?;
            }
        }
        Command::Rm { name } => {
            if !store.delete(&name).await? {
                return Err(SqlblobError::NotFound { name });
            }
            writeln!(out, "removed {name}")?;
        }
        Command::Alloc { name, bytes } => {
            store.allocate(&name, ZeroBlob::new(bytes)).await?;
            writeln!(out, "{name}\t{bytes} bytes (zeroed)")?;
        }
    }
    Ok(())
}
