// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! sqlblob - store and retrieve files as SQLite BLOBs.
//!
//! Binary entry point: parses arguments, loads configuration, and runs one
//! subcommand against the configured database.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;

use std::path::PathBuf;

use clap::Parser;
use sqlblob_storage::BlobStore;

use crate::commands::Command;

/// sqlblob - store and retrieve files as SQLite BLOBs.
#[derive(Parser, Debug)]
#[command(name = "sqlblob", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => sqlblob_config::load_and_validate_path(path),
        None => sqlblob_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            sqlblob_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let store = BlobStore::new(config.storage, config.blob);
    if let Err(e) = store.initialize().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::run(cli.command, &store, &mut stdout).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set. Output goes to stderr so it never
/// mixes with command output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sqlblob={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
