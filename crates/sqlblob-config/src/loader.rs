// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based loader for layered configuration.
//!
//! Lookup order: `/etc/sqlblob/sqlblob.toml`, `~/.config/sqlblob/sqlblob.toml`,
//! `./sqlblob.toml`, then `SQLBLOB_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SqlblobConfig;

pub const SYSTEM_CONFIG_PATH: &str = "/etc/sqlblob/sqlblob.toml";
pub const LOCAL_CONFIG_FILE: &str = "sqlblob.toml";

/// User-level config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sqlblob").join(LOCAL_CONFIG_FILE))
}

/// Build the full layered Figment (defaults < system < user < local < env).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SqlblobConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<SqlblobConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string over the defaults.
pub fn load_config_from_str(toml_content: &str) -> Result<SqlblobConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlblobConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env var overrides.
///
/// Relative paths resolve against the working directory only; parent
/// directories are not searched. A missing file contributes nothing, so
/// callers that require it must check for it first.
pub fn load_config_from_path(path: &Path) -> Result<SqlblobConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlblobConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Map `SQLBLOB_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")`: key names contain
/// underscores (`SQLBLOB_STORAGE_DATABASE_PATH` is `storage.database_path`).
fn env_provider() -> Env {
    Env::prefixed("SQLBLOB_").map(|key| {
        key.as_str()
            .replacen("storage_", "storage.", 1)
            .replacen("blob_", "blob.", 1)
            .replacen("logging_", "logging.", 1)
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SQLBLOB_STORAGE_DATABASE_PATH", "/tmp/env.db");
            jail.set_env("SQLBLOB_BLOB_CHUNK_SIZE", "4096");
            let config: SqlblobConfig = Figment::new()
                .merge(Serialized::defaults(SqlblobConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.storage.database_path, "/tmp/env.db");
            assert_eq!(config.blob.chunk_size, 4096);
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[logging]
level = "debug"
"#,
            )?;
            let config: SqlblobConfig = Figment::new()
                .merge(Serialized::defaults(SqlblobConfig::default()))
                .merge(Toml::file(LOCAL_CONFIG_FILE))
                .extract()?;
            assert_eq!(config.logging.level, "debug");
            assert!(config.storage.wal_mode);
            Ok(())
        });
    }
}
