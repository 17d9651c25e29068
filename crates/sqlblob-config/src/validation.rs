// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of configuration values.

use crate::diagnostic::ConfigError;
use crate::model::SqlblobConfig;

/// SQLite's default `SQLITE_MAX_LENGTH`; no single BLOB can exceed it.
pub const MAX_CHUNK_SIZE: usize = 1_000_000_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &SqlblobConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let chunk = config.blob.chunk_size;
    if chunk == 0 {
        errors.push(ConfigError::Validation {
            message: "blob.chunk_size must be at least 1".to_string(),
        });
    } else if chunk > MAX_CHUNK_SIZE {
        errors.push(ConfigError::Validation {
            message: format!("blob.chunk_size must be at most {MAX_CHUNK_SIZE}, got {chunk}"),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SqlblobConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = SqlblobConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "database_path"));
    }

    #[test]
    fn chunk_size_bounds() {
        let mut config = SqlblobConfig::default();
        config.blob.chunk_size = 0;
        assert!(has_error(&validate_config(&config).unwrap_err(), "chunk_size"));

        config.blob.chunk_size = MAX_CHUNK_SIZE + 1;
        assert!(has_error(&validate_config(&config).unwrap_err(), "at most"));

        config.blob.chunk_size = MAX_CHUNK_SIZE;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = SqlblobConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());

        config.logging.level = "verbose".to_string();
        assert!(has_error(&validate_config(&config).unwrap_err(), "logging.level"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = SqlblobConfig::default();
        config.storage.database_path = String::new();
        config.blob.chunk_size = 0;
        config.logging.level = "loud".to_string();
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }
}
