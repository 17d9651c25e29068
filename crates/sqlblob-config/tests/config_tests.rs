// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the sqlblob configuration system.

use std::io::Write;

use sqlblob_config::diagnostic::ConfigError;
use sqlblob_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Every known key deserializes into the model.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[storage]
database_path = "/tmp/blobs.db"
wal_mode = false
busy_timeout_ms = 250

[blob]
chunk_size = 8192

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.storage.database_path, "/tmp/blobs.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.storage.busy_timeout_ms, 250);
    assert_eq!(config.blob.chunk_size, 8192);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert!(config.storage.wal_mode);
    assert_eq!(config.storage.busy_timeout_ms, 5_000);
    assert_eq!(config.blob.chunk_size, 64 * 1024);
    assert_eq!(config.logging.level, "info");
    assert!(config.storage.database_path.ends_with("sqlblob.db"));
}

#[test]
fn unknown_key_gets_suggestion_and_span() {
    let toml = r#"
[blob]
chunk_sise = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown key must be rejected");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("should produce an UnknownKey diagnostic");
    assert_eq!(unknown.0, "chunk_sise");
    assert_eq!(unknown.1.as_deref(), Some("chunk_size"));
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[blobs]\nchunk_size = 1\n").unwrap_err();
    assert!(!errors.is_empty());
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[blob]\nchunk_size = \"big\"\n").unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::InvalidType { key, .. } if key.contains("chunk_size")
    )));
}

#[test]
fn semantic_validation_runs_after_parsing() {
    let errors = load_and_validate_str("[blob]\nchunk_size = 0\n").unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("chunk_size")
    )));
}

#[test]
fn explicit_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[storage]\ndatabase_path = \"/var/tmp/x.db\"").unwrap();

    let config = load_and_validate_path(file.path()).expect("file config should load");
    assert_eq!(config.storage.database_path, "/var/tmp/x.db");
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("typo.toml");

    let errors = load_and_validate_path(&missing).expect_err("missing file must not fall back");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::Other(message) => {
            assert!(message.contains("config file not found"), "{message}");
            assert!(message.contains("typo.toml"), "{message}");
        }
        other => panic!("expected a not-found error, got {other:?}"),
    }

    // A directory is not a config file either.
    assert!(load_and_validate_path(dir.path()).is_err());
}

#[test]
fn config_serializes_back_to_toml() {
    let config = load_config_from_str("[blob]\nchunk_size = 10\n").unwrap();
    let rendered = toml::to_string(&config).unwrap();
    assert!(rendered.contains("chunk_size = 10"));
}
