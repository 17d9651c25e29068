// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for sqlblob.

use std::fmt;

use thiserror::Error;

/// A failure reported by the storage engine for a single BLOB handle call.
///
/// `code` is the engine's (extended) result code, kept verbatim so callers can
/// match on it or print it in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub code: i32,
    pub message: String,
}

impl EngineError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for EngineError {}

/// Errors surfaced by [`crate::BlobStream`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    /// The stream was closed before the call.
    #[error("Blob handle is closed")]
    ClosedHandle,

    /// The engine rejected a bounded read.
    #[error("{message} (code {code})")]
    Read {
        /// Engine result code, extended where the engine provides one.
        code: i32,
        /// Engine message prefixed with the read context.
        message: String,
    },

    /// The engine rejected a write.
    #[error("{message} (code {code})")]
    Write {
        /// Engine result code, extended where the engine provides one.
        code: i32,
        /// Engine message prefixed with the write context.
        message: String,
    },

    /// The engine reported a failure while releasing the handle.
    ///
    /// Only produced by [`crate::BlobStream::try_close`].
    #[error("{message} (code {code})")]
    Close {
        /// Engine result code, extended where the engine provides one.
        code: i32,
        /// Engine message prefixed with the close context.
        message: String,
    },
}

impl BlobError {
    /// The engine result code carried by this error, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            BlobError::ClosedHandle => None,
            BlobError::Read { code, .. }
            | BlobError::Write { code, .. }
            | BlobError::Close { code, .. } => Some(*code),
        }
    }
}

/// The primary error type used across the sqlblob crates.
#[derive(Debug, Error)]
pub enum SqlblobError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        /// The underlying database or I/O error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Incremental BLOB I/O errors.
    #[error("blob error: {0}")]
    Blob(#[from] BlobError),

    /// A named blob does not exist.
    #[error("blob not found: {name}")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for SqlblobError {
    fn from(e: std::io::Error) -> Self {
        SqlblobError::Storage {
            source: Box::new(e),
        }
    }
}

#[cfg(feature = "rusqlite")]
impl From<rusqlite::Error> for SqlblobError {
    fn from(e: rusqlite::Error) -> Self {
        SqlblobError::Storage {
            source: Box::new(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_handle_message_is_stable() {
        assert_eq!(BlobError::ClosedHandle.to_string(), "Blob handle is closed");
        assert_eq!(BlobError::ClosedHandle.code(), None);
    }

    #[test]
    fn engine_code_survives_conversion() {
        let err = BlobError::Read {
            code: 1,
            message: "Error reading SQLite blob: count:4 offset:0 size:4".into(),
        };
        assert_eq!(err.code(), Some(1));
        assert!(err.to_string().contains("count:4"));

        let top: SqlblobError = err.clone().into();
        assert!(matches!(top, SqlblobError::Blob(ref inner) if *inner == err));
    }

    #[test]
    fn engine_error_display_includes_code() {
        let err = EngineError::new(13, "database or disk is full");
        assert_eq!(err.to_string(), "database or disk is full (code 13)");
    }
}
