//! Core error types for focusgarden-core.
//!
//! This module defines the error hierarchy using thiserror. Storage
//! failures are kept separate from validation and session-lifecycle
//! failures so callers can distinguish "the store is unreachable"
//! (which must be surfaced, never defaulted over) from ordinary
//! guard rejections.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusgarden-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Storage-specific errors.
///
/// A `ReadFailed` or `OpenFailed` at startup means real user data may
/// exist but cannot be reached. Callers must report it as a load
/// failure rather than fall back to an empty store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create the data directory
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Read failed
    #[error("Read failed: {0}")]
    ReadFailed(rusqlite::Error),

    /// Write failed
    #[error("Write failed: {0}")]
    WriteFailed(rusqlite::Error),

    /// Stored value could not be decoded
    #[error("Corrupt value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded for storage
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Session lifecycle errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A session already occupies the active slot
    #[error("A session is already active")]
    AlreadyActive,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
