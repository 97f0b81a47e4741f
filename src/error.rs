//! Error types for flatdb
//!
//! Provides a unified error type for all operations.
//!
//! Everything except [`FlatError::VersionMismatch`] and
//! [`FlatError::CorruptData`] is an expected condition that a front end can
//! report and carry on from. Those two mean a persisted table cannot be
//! understood, and there is no migration path.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Key;

/// Result type alias using FlatError
pub type Result<T> = std::result::Result<T, FlatError>;

/// Unified error type for flatdb operations
#[derive(Debug, Error)]
pub enum FlatError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unrecognized table file extension: {0}")]
    UnrecognizedExtension(String),

    // -------------------------------------------------------------------------
    // Call-site Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Expected {expected} fields but got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("There already exists a record with key {0}")]
    DuplicateKey(Key),

    #[error("No record found with key {0}")]
    KeyNotFound(Key),

    #[error("No column named {0}")]
    UnknownColumn(String),

    #[error("Already a column named {0}")]
    DuplicateColumn(String),

    // -------------------------------------------------------------------------
    // Database Errors
    // -------------------------------------------------------------------------
    #[error("Table {0} already in database")]
    DuplicateTable(String),

    #[error("No table {0} in database")]
    TableNotFound(String),

    // -------------------------------------------------------------------------
    // Format Errors (fatal)
    // -------------------------------------------------------------------------
    #[error("Unsupported table format version: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },

    #[error("Corrupt table data: {0}")]
    CorruptData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FlatError {
    /// Whether this error means persisted data could not be understood.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FlatError::VersionMismatch { .. } | FlatError::CorruptData(_)
        )
    }
}
