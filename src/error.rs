//! Error types for rosterdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

/// Unified error type for rosterdb operations
#[derive(Debug, Error)]
pub enum RosterError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    /// The snapshot bytes are damaged (bad magic, checksum mismatch,
    /// truncation, or an undecodable payload). Recoverable from a backup.
    #[error("Snapshot corrupted: {0}")]
    Corrupted(String),

    /// The snapshot decoded cleanly but does not describe a valid database
    /// (unsupported version, missing sections). Not recoverable from a backup.
    #[error("Invalid snapshot format: {0}")]
    Format(String),

    #[error("Backup recovery failed: {0}")]
    Recovery(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Employee limit reached ({0})")]
    CapacityReached(u32),

    #[error("Employee {0} not found")]
    NotFound(Uuid),

    #[error("Field '{0}' is read-only")]
    ReadOnlyField(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Duplicate employee id {0}")]
    DuplicateId(Uuid),

    // -------------------------------------------------------------------------
    // Query Errors
    // -------------------------------------------------------------------------
    #[error("Invalid operator '{0}'")]
    InvalidOperator(String),

    #[error("Field '{0}' does not exist in any record")]
    UnknownQueryField(String),

    #[error("Cannot compare {lhs} value with {rhs} value")]
    IncomparableTypes {
        lhs: &'static str,
        rhs: &'static str,
    },
}
