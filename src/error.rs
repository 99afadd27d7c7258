//! Error types for the indexing core.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    /// Constructor-time: threshold invariants violated, or similar
    /// misconfiguration caught before any I/O happens.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Strict add of an id that is already in the added-id set.
    #[error("document {0} was already added")]
    IdConflict(u32),

    /// Strict add of an id that has been tombstoned.
    #[error("document {0} has been deleted and cannot be re-added")]
    IdTombstoned(u32),

    /// Any blob-store error, with the operation and filename that failed.
    #[error("storage failure during {op} on {name}: {source}")]
    StorageFailure {
        op: &'static str,
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad magic, impossible offsets, or a truncated dictionary on load.
    #[error("corrupt index segment {name}: {reason}")]
    CorruptIndex { name: String, reason: String },

    /// A framing error inside a log byte range.
    #[error("malformed log record in {name} at offset {offset}: {reason}")]
    MalformedLogRecord {
        name: String,
        offset: u64,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IndexError {
    pub fn storage(op: &'static str, name: impl Into<String>, source: std::io::Error) -> Self {
        IndexError::StorageFailure {
            op,
            name: name.into(),
            source,
        }
    }

    pub fn corrupt(name: impl Into<String>, reason: impl Into<String>) -> Self {
        IndexError::CorruptIndex {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
