//! Error types for the trigger system

use thiserror::Error;

/// Trigger system errors
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Envelope names a type that is not registered
    #[error("Unknown trigger type '{name}' (known types: {})", .known.join(", "))]
    UnknownType { name: String, known: Vec<String> },

    /// Envelope is not `{"type": ..., "data": {...}}`
    #[error("Malformed trigger envelope: {0}")]
    MalformedEnvelope(String),

    /// Data did not match the variant it was encoded or decoded as
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// JSON encoding/decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid trigger configuration: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Grid-level error (bad coordinate key, out of range)
    #[error(transparent)]
    Grid(#[from] tile_grid::GridError),
}

/// Result type for trigger operations
pub type Result<T> = std::result::Result<T, TriggerError>;
