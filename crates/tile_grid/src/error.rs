//! Error types for grid primitives

use thiserror::Error;

/// Grid errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A `"x,y,elevation"` key could not be parsed
    #[error("Invalid tile key '{key}': {reason}")]
    InvalidCoordKey { key: String, reason: String },

    /// A coordinate component does not fit its packed bit range
    #[error("{axis} = {value} is outside the packable range {min}..={max}")]
    OutOfRange {
        axis: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
}

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;
