//! Error handling for sigdelta-store
//!
//! Wraps sigdelta-core ExError with store-specific helpers

use std::path::Path;

use sigdelta_core::errors::{ExError, ExErrorKind, SigDeltaError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation)
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a parse error for a table, delta or config file
pub fn parse_error(operation: &str, path: &Path, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation)
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create an error for a value that cannot be written out
pub fn encode_error(operation: &str, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation)
        .with_message(err.to_string())
}

/// Create an error for a file extension that maps to no known format
pub fn unsupported_format(operation: &str, path: &Path) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation)
        .with_message(format!(
            "{}: unsupported file extension (expected .json, .yaml or .yml)",
            path.display()
        ))
}

/// Create a delta file validation error
pub fn delta_validation(path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_delta")
        .with_message(format!("{}: {}", path.display(), reason))
}

/// Create a config error
pub fn config_error(path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(format!("{}: {}", path.display(), reason))
}

/// Convert a core error, tagging it with the store operation
pub fn from_core(operation: &str, err: SigDeltaError) -> ExError {
    ExError::from(err).with_op(operation)
}
