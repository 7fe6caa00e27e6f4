//! Error types for the profiler.

use thiserror::Error;

/// Profiler-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The wrapped interface declares no profiled methods
    #[error("Interface {0} declares no profiled methods")]
    InvalidTarget(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report timestamp could not be formatted
    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Unrecognized time unit name
    #[error("Unknown time unit: {0}")]
    UnknownTimeUnit(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
