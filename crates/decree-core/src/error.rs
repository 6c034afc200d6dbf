//! # Error Types
//!
//! Construction and parse failures of core types. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Errors raised by core type constructors.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timestamp string is malformed or not UTC-with-Z.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
