//! Selection-specific error types
//!
//! Sequence operations are total: instead of panicking on a bad position they
//! hand back one of these.

use thiserror::Error;

/// Errors raised by photo sequence operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A position past the end of the sequence
    #[error("Position {index} is out of range for a sequence of {len} photo(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Unknown orientation name
    #[error("Invalid orientation '{0}' (expected horizontal or vertical)")]
    InvalidOrientation(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
