//! Local store error types
//!
//! # Error Types
//!
//! - **`SledError`**: errors from the underlying sled embedded database
//! - **`DecodeError`**: failures when deserializing a stored document
//! - **`EncodeError`**: failures when serializing a document for storage
//!
//! Not-found and duplicate-slug conditions are reported as
//! [`ContentError`](crate::content::ContentError) variants, since callers see
//! the store only through the content API.

use thiserror::Error;

/// Local store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding document: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding document: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
