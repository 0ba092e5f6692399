//! Content API error types
//!
//! # Error Types
//!
//! - **`ContentError`**: a call to the content store failed (transport,
//!   non-2xx status, missing record, rejected record, local backend)
//! - **`ValidationError`**: an externally-sourced record or a draft does not
//!   have the shape the admin tooling relies on
//!
//! Neither is fatal to a session; commands report them and leave in-memory
//! state as it was.

use thiserror::Error;
use crate::media::CompressError;
use crate::store::StoreError;

/// Errors raised by [`ContentApi`](super::ContentApi) implementations
#[derive(Debug, Error)]
pub enum ContentError {
    /// Transport-level failure (connection, timeout, body decoding)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured site URL cannot be used as an API base
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The content store answered with a non-success status
    #[error("Content API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A record or draft failed validation
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },

    /// Another record already uses this slug
    #[error("Slug '{0}' is already in use")]
    DuplicateSlug(String),

    /// Preparing an upload failed
    #[error("Upload preparation failed: {0}")]
    Compress(#[from] CompressError),

    /// The local document store failed
    #[error("Local store error: {0}")]
    Store(#[from] StoreError),

    /// JSON encoding or decoding failed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A superseded fetch was abandoned
    #[error("Fetch cancelled")]
    Cancelled,
}

/// Shape errors found at the API boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent
    #[error("{record} is missing required field '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    /// A required text field is present but blank
    #[error("{record} field '{field}' must not be empty")]
    EmptyField {
        record: &'static str,
        field: &'static str,
    },

    /// A field holds a value outside its allowed set
    #[error("{record} field '{field}' has invalid value '{value}'")]
    InvalidValue {
        record: &'static str,
        field: &'static str,
        value: String,
    },

    /// A runway show needs at least one theme
    #[error("A runway show needs at least one theme")]
    NoThemes,

    /// Two themes of one show share a name
    #[error("A theme named '{0}' already exists")]
    DuplicateTheme(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
