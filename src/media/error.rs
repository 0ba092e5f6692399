//! Media error types

use thiserror::Error;

/// Errors raised while preparing an upload
#[derive(Debug, Error)]
pub enum CompressError {
    /// The source file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a decodable image
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// Re-encoding failed
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
