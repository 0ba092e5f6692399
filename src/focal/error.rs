//! Focal point error types

use thiserror::Error;
use crate::content::ContentError;
use crate::media::MediaId;

/// Errors raised while saving a focal point
#[derive(Debug, Error)]
pub enum FocalError {
    /// The content store rejected the update; the override was rolled back
    #[error("Failed to save focal point for {id}: {source}")]
    Persist {
        id: MediaId,
        #[source]
        source: ContentError,
    },
}
