//! Media library types
//!
//! A [`MediaItem`] is an uploaded image owned by the content store. Shows and
//! exhibitions never own media; they reference it by [`MediaId`].
//!
//! # Submodules
//!
//! - **`bucket`**: maps an upload timestamp to a (year, quarter) bucket
//! - **`index`**: groups a flat media list into year/quarter buckets
//! - **`compress`**: downscales and re-encodes images before upload

pub mod bucket;
pub mod compress;
mod error;
pub mod index;

pub use bucket::{Bucket, Quarter, bucket, parse_timestamp};
pub use compress::{CompressedImage, compress_file};
pub use error::CompressError;
pub use index::{YearKey, YearQuarterIndex};

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::focal::FocalPoint;

/// Opaque identifier of a media document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    /// Wrap a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MediaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An uploaded image as stored by the content API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: MediaId,
    /// Public URL reported by the content store
    pub url: String,
    /// Object key on the upload CDN, when the file lives there
    pub key: Option<String>,
    pub alt: String,
    pub filename: String,
    pub mime_type: Option<String>,
    /// File size in bytes
    pub filesize: u64,
    /// Upload time; `None` when the record carried no usable timestamp
    pub created_at: Option<DateTime<Utc>>,
    pub width: u32,
    pub height: u32,
    /// Horizontal crop anchor in percent
    pub focal_x: f64,
    /// Vertical crop anchor in percent
    pub focal_y: f64,
}

impl MediaItem {
    /// Create an item with default metadata and a centred focal point
    #[must_use]
    pub fn new(id: impl Into<MediaId>, url: impl Into<String>) -> Self {
        let centre = FocalPoint::default();
        Self {
            id: id.into(),
            url: url.into(),
            key: None,
            alt: String::new(),
            filename: String::new(),
            mime_type: None,
            filesize: 0,
            created_at: None,
            width: 0,
            height: 0,
            focal_x: centre.x(),
            focal_y: centre.y(),
        }
    }

    /// Builder-style setter for the upload time
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// The stored focal point
    #[must_use]
    pub fn focal_point(&self) -> FocalPoint {
        FocalPoint::new(self.focal_x, self.focal_y)
    }

    /// The (year, quarter) bucket this item belongs to
    #[must_use]
    pub fn bucket(&self) -> Bucket {
        bucket(self.created_at)
    }

    /// URL to display the image from
    ///
    /// Files that live on the upload CDN are addressed by their object key;
    /// everything else falls back to the URL the store reported.
    #[must_use]
    pub fn resolved_url(&self, cdn_base: &str) -> String {
        match &self.key {
            Some(key) if !key.is_empty() => {
                format!("{}/{}", cdn_base.trim_end_matches('/'), key)
            }
            _ => self.url.clone(),
        }
    }
}

impl From<MediaId> for String {
    fn from(id: MediaId) -> Self {
        id.0
    }
}
