//! Content API boundary
//!
//! [`ContentApi`] is the seam between the admin logic and wherever the
//! studio's documents live. Two implementations ship with the crate:
//!
//! - [`HttpContentApi`]: the site's REST endpoints over blocking `reqwest`
//! - [`LocalStore`](crate::store::LocalStore): an embedded `sled` store for
//!   offline work and tests
//!
//! Everything that crosses this boundary is validated by [`schema`] first.
//! Update calls take patches with partial-field semantics: only the fields
//! that are set are sent and changed.

pub mod error;
pub mod http;
pub mod schema;
pub mod types;
mod upload;

pub use error::{ContentError, ValidationError};
pub use http::HttpContentApi;
pub use types::{
    Exhibition, ExhibitionDraft, ExhibitionPatch, MediaPage, RecordId, RunwayShow, ShowDraft,
    ShowPatch, Theme, Venue, slugify,
};
pub use upload::{UploadFailure, UploadReport, upload_all};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::focal::FocalPoint;
use crate::media::{CompressedImage, MediaId, MediaItem};

/// Content API result type
pub type Result<T> = std::result::Result<T, ContentError>;

/// Operations the admin tooling needs from the content store
///
/// All calls are synchronous; a caller waits for completion, then updates
/// its in-memory state.
pub trait ContentApi {
    /// One page of media, newest first; pages start at 1
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the request fails or a record is malformed.
    fn list_media(&self, page: u32) -> Result<MediaPage>;

    /// Store a prepared image and return the created record
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the store rejects the upload.
    fn upload_media(&self, upload: &CompressedImage) -> Result<MediaItem>;

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no such media exists.
    fn delete_media(&self, id: &MediaId) -> Result<()>;

    /// Persist `{focalX, focalY}` for one media item
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the update is rejected.
    fn update_focal_point(&self, id: &MediaId, point: FocalPoint) -> Result<()>;

    /// # Errors
    ///
    /// Returns `ContentError` if the request fails or a record is malformed.
    fn list_shows(&self) -> Result<Vec<RunwayShow>>;

    /// # Errors
    ///
    /// Returns `ContentError` if the draft is invalid or its slug is taken.
    fn create_show(&self, draft: &ShowDraft) -> Result<RunwayShow>;

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no such show exists.
    fn update_show(&self, id: &RecordId, patch: &ShowPatch) -> Result<RunwayShow>;

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no such show exists.
    fn delete_show(&self, id: &RecordId) -> Result<()>;

    /// # Errors
    ///
    /// Returns `ContentError` if the request fails or a record is malformed.
    fn list_exhibitions(&self) -> Result<Vec<Exhibition>>;

    /// # Errors
    ///
    /// Returns `ContentError` if the draft is invalid or its slug is taken.
    fn create_exhibition(&self, draft: &ExhibitionDraft) -> Result<Exhibition>;

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no such exhibition exists.
    fn update_exhibition(&self, id: &RecordId, patch: &ExhibitionPatch) -> Result<Exhibition>;

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no such exhibition exists.
    fn delete_exhibition(&self, id: &RecordId) -> Result<()>;

    /// Look a show up by slug
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no show has this slug.
    fn find_show(&self, slug: &str) -> Result<RunwayShow> {
        self.list_shows()?
            .into_iter()
            .find(|show| show.slug == slug)
            .ok_or_else(|| ContentError::NotFound {
                kind: "runway show",
                id: slug.to_string(),
            })
    }
}

/// Flag shared between a fetch and whoever may supersede it
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Load the whole media library, page after page, until the store reports
/// no further page
///
/// The token is checked before every request; once it is cancelled the
/// partial result is discarded.
///
/// # Errors
///
/// Returns `ContentError::Cancelled` if `cancel` fires, or the first error a
/// page request returns.
pub fn fetch_all_media<A: ContentApi + ?Sized>(api: &A, cancel: &CancelToken) -> Result<Vec<MediaItem>> {
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        if cancel.is_cancelled() {
            tracing::debug!(page, "media fetch cancelled");
            return Err(ContentError::Cancelled);
        }
        let batch = api.list_media(page)?;
        tracing::debug!(page, count = batch.docs.len(), more = batch.has_next_page, "fetched media page");
        items.extend(batch.docs);
        if !batch.has_next_page {
            return Ok(items);
        }
        page += 1;
    }
}
