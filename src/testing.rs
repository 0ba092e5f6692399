//! Testing utilities for atelier
//!
//! This module provides helper types and functions for writing tests:
//! a `TestStore` wrapper around a temporary local store, media fixtures, and
//! a `MockContentApi` that records calls and can be told to fail.
//!
//! Only available when compiled with `cfg(test)`.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use crate::content::{
    ContentApi, ContentError, Exhibition, ExhibitionDraft, ExhibitionPatch, MediaPage, RecordId,
    Result, RunwayShow, ShowDraft, ShowPatch,
};
use crate::focal::FocalPoint;
use crate::media::{CompressedImage, MediaId, MediaItem};
use crate::pagination::{page, page_count};
use crate::store::LocalStore;

/// Temporary local store that is removed on drop
///
/// # Examples
/// ```ignore
/// let test_store = TestStore::new();
/// test_store.store().insert_media(&media_at("a", 2024, 3)).unwrap();
/// assert_eq!(test_store.store().media_count(), 1);
/// ```
pub struct TestStore {
    // dropped before `_dir` so sled closes before the directory goes away
    store: LocalStore,
    _dir: TempDir,
}

impl TestStore {
    /// Open an empty store in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the store cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = LocalStore::open(dir.path().join("db")).expect("Failed to open test store");
        Self { store, _dir: dir }
    }

    /// Like [`new`](Self::new) with a custom listing page size
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        let Self { store, _dir } = Self::new();
        Self {
            store: store.with_page_size(page_size),
            _dir,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &LocalStore {
        &self.store
    }
}

/// Media item uploaded on the 15th of `month` (1-based) at noon UTC
///
/// # Panics
/// Panics if `month` is not in `1..=12`.
#[must_use]
pub fn media_at(id: &str, year: i32, month: u32) -> MediaItem {
    let created_at = Utc
        .with_ymd_and_hms(year, month, 15, 12, 0, 0)
        .single()
        .expect("valid fixture date");
    MediaItem::new(id, format!("/media/{id}.jpg")).with_created_at(created_at)
}

/// Write a solid-colour PNG of the given size into `dir`
///
/// # Panics
/// Panics if the image cannot be written.
#[must_use]
pub fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb([180, 40, 90]))
        .save(&path)
        .expect("Failed to write test image");
    path
}

/// In-memory [`ContentApi`] that records what it was asked to do
///
/// Media listing pages over the seeded items. A failing mock answers every
/// call with a 500 status.
#[derive(Debug, Default)]
pub struct MockContentApi {
    media: Vec<MediaItem>,
    page_size: usize,
    fail: bool,
    pages: RefCell<Vec<u32>>,
    focal: RefCell<Vec<(MediaId, FocalPoint)>>,
    uploads: RefCell<Vec<CompressedImage>>,
    next_id: Cell<u32>,
}

impl MockContentApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_size: 100,
            ..Self::default()
        }
    }

    /// A mock whose every call fails
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// A mock serving `media` from `list_media`
    #[must_use]
    pub fn with_media(media: Vec<MediaItem>) -> Self {
        Self {
            media,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page numbers requested so far, in order
    #[must_use]
    pub fn pages_requested(&self) -> Vec<u32> {
        self.pages.borrow().clone()
    }

    /// Focal point updates accepted so far
    #[must_use]
    pub fn focal_updates(&self) -> Vec<(MediaId, FocalPoint)> {
        self.focal.borrow().clone()
    }

    /// Uploads accepted so far
    #[must_use]
    pub fn uploads(&self) -> Vec<CompressedImage> {
        self.uploads.borrow().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(ContentError::Status {
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }

    fn not_found<T>(kind: &'static str, id: &str) -> Result<T> {
        Err(ContentError::NotFound { kind, id: id.to_string() })
    }
}

impl ContentApi for MockContentApi {
    fn list_media(&self, page_number: u32) -> Result<MediaPage> {
        self.check()?;
        self.pages.borrow_mut().push(page_number);
        let n = page_number as usize;
        Ok(MediaPage {
            docs: page(&self.media, self.page_size, n).to_vec(),
            has_next_page: n < page_count(self.media.len(), self.page_size),
        })
    }

    fn upload_media(&self, upload: &CompressedImage) -> Result<MediaItem> {
        self.check()?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.uploads.borrow_mut().push(upload.clone());
        let mut item = MediaItem::new(format!("upload-{id}"), format!("/media/{}", upload.file_name));
        item.alt.clone_from(&upload.alt);
        Ok(item)
    }

    fn delete_media(&self, id: &MediaId) -> Result<()> {
        self.check()?;
        Self::not_found("media", id.as_str())
    }

    fn update_focal_point(&self, id: &MediaId, point: FocalPoint) -> Result<()> {
        self.check()?;
        self.focal.borrow_mut().push((id.clone(), point));
        Ok(())
    }

    fn list_shows(&self) -> Result<Vec<RunwayShow>> {
        self.check()?;
        Ok(Vec::new())
    }

    fn create_show(&self, draft: &ShowDraft) -> Result<RunwayShow> {
        self.check()?;
        Ok(draft.clone().normalize()?.into_show(RecordId::from("mock-show")))
    }

    fn update_show(&self, id: &RecordId, _patch: &ShowPatch) -> Result<RunwayShow> {
        self.check()?;
        Self::not_found("runway show", id.as_str())
    }

    fn delete_show(&self, id: &RecordId) -> Result<()> {
        self.check()?;
        Self::not_found("runway show", id.as_str())
    }

    fn list_exhibitions(&self) -> Result<Vec<Exhibition>> {
        self.check()?;
        Ok(Vec::new())
    }

    fn create_exhibition(&self, draft: &ExhibitionDraft) -> Result<Exhibition> {
        self.check()?;
        Ok(draft.clone().normalize()?.into_exhibition(RecordId::from("mock-exhibition")))
    }

    fn update_exhibition(&self, id: &RecordId, _patch: &ExhibitionPatch) -> Result<Exhibition> {
        self.check()?;
        Self::not_found("exhibition", id.as_str())
    }

    fn delete_exhibition(&self, id: &RecordId) -> Result<()> {
        self.check()?;
        Self::not_found("exhibition", id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{Bucket, Quarter};

    #[test]
    fn test_store_basic() {
        let test_store = TestStore::new();
        test_store.store().insert_media(&media_at("a", 2024, 3)).unwrap();
        assert_eq!(test_store.store().media_count(), 1);
    }

    #[test]
    fn test_stores_are_isolated() {
        let first = TestStore::new();
        let second = TestStore::new();
        first.store().insert_media(&media_at("a", 2024, 3)).unwrap();
        assert_eq!(second.store().media_count(), 0);
    }

    #[test]
    fn test_media_at_bucket() {
        assert_eq!(
            media_at("x", 2023, 9).bucket(),
            Bucket::Dated { year: 2023, quarter: Quarter::Q3 }
        );
    }

    #[test]
    fn test_mock_records_calls() {
        let api = MockContentApi::new();
        api.update_focal_point(&"a".into(), FocalPoint::default()).unwrap();
        assert_eq!(api.focal_updates().len(), 1);
        assert!(MockContentApi::failing().list_media(1).is_err());
    }
}
