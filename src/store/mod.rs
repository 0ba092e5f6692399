//! Embedded document store for atelier
//!
//! A [`ContentApi`] backend on top of sled, used for offline work and as the
//! store behind the test suite.
//!
//! Uses one sled tree per collection:
//! - `media`: media id -> `MediaItem`
//! - `blobs`: media id -> uploaded file bytes
//! - `shows`: record id -> `RunwayShow`
//! - `exhibitions`: record id -> `Exhibition`
//!
//! Documents are encoded with bincode's serde support. Ids come from
//! [`sled::Db::generate_id`], so they are unique across collections.

pub mod error;

pub use error::StoreError;

use std::cmp::Reverse;
use std::path::Path;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sled::{Db, Tree};
use crate::content::{
    ContentApi, ContentError, Exhibition, ExhibitionDraft, ExhibitionPatch, MediaPage, RecordId,
    Result, RunwayShow, ShowDraft, ShowPatch,
};
use crate::focal::FocalPoint;
use crate::media::{CompressedImage, MediaId, MediaItem};
use crate::pagination::{DEFAULT_PAGE_SIZE, page, page_count};

fn encode<T: Serialize>(value: &T) -> std::result::Result<Vec<u8>, StoreError> {
    Ok(bincode::serde::encode_to_vec(value, bincode::config::standard())?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, StoreError> {
    let (value, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(value)
}

/// sled-backed content store
pub struct LocalStore {
    db: Db,
    media: Tree,
    blobs: Tree,
    shows: Tree,
    exhibitions: Tree,
    page_size: usize,
}

impl LocalStore {
    /// Opens or creates a store at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use atelier::store::LocalStore;
    /// let store = LocalStore::open("studio_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database or one of its trees cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self {
            media: db.open_tree("media")?,
            blobs: db.open_tree("blobs")?,
            shows: db.open_tree("shows")?,
            exhibitions: db.open_tree("exhibitions")?,
            db,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Number of media documents per listing page
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn next_id(&self) -> std::result::Result<String, StoreError> {
        Ok(self.db.generate_id()?.to_string())
    }

    fn put<T: Serialize>(tree: &Tree, id: &str, value: &T) -> std::result::Result<(), StoreError> {
        tree.insert(id.as_bytes(), encode(value)?)?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(tree: &Tree, id: &str) -> std::result::Result<Option<T>, StoreError> {
        tree.get(id.as_bytes())?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn all<T: DeserializeOwned>(tree: &Tree) -> std::result::Result<Vec<T>, StoreError> {
        tree.iter()
            .values()
            .map(|value| decode(&value?))
            .collect()
    }

    /// Insert or replace a media document as-is
    ///
    /// Used to seed the store from another backend; uploads go through
    /// [`ContentApi::upload_media`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the write fails.
    pub fn insert_media(&self, item: &MediaItem) -> std::result::Result<(), StoreError> {
        Self::put(&self.media, item.id.as_str(), item)
    }

    /// Get a media document by id
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read or decoding fails.
    pub fn get_media(&self, id: &MediaId) -> std::result::Result<Option<MediaItem>, StoreError> {
        Self::get(&self.media, id.as_str())
    }

    /// Raw bytes of an uploaded file
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read fails.
    pub fn blob(&self, id: &MediaId) -> std::result::Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.get(id.as_str().as_bytes())?.map(|bytes| bytes.to_vec()))
    }

    /// Number of media documents
    #[must_use]
    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Explicitly flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the flush operation fails.
    pub fn flush(&self) -> std::result::Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    /// Remove every document from every collection
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if clearing any tree fails.
    pub fn clear(&self) -> std::result::Result<(), StoreError> {
        self.media.clear()?;
        self.blobs.clear()?;
        self.shows.clear()?;
        self.exhibitions.clear()?;
        Ok(())
    }

    fn slug_taken<T, F>(tree: &Tree, slug: &str, except: Option<&RecordId>, key: F) -> Result<bool>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> (&RecordId, &str),
    {
        let records: Vec<T> = Self::all(tree)?;
        Ok(records.iter().any(|record| {
            let (id, existing) = key(record);
            existing == slug && Some(id) != except
        }))
    }

    fn remove(tree: &Tree, kind: &'static str, id: &str) -> Result<()> {
        if tree.remove(id.as_bytes()).map_err(StoreError::from)?.is_none() {
            return Err(ContentError::NotFound { kind, id: id.to_string() });
        }
        Ok(())
    }
}

impl ContentApi for LocalStore {
    fn list_media(&self, page_number: u32) -> Result<MediaPage> {
        let mut items: Vec<MediaItem> = Self::all(&self.media)?;
        // newest first, undated last
        items.sort_by_key(|item| Reverse(item.created_at));

        let page_number = usize::try_from(page_number).unwrap_or(usize::MAX);
        Ok(MediaPage {
            docs: page(&items, self.page_size, page_number).to_vec(),
            has_next_page: page_number < page_count(items.len(), self.page_size),
        })
    }

    fn upload_media(&self, upload: &CompressedImage) -> Result<MediaItem> {
        let id = self.next_id()?;
        let mut item = MediaItem::new(id.as_str(), format!("/media/{}", upload.file_name))
            .with_created_at(Utc::now());
        item.alt.clone_from(&upload.alt);
        item.filename.clone_from(&upload.file_name);
        item.mime_type = Some(upload.mime_type.clone());
        item.filesize = upload.bytes.len() as u64;
        item.width = upload.width;
        item.height = upload.height;

        self.blobs
            .insert(id.as_bytes(), upload.bytes.as_slice())
            .map_err(StoreError::from)?;
        Self::put(&self.media, &id, &item)?;
        tracing::info!(media = %item.id, file = %item.filename, "stored upload");
        Ok(item)
    }

    fn delete_media(&self, id: &MediaId) -> Result<()> {
        Self::remove(&self.media, "media", id.as_str())?;
        self.blobs.remove(id.as_str().as_bytes()).map_err(StoreError::from)?;
        tracing::info!(media = %id, "deleted media");
        Ok(())
    }

    fn update_focal_point(&self, id: &MediaId, point: FocalPoint) -> Result<()> {
        let mut item = self.get_media(id)?.ok_or_else(|| ContentError::NotFound {
            kind: "media",
            id: id.to_string(),
        })?;
        item.focal_x = point.x().round();
        item.focal_y = point.y().round();
        Self::put(&self.media, id.as_str(), &item)?;
        Ok(())
    }

    fn list_shows(&self) -> Result<Vec<RunwayShow>> {
        let mut shows: Vec<RunwayShow> = Self::all(&self.shows)?;
        shows.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.title.cmp(&b.title)));
        Ok(shows)
    }

    fn create_show(&self, draft: &ShowDraft) -> Result<RunwayShow> {
        let draft = draft.clone().normalize()?;
        if Self::slug_taken(&self.shows, &draft.slug, None, |s: &RunwayShow| (&s.id, s.slug.as_str()))? {
            return Err(ContentError::DuplicateSlug(draft.slug));
        }
        let show = draft.into_show(RecordId::new(self.next_id()?));
        Self::put(&self.shows, show.id.as_str(), &show)?;
        tracing::info!(show = %show.id, slug = %show.slug, "created runway show");
        Ok(show)
    }

    fn update_show(&self, id: &RecordId, patch: &ShowPatch) -> Result<RunwayShow> {
        let mut show: RunwayShow = Self::get(&self.shows, id.as_str())?.ok_or_else(|| {
            ContentError::NotFound { kind: "runway show", id: id.to_string() }
        })?;
        if let Some(slug) = &patch.slug
            && Self::slug_taken(&self.shows, slug, Some(id), |s: &RunwayShow| (&s.id, s.slug.as_str()))?
        {
            return Err(ContentError::DuplicateSlug(slug.clone()));
        }
        patch.apply(&mut show);
        Self::put(&self.shows, id.as_str(), &show)?;
        tracing::info!(show = %id, "updated runway show");
        Ok(show)
    }

    fn delete_show(&self, id: &RecordId) -> Result<()> {
        Self::remove(&self.shows, "runway show", id.as_str())?;
        tracing::info!(show = %id, "deleted runway show");
        Ok(())
    }

    fn list_exhibitions(&self) -> Result<Vec<Exhibition>> {
        let mut exhibitions: Vec<Exhibition> = Self::all(&self.exhibitions)?;
        exhibitions.sort_by(|a, b| {
            b.is_upcoming
                .cmp(&a.is_upcoming)
                .then_with(|| b.year.cmp(&a.year))
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(exhibitions)
    }

    fn create_exhibition(&self, draft: &ExhibitionDraft) -> Result<Exhibition> {
        let draft = draft.clone().normalize()?;
        if Self::slug_taken(&self.exhibitions, &draft.slug, None, |e: &Exhibition| (&e.id, e.slug.as_str()))? {
            return Err(ContentError::DuplicateSlug(draft.slug));
        }
        let exhibition = draft.into_exhibition(RecordId::new(self.next_id()?));
        Self::put(&self.exhibitions, exhibition.id.as_str(), &exhibition)?;
        tracing::info!(exhibition = %exhibition.id, slug = %exhibition.slug, "created exhibition");
        Ok(exhibition)
    }

    fn update_exhibition(&self, id: &RecordId, patch: &ExhibitionPatch) -> Result<Exhibition> {
        let mut exhibition: Exhibition = Self::get(&self.exhibitions, id.as_str())?.ok_or_else(|| {
            ContentError::NotFound { kind: "exhibition", id: id.to_string() }
        })?;
        if let Some(slug) = &patch.slug
            && Self::slug_taken(&self.exhibitions, slug, Some(id), |e: &Exhibition| (&e.id, e.slug.as_str()))?
        {
            return Err(ContentError::DuplicateSlug(slug.clone()));
        }
        patch.apply(&mut exhibition);
        Self::put(&self.exhibitions, id.as_str(), &exhibition)?;
        tracing::info!(exhibition = %id, "updated exhibition");
        Ok(exhibition)
    }

    fn delete_exhibition(&self, id: &RecordId) -> Result<()> {
        Self::remove(&self.exhibitions, "exhibition", id.as_str())?;
        tracing::info!(exhibition = %id, "deleted exhibition");
        Ok(())
    }
}

impl Drop for LocalStore {
    fn drop(&mut self) {
        // Best-effort flush; callers needing durability call flush()
        let _ = self.db.flush();
    }
}
