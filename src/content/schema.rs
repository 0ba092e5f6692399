//! Wire schemas for content API responses
//!
//! The content store returns loosely-typed JSON: ids may be strings or
//! numbers, relationship fields may hold a bare id or a populated document,
//! and optional fields may be missing or `null`. Every response is parsed into
//! the lenient `Raw*` types here and then validated into domain types, so the
//! rest of the crate never sees a half-formed record.
//!
//! Validation fails fast with a [`ValidationError`] for structural problems.
//! An unparseable `createdAt` is not structural: the item is kept, logged,
//! and lands in the undated bucket.

use serde::Deserialize;
use super::types::{Exhibition, RecordId, RunwayShow, Theme, Venue};
use super::ValidationError;
use crate::focal::FocalPoint;
use crate::media::{MediaId, MediaItem, parse_timestamp};
use crate::selection::{Orientation, PhotoSequence, ThemePhoto};

/// Identifier as sent by the store
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Relationship field: either an id or the populated document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireRef {
    Id(WireId),
    Doc { id: WireId },
}

impl WireRef {
    fn into_media_id(self) -> MediaId {
        match self {
            Self::Id(id) | Self::Doc { id } => MediaId::new(id.into_string()),
        }
    }
}

fn required_id(record: &'static str, id: Option<WireId>) -> Result<String, ValidationError> {
    let id = id
        .map(WireId::into_string)
        .ok_or(ValidationError::MissingField { record, field: "id" })?;
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyField { record, field: "id" });
    }
    Ok(id)
}

fn required_text(
    record: &'static str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField { record, field })
}

fn required_ref(
    record: &'static str,
    field: &'static str,
    value: Option<WireRef>,
) -> Result<MediaId, ValidationError> {
    value
        .map(WireRef::into_media_id)
        .ok_or(ValidationError::MissingField { record, field })
}

/// Listing envelope: `{ docs, hasNextPage }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage<T> {
    #[serde(default = "Vec::new")]
    pub docs: Vec<T>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Create/update envelope: `{ doc, message }`
#[derive(Debug, Deserialize)]
pub struct RawDoc<T> {
    pub doc: T,
}

/// Error body: `{ errors: [{ message }] }` or `{ error }`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawErrorBody {
    errors: Vec<RawErrorEntry>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawErrorEntry {
    message: Option<String>,
}

/// Human-readable message from an error response body
///
/// Takes the first `errors[].message`, then `error`; `None` if the body has
/// neither.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let parsed: RawErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .errors
        .into_iter()
        .find_map(|entry| entry.message)
        .or(parsed.error)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMedia {
    pub id: Option<WireId>,
    pub url: Option<String>,
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub alt: Option<String>,
    pub filename: Option<String>,
    pub mime_type: Option<String>,
    pub filesize: Option<u64>,
    pub created_at: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub focal_x: Option<f64>,
    pub focal_y: Option<f64>,
}

impl RawMedia {
    /// Validate into a [`MediaItem`]
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the id is missing, or if the record has
    /// neither a URL nor a CDN key.
    pub fn validate(self) -> Result<MediaItem, ValidationError> {
        const RECORD: &str = "media";
        let id = required_id(RECORD, self.id)?;
        let key = self.key.filter(|key| !key.trim().is_empty());
        // CDN-hosted files may only carry a key; `resolved_url` builds from it
        let url = match (self.url, &key) {
            (Some(url), _) => url,
            (None, Some(_)) => String::new(),
            (None, None) => return Err(ValidationError::MissingField { record: RECORD, field: "url" }),
        };

        let created_at = self.created_at.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                tracing::warn!(media = %id, created_at = raw, "unparseable createdAt, treating as undated");
            }
            parsed
        });

        let centre = FocalPoint::default();
        let focal = FocalPoint::new(
            self.focal_x.unwrap_or(centre.x()),
            self.focal_y.unwrap_or(centre.y()),
        );

        Ok(MediaItem {
            id: MediaId::new(id),
            url,
            key,
            alt: self.alt.unwrap_or_default(),
            filename: self.filename.unwrap_or_default(),
            mime_type: self.mime_type,
            filesize: self.filesize.unwrap_or(0),
            created_at,
            width: self.width.unwrap_or(0),
            height: self.height.unwrap_or(0),
            focal_x: focal.x(),
            focal_y: focal.y(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawThemePhoto {
    pub photo: Option<WireRef>,
    pub orientation: Option<String>,
}

impl RawThemePhoto {
    fn validate(self) -> Result<ThemePhoto, ValidationError> {
        const RECORD: &str = "theme photo";
        let photo = required_ref(RECORD, "photo", self.photo)?;
        let orientation = match self.orientation.as_deref() {
            None | Some("") => Orientation::default(),
            Some(raw) => raw.parse().map_err(|_| ValidationError::InvalidValue {
                record: RECORD,
                field: "orientation",
                value: raw.to_string(),
            })?,
        };
        Ok(ThemePhoto::new(photo, orientation))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTheme {
    pub name: Option<String>,
    pub photos: Option<Vec<RawThemePhoto>>,
}

impl RawTheme {
    fn validate(self) -> Result<Theme, ValidationError> {
        let name = required_text("theme", "name", self.name)?;
        let photos = self
            .photos
            .unwrap_or_default()
            .into_iter()
            .map(RawThemePhoto::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Theme {
            name,
            photos: PhotoSequence::from(photos),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShow {
    pub id: Option<WireId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub cover_image: Option<WireRef>,
    pub themes: Option<Vec<RawTheme>>,
}

impl RawShow {
    /// Validate into a [`RunwayShow`]
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a missing id, title, slug or cover, or
    /// for any malformed theme photo.
    pub fn validate(self) -> Result<RunwayShow, ValidationError> {
        const RECORD: &str = "runway show";
        let id = required_id(RECORD, self.id)?;
        Ok(RunwayShow {
            id: RecordId::new(id),
            title: required_text(RECORD, "title", self.title)?,
            slug: required_text(RECORD, "slug", self.slug)?,
            date: self.date.unwrap_or_default(),
            year: self.year.ok_or(ValidationError::MissingField { record: RECORD, field: "year" })?,
            description: self.description.unwrap_or_default(),
            cover_image: required_ref(RECORD, "coverImage", self.cover_image)?,
            themes: self
                .themes
                .unwrap_or_default()
                .into_iter()
                .map(RawTheme::validate)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawVenue {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawExhibition {
    pub id: Option<WireId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub year: Option<i32>,
    pub venue: Option<RawVenue>,
    pub description: Option<String>,
    pub cover_image: Option<WireRef>,
    pub is_upcoming: Option<bool>,
}

impl RawExhibition {
    /// Validate into an [`Exhibition`]
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a missing id, title, slug, year, venue
    /// name or cover.
    pub fn validate(self) -> Result<Exhibition, ValidationError> {
        const RECORD: &str = "exhibition";
        let id = required_id(RECORD, self.id)?;
        let venue = self
            .venue
            .ok_or(ValidationError::MissingField { record: RECORD, field: "venue" })?;
        Ok(Exhibition {
            id: RecordId::new(id),
            title: required_text(RECORD, "title", self.title)?,
            slug: required_text(RECORD, "slug", self.slug)?,
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            year: self.year.ok_or(ValidationError::MissingField { record: RECORD, field: "year" })?,
            venue: Venue {
                name: required_text("venue", "name", venue.name)?,
                address: venue.address.unwrap_or_default(),
                city: venue.city.unwrap_or_default(),
                description: venue.description.unwrap_or_default(),
            },
            description: self.description.unwrap_or_default(),
            cover_image: required_ref(RECORD, "coverImage", self.cover_image)?,
            is_upcoming: self.is_upcoming.unwrap_or(false),
        })
    }
}
