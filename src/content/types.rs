//! Content records: runway shows, exhibitions and their drafts/patches
//!
//! Domain types are what the rest of the crate works with once a record has
//! passed [`schema`](super::schema) validation. Drafts describe a record to
//! create; patches carry only the fields an update should change.

use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use super::ValidationError;
use crate::media::{MediaId, MediaItem};
use crate::selection::PhotoSequence;

static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("slug separator pattern is valid"));

/// URL-friendly form of a title
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single dash and trims dashes from both ends.
///
/// # Examples
/// ```
/// use atelier::content::slugify;
/// assert_eq!(slugify("Paris Fashion Week 2024!"), "paris-fashion-week-2024");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    SLUG_SEPARATORS
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Identifier of a show or exhibition document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One page of the media listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaPage {
    pub docs: Vec<MediaItem>,
    pub has_next_page: bool,
}

/// Named sub-collection of photos within a runway show
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub photos: PhotoSequence,
}

impl Theme {
    /// An empty theme
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            photos: PhotoSequence::new(),
        }
    }
}

/// A runway show as stored by the content API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayShow {
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    /// Display date, e.g. "September 15, 2024"
    pub date: String,
    pub year: i32,
    pub description: String,
    pub cover_image: MediaId,
    pub themes: Vec<Theme>,
}

impl RunwayShow {
    /// Theme by name, compared case-insensitively
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.name.eq_ignore_ascii_case(name))
    }

    pub fn theme_mut(&mut self, name: &str) -> Option<&mut Theme> {
        self.themes.iter_mut().find(|theme| theme.name.eq_ignore_ascii_case(name))
    }

    /// Every media id the show references, cover first
    #[must_use]
    pub fn referenced_media(&self) -> Vec<&MediaId> {
        std::iter::once(&self.cover_image)
            .chain(self.themes.iter().flat_map(|t| t.photos.iter().map(|p| &p.photo)))
            .collect()
    }
}

/// Where an exhibition takes place
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub city: String,
    pub description: String,
}

/// An exhibition as stored by the content API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub time: String,
    pub year: i32,
    pub venue: Venue,
    pub description: String,
    pub cover_image: MediaId,
    pub is_upcoming: bool,
}

fn require(record: &'static str, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { record, field });
    }
    Ok(())
}

fn require_some(record: &'static str, field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |value| require(record, field, value))
}

/// At least one theme, every theme named, no name used twice
fn check_themes(themes: &[Theme]) -> Result<(), ValidationError> {
    if themes.is_empty() {
        return Err(ValidationError::NoThemes);
    }
    for (position, theme) in themes.iter().enumerate() {
        require("theme", "name", &theme.name)?;
        if themes[..position].iter().any(|t| t.name.trim().eq_ignore_ascii_case(theme.name.trim())) {
            return Err(ValidationError::DuplicateTheme(theme.name.clone()));
        }
    }
    Ok(())
}

/// Fields of a runway show to create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDraft {
    pub title: String,
    /// Derived from the title when left empty
    pub slug: String,
    pub date: String,
    pub year: i32,
    pub description: String,
    pub cover_image: MediaId,
    pub themes: Vec<Theme>,
}

impl ShowDraft {
    /// Fill in a missing slug and check required fields
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a required field is blank or no named
    /// theme is given.
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        const RECORD: &str = "runway show";
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.title);
        }
        require(RECORD, "title", &self.title)?;
        require(RECORD, "slug", &self.slug)?;
        require(RECORD, "date", &self.date)?;
        require(RECORD, "description", &self.description)?;
        require(RECORD, "coverImage", self.cover_image.as_str())?;
        check_themes(&self.themes)?;
        Ok(self)
    }

    /// The stored record this draft becomes under `id`
    #[must_use]
    pub fn into_show(self, id: RecordId) -> RunwayShow {
        RunwayShow {
            id,
            title: self.title,
            slug: self.slug,
            date: self.date,
            year: self.year,
            description: self.description,
            cover_image: self.cover_image,
            themes: self.themes,
        }
    }
}

/// Partial update of a runway show; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<Theme>>,
}

impl ShowPatch {
    /// A patch replacing the theme list
    #[must_use]
    pub fn themes(themes: Vec<Theme>) -> Self {
        Self {
            themes: Some(themes),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.date.is_none()
            && self.year.is_none()
            && self.description.is_none()
            && self.cover_image.is_none()
            && self.themes.is_none()
    }

    /// Check the supplied fields the way a draft's are checked
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a supplied text field is blank, or if the
    /// supplied theme list is empty, has an unnamed theme or repeats a name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        const RECORD: &str = "runway show";
        require_some(RECORD, "title", self.title.as_deref())?;
        require_some(RECORD, "slug", self.slug.as_deref())?;
        require_some(RECORD, "date", self.date.as_deref())?;
        require_some(RECORD, "description", self.description.as_deref())?;
        require_some(RECORD, "coverImage", self.cover_image.as_ref().map(MediaId::as_str))?;
        if let Some(themes) = &self.themes {
            check_themes(themes)?;
        }
        Ok(())
    }

    /// Apply the supplied fields to `show`
    pub fn apply(&self, show: &mut RunwayShow) {
        if let Some(title) = &self.title {
            show.title.clone_from(title);
        }
        if let Some(slug) = &self.slug {
            show.slug.clone_from(slug);
        }
        if let Some(date) = &self.date {
            show.date.clone_from(date);
        }
        if let Some(year) = self.year {
            show.year = year;
        }
        if let Some(description) = &self.description {
            show.description.clone_from(description);
        }
        if let Some(cover) = &self.cover_image {
            show.cover_image = cover.clone();
        }
        if let Some(themes) = &self.themes {
            show.themes.clone_from(themes);
        }
    }
}

/// Fields of an exhibition to create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionDraft {
    pub title: String,
    /// Derived from the title when left empty
    pub slug: String,
    pub date: String,
    pub time: String,
    pub year: i32,
    pub venue: Venue,
    pub description: String,
    pub cover_image: MediaId,
    pub is_upcoming: bool,
}

impl ExhibitionDraft {
    /// Fill in a missing slug and check required fields
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if a required field is blank.
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        const RECORD: &str = "exhibition";
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.title);
        }
        require(RECORD, "title", &self.title)?;
        require(RECORD, "slug", &self.slug)?;
        require(RECORD, "date", &self.date)?;
        require(RECORD, "time", &self.time)?;
        require(RECORD, "description", &self.description)?;
        require(RECORD, "coverImage", self.cover_image.as_str())?;
        require("venue", "name", &self.venue.name)?;
        require("venue", "address", &self.venue.address)?;
        require("venue", "city", &self.venue.city)?;
        require("venue", "description", &self.venue.description)?;
        Ok(self)
    }

    #[must_use]
    pub fn into_exhibition(self, id: RecordId) -> Exhibition {
        Exhibition {
            id,
            title: self.title,
            slug: self.slug,
            date: self.date,
            time: self.time,
            year: self.year,
            venue: self.venue,
            description: self.description,
            cover_image: self.cover_image,
            is_upcoming: self.is_upcoming,
        }
    }
}

/// Partial update of an exhibition; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
}

impl ExhibitionPatch {
    /// A patch flipping only the upcoming flag
    #[must_use]
    pub fn upcoming(is_upcoming: bool) -> Self {
        Self {
            is_upcoming: Some(is_upcoming),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.year.is_none()
            && self.venue.is_none()
            && self.description.is_none()
            && self.cover_image.is_none()
            && self.is_upcoming.is_none()
    }

    /// Check the supplied fields the way a draft's are checked
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if a supplied text field, or any
    /// field of a supplied venue, is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        const RECORD: &str = "exhibition";
        require_some(RECORD, "title", self.title.as_deref())?;
        require_some(RECORD, "slug", self.slug.as_deref())?;
        require_some(RECORD, "date", self.date.as_deref())?;
        require_some(RECORD, "time", self.time.as_deref())?;
        require_some(RECORD, "description", self.description.as_deref())?;
        require_some(RECORD, "coverImage", self.cover_image.as_ref().map(MediaId::as_str))?;
        if let Some(venue) = &self.venue {
            require("venue", "name", &venue.name)?;
            require("venue", "address", &venue.address)?;
            require("venue", "city", &venue.city)?;
            require("venue", "description", &venue.description)?;
        }
        Ok(())
    }

    /// Apply the supplied fields to `exhibition`
    pub fn apply(&self, exhibition: &mut Exhibition) {
        if let Some(title) = &self.title {
            exhibition.title.clone_from(title);
        }
        if let Some(slug) = &self.slug {
            exhibition.slug.clone_from(slug);
        }
        if let Some(date) = &self.date {
            exhibition.date.clone_from(date);
        }
        if let Some(time) = &self.time {
            exhibition.time.clone_from(time);
        }
        if let Some(year) = self.year {
            exhibition.year = year;
        }
        if let Some(venue) = &self.venue {
            exhibition.venue = venue.clone();
        }
        if let Some(description) = &self.description {
            exhibition.description.clone_from(description);
        }
        if let Some(cover) = &self.cover_image {
            exhibition.cover_image = cover.clone();
        }
        if let Some(is_upcoming) = self.is_upcoming {
            exhibition.is_upcoming = is_upcoming;
        }
    }
}
