//! Pairing a sequence with the media it references
//!
//! Deleting media does not cascade into sequences, so a sequence can point at
//! ids that no longer exist. Those dangling references are reported instead
//! of being dropped silently.

use std::collections::HashMap;
use super::{PhotoSequence, ThemePhoto};
use crate::media::{MediaId, MediaItem};

/// Result of resolving a sequence against the media library
#[derive(Debug, Clone, Default)]
pub struct Resolution<'a> {
    /// Entries whose media exists, in sequence order
    pub photos: Vec<(&'a ThemePhoto, &'a MediaItem)>,
    /// Referenced ids missing from the library, in sequence order
    pub dangling: Vec<MediaId>,
}

impl Resolution<'_> {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dangling.is_empty()
    }

    /// Hero among the resolved photos
    #[must_use]
    pub fn hero(&self) -> Option<&(&ThemePhoto, &MediaItem)> {
        self.photos.first()
    }
}

/// Look up every photo of `sequence` in `media`
#[must_use]
pub fn resolve<'a>(sequence: &'a PhotoSequence, media: &'a [MediaItem]) -> Resolution<'a> {
    let by_id: HashMap<&MediaId, &MediaItem> = media.iter().map(|item| (&item.id, item)).collect();

    let mut resolution = Resolution::default();
    for photo in sequence {
        match by_id.get(&photo.photo) {
            Some(item) => resolution.photos.push((photo, *item)),
            None => resolution.dangling.push(photo.photo.clone()),
        }
    }

    if !resolution.dangling.is_empty() {
        tracing::warn!(
            missing = ?resolution.dangling.iter().map(MediaId::as_str).collect::<Vec<_>>(),
            "sequence references media that no longer exists"
        );
    }

    resolution
}
