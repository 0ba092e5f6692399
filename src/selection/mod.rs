//! Ordered photo selections for runway show themes
//!
//! A [`PhotoSequence`] is the curated, order-significant list of photos in a
//! theme. Array order is display order and position 0 is the hero. Nothing
//! else about the order is guaranteed.
//!
//! Photos can only enter a sequence through [`PhotoSequence::toggle`], which
//! keeps ids unique. Every operation is synchronous and never panics; bad
//! indices come back as [`SelectionError`].

mod error;
pub mod picker;
pub mod resolve;

pub use error::SelectionError;
pub use picker::PickerSession;
pub use resolve::{Resolution, resolve};

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::media::MediaId;

pub type Result<T> = std::result::Result<T, SelectionError>;

/// Layout tag of a photo within a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Landscape
    Horizontal,
    /// Portrait
    #[default]
    Vertical,
}

impl Orientation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" | "landscape" => Ok(Self::Horizontal),
            "vertical" | "v" | "portrait" => Ok(Self::Vertical),
            other => Err(SelectionError::InvalidOrientation(other.to_string())),
        }
    }
}

/// One entry of a sequence: a media reference plus its orientation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePhoto {
    pub photo: MediaId,
    #[serde(default)]
    pub orientation: Orientation,
}

impl ThemePhoto {
    #[must_use]
    pub const fn new(photo: MediaId, orientation: Orientation) -> Self {
        Self { photo, orientation }
    }
}

/// Order-significant list of unique photos
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ThemePhoto>", into = "Vec<ThemePhoto>")]
pub struct PhotoSequence {
    photos: Vec<ThemePhoto>,
}

impl PhotoSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self { photos: Vec::new() }
    }

    /// Build a sequence from ids, all vertical, dropping repeated ids
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = MediaId>,
    {
        ids.into_iter()
            .map(|id| ThemePhoto::new(id, Orientation::default()))
            .collect::<Vec<_>>()
            .into()
    }

    /// Add `id` with the default orientation, or take it out if present
    ///
    /// Returns `true` if the photo is in the sequence afterwards.
    pub fn toggle(&mut self, id: MediaId) -> bool {
        if let Some(pos) = self.position(&id) {
            self.photos.remove(pos);
            false
        } else {
            self.photos.push(ThemePhoto::new(id, Orientation::default()));
            true
        }
    }

    /// Replace the orientation at `index`
    ///
    /// Order and membership are untouched.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::IndexOutOfRange` if `index` is past the end.
    pub fn set_orientation(&mut self, index: usize, orientation: Orientation) -> Result<()> {
        let len = self.photos.len();
        let photo = self
            .photos
            .get_mut(index)
            .ok_or(SelectionError::IndexOutOfRange { index, len })?;
        photo.orientation = orientation;
        Ok(())
    }

    /// Move the photo at `from` to `to`, shifting the photos in between
    ///
    /// `from == None` is a cancelled drag and does nothing, as does `from == to`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::IndexOutOfRange` if either index is past the end.
    pub fn reorder(&mut self, from: Option<usize>, to: usize) -> Result<()> {
        let Some(from) = from else {
            return Ok(());
        };
        let len = self.photos.len();
        for index in [from, to] {
            if index >= len {
                return Err(SelectionError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let photo = self.photos.remove(from);
        self.photos.insert(to, photo);
        Ok(())
    }

    /// Take `id` out of the sequence; absent ids are ignored
    ///
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, id: &MediaId) -> bool {
        let before = self.photos.len();
        self.photos.retain(|photo| &photo.photo != id);
        self.photos.len() != before
    }

    /// Remove every photo whose id is not in `known`
    ///
    /// Returns the removed ids in their former order.
    pub fn prune(&mut self, known: &HashSet<&MediaId>) -> Vec<MediaId> {
        let mut removed = Vec::new();
        self.photos.retain(|photo| {
            let keep = known.contains(&photo.photo);
            if !keep {
                removed.push(photo.photo.clone());
            }
            keep
        });
        removed
    }

    /// The featured photo at position 0
    #[must_use]
    pub fn hero(&self) -> Option<&ThemePhoto> {
        self.photos.first()
    }

    #[must_use]
    pub fn position(&self, id: &MediaId) -> Option<usize> {
        self.photos.iter().position(|photo| &photo.photo == id)
    }

    #[must_use]
    pub fn contains(&self, id: &MediaId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ThemePhoto> {
        self.photos.get(index)
    }

    /// Ids in display order
    #[must_use]
    pub fn ids(&self) -> Vec<MediaId> {
        self.photos.iter().map(|photo| photo.photo.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ThemePhoto> {
        self.photos.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ThemePhoto] {
        &self.photos
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Keeps the first occurrence of each id
impl From<Vec<ThemePhoto>> for PhotoSequence {
    fn from(photos: Vec<ThemePhoto>) -> Self {
        let mut seen = HashSet::new();
        let total = photos.len();
        let photos: Vec<ThemePhoto> = photos
            .into_iter()
            .filter(|photo| seen.insert(photo.photo.clone()))
            .collect();
        if photos.len() != total {
            tracing::warn!(dropped = total - photos.len(), "duplicate photos dropped from sequence");
        }
        Self { photos }
    }
}

impl From<PhotoSequence> for Vec<ThemePhoto> {
    fn from(sequence: PhotoSequence) -> Self {
        sequence.photos
    }
}

impl<'a> IntoIterator for &'a PhotoSequence {
    type Item = &'a ThemePhoto;
    type IntoIter = std::slice::Iter<'a, ThemePhoto>;

    fn into_iter(self) -> Self::IntoIter {
        self.photos.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(ids: &[&str]) -> PhotoSequence {
        PhotoSequence::from_ids(ids.iter().map(|id| MediaId::from(*id)))
    }

    fn id_strings(sequence: &PhotoSequence) -> Vec<String> {
        sequence.ids().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_toggle_appends_vertical() {
        let mut sequence = PhotoSequence::new();
        assert!(sequence.toggle("a".into()));
        assert!(sequence.toggle("b".into()));

        assert_eq!(id_strings(&sequence), vec!["a", "b"]);
        assert!(sequence.iter().all(|p| p.orientation == Orientation::Vertical));
    }

    #[test]
    fn test_toggle_removes_present() {
        let mut sequence = seq(&["a", "b", "c"]);
        assert!(!sequence.toggle("b".into()));
        assert_eq!(id_strings(&sequence), vec!["a", "c"]);
    }

    #[test]
    fn test_reorder_then_remove_scenario() {
        let mut sequence = seq(&["a", "b"]);
        sequence.reorder(Some(0), 1).unwrap();
        assert_eq!(id_strings(&sequence), vec!["b", "a"]);

        assert!(sequence.remove(&"a".into()));
        assert_eq!(id_strings(&sequence), vec!["b"]);
        assert_eq!(sequence.get(0).unwrap().orientation, Orientation::Vertical);
    }

    #[test]
    fn test_reorder_shifts_intermediate() {
        let mut sequence = seq(&["a", "b", "c", "d"]);
        sequence.reorder(Some(3), 1).unwrap();
        assert_eq!(id_strings(&sequence), vec!["a", "d", "b", "c"]);

        sequence.reorder(Some(0), 3).unwrap();
        assert_eq!(id_strings(&sequence), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_reorder_noops() {
        let mut sequence = seq(&["a", "b"]);
        sequence.reorder(None, 1).unwrap();
        sequence.reorder(Some(1), 1).unwrap();
        assert_eq!(id_strings(&sequence), vec!["a", "b"]);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let mut sequence = seq(&["a", "b"]);
        let err = sequence.reorder(Some(0), 5).unwrap_err();
        assert_eq!(err, SelectionError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(id_strings(&sequence), vec!["a", "b"]);

        assert!(sequence.reorder(Some(2), 0).is_err());
    }

    #[test]
    fn test_set_orientation_only_touches_tag() {
        let mut sequence = seq(&["a", "b"]);
        sequence.set_orientation(1, Orientation::Horizontal).unwrap();

        assert_eq!(id_strings(&sequence), vec!["a", "b"]);
        assert_eq!(sequence.get(0).unwrap().orientation, Orientation::Vertical);
        assert_eq!(sequence.get(1).unwrap().orientation, Orientation::Horizontal);
        assert!(sequence.set_orientation(2, Orientation::Vertical).is_err());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut sequence = seq(&["a"]);
        assert!(!sequence.remove(&"zzz".into()));
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_hero_is_first() {
        let mut sequence = seq(&["a", "b"]);
        assert_eq!(sequence.hero().unwrap().photo.as_str(), "a");
        sequence.reorder(Some(1), 0).unwrap();
        assert_eq!(sequence.hero().unwrap().photo.as_str(), "b");
        assert!(PhotoSequence::new().hero().is_none());
    }

    #[test]
    fn test_duplicates_dropped_on_conversion() {
        let sequence: PhotoSequence = vec![
            ThemePhoto::new("a".into(), Orientation::Horizontal),
            ThemePhoto::new("b".into(), Orientation::Vertical),
            ThemePhoto::new("a".into(), Orientation::Vertical),
        ]
        .into();
        assert_eq!(id_strings(&sequence), vec!["a", "b"]);
        assert_eq!(sequence.get(0).unwrap().orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_prune_unknown() {
        let mut sequence = seq(&["a", "gone", "b"]);
        let a = MediaId::from("a");
        let b = MediaId::from("b");
        let known: HashSet<&MediaId> = [&a, &b].into_iter().collect();

        let removed = sequence.prune(&known);
        assert_eq!(removed, vec![MediaId::from("gone")]);
        assert_eq!(id_strings(&sequence), vec!["a", "b"]);
    }

    #[test]
    fn test_serde_shape() {
        let mut sequence = seq(&["a"]);
        sequence.toggle("b".into());
        sequence.set_orientation(1, Orientation::Horizontal).unwrap();

        let json = serde_json::to_value(&sequence).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"photo": "a", "orientation": "vertical"},
                {"photo": "b", "orientation": "horizontal"}
            ])
        );

        let back: PhotoSequence =
            serde_json::from_str(r#"[{"photo":"x"},{"photo":"x","orientation":"horizontal"}]"#).unwrap();
        assert_eq!(id_strings(&back), vec!["x"]);
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("horizontal".parse::<Orientation>().unwrap(), Orientation::Horizontal);
        assert_eq!("V".parse::<Orientation>().unwrap(), Orientation::Vertical);
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_sequence() -> impl Strategy<Value = PhotoSequence> {
            prop::collection::hash_set("[a-z]{1,4}", 1..20)
                .prop_map(|ids| PhotoSequence::from_ids(ids.into_iter().map(MediaId::from)))
        }

        proptest! {
            #[test]
            fn reorder_is_permutation(sequence in arb_sequence(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
                let from = a.index(sequence.len());
                let to = b.index(sequence.len());
                let mut moved = sequence.clone();
                moved.reorder(Some(from), to).unwrap();

                let mut before = sequence.ids();
                let mut after = moved.ids();
                prop_assert_eq!(after.len(), before.len());
                prop_assert_eq!(&moved.as_slice()[to], &sequence.as_slice()[from]);
                before.sort();
                after.sort();
                prop_assert_eq!(before, after);
            }

            #[test]
            fn double_toggle_keeps_membership_and_order(sequence in arb_sequence(), raw in "[a-z]{1,5}") {
                let id = MediaId::from(raw);
                let mut toggled = sequence.clone();
                toggled.toggle(id.clone());
                toggled.toggle(id.clone());

                let mut members_before = sequence.ids();
                let mut members_after = toggled.ids();
                members_before.sort();
                members_after.sort();
                prop_assert_eq!(members_before, members_after);

                let others = |s: &PhotoSequence| -> Vec<MediaId> {
                    s.ids().into_iter().filter(|other| other != &id).collect()
                };
                prop_assert_eq!(others(&sequence), others(&toggled));
            }

            #[test]
            fn double_toggle_of_new_id_restores_exactly(sequence in arb_sequence()) {
                let mut toggled = sequence.clone();
                let fresh = MediaId::from("NEW-ID");
                toggled.toggle(fresh.clone());
                toggled.toggle(fresh);
                prop_assert_eq!(toggled, sequence);
            }
        }
    }
}
