//! Picker session state
//!
//! While the photo picker is open the admin toggles candidates in a local
//! selection. Nothing reaches the committed sequence until the session is
//! confirmed; cancelling throws the local selection away.
//!
//! Reordering, removing and re-tagging act on the committed sequence
//! directly, the same way the drag-and-drop strip below the picker does.

use super::{Orientation, PhotoSequence, Result, ThemePhoto};
use crate::media::MediaId;

/// Committed sequence plus the candidate selection of an open picker
#[derive(Debug, Clone, Default)]
pub struct PickerSession {
    committed: PhotoSequence,
    local: Option<Vec<MediaId>>,
}

impl PickerSession {
    /// Start from an existing committed sequence, picker closed
    #[must_use]
    pub const fn new(committed: PhotoSequence) -> Self {
        Self { committed, local: None }
    }

    /// Open the picker; the local selection starts as the committed ids
    pub fn open(&mut self) {
        self.local = Some(self.committed.ids());
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.local.is_some()
    }

    /// Toggle a candidate in the local selection
    ///
    /// Opens the picker first if it is closed. Returns `true` if the id is
    /// selected afterwards.
    pub fn toggle(&mut self, id: MediaId) -> bool {
        let committed = &self.committed;
        let local = self.local.get_or_insert_with(|| committed.ids());
        if let Some(pos) = local.iter().position(|candidate| candidate == &id) {
            local.remove(pos);
            false
        } else {
            local.push(id);
            true
        }
    }

    /// Candidate ids of the open picker
    #[must_use]
    pub fn local(&self) -> Option<&[MediaId]> {
        self.local.as_deref()
    }

    /// Whether `id` is currently marked in the picker
    #[must_use]
    pub fn is_selected(&self, id: &MediaId) -> bool {
        self.local
            .as_ref()
            .map_or_else(|| self.committed.contains(id), |local| local.contains(id))
    }

    /// Commit the local selection and close the picker
    ///
    /// Ids already committed keep their orientation; new ones are vertical.
    /// Confirming a closed picker changes nothing.
    pub fn confirm(&mut self) -> &PhotoSequence {
        if let Some(local) = self.local.take() {
            let photos: Vec<ThemePhoto> = local
                .into_iter()
                .map(|id| {
                    let orientation = self
                        .committed
                        .position(&id)
                        .and_then(|pos| self.committed.get(pos))
                        .map_or_else(Orientation::default, |photo| photo.orientation);
                    ThemePhoto::new(id, orientation)
                })
                .collect();
            self.committed = photos.into();
        }
        &self.committed
    }

    /// Close the picker without touching the committed sequence
    pub fn cancel(&mut self) {
        self.local = None;
    }

    /// See [`PhotoSequence::reorder`]
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::IndexOutOfRange` for positions past the end.
    pub fn reorder(&mut self, from: Option<usize>, to: usize) -> Result<()> {
        self.committed.reorder(from, to)
    }

    /// Remove a photo from the committed sequence
    pub fn remove(&mut self, id: &MediaId) -> bool {
        self.committed.remove(id)
    }

    /// See [`PhotoSequence::set_orientation`]
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::IndexOutOfRange` for positions past the end.
    pub fn set_orientation(&mut self, index: usize, orientation: Orientation) -> Result<()> {
        self.committed.set_orientation(index, orientation)
    }

    #[must_use]
    pub const fn committed(&self) -> &PhotoSequence {
        &self.committed
    }

    /// Give back the committed sequence, dropping any open picker state
    #[must_use]
    pub fn into_committed(self) -> PhotoSequence {
        self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed(ids: &[&str]) -> PhotoSequence {
        PhotoSequence::from_ids(ids.iter().map(|id| MediaId::from(*id)))
    }

    fn ids(sequence: &PhotoSequence) -> Vec<String> {
        sequence.ids().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_open_copies_committed() {
        let mut session = PickerSession::new(committed(&["a", "b"]));
        assert!(!session.is_open());
        session.open();
        assert_eq!(session.local().unwrap(), &[MediaId::from("a"), MediaId::from("b")]);
    }

    #[test]
    fn test_cancel_discards_local() {
        let mut session = PickerSession::new(committed(&["a"]));
        session.open();
        session.toggle("b".into());
        session.toggle("a".into());
        session.cancel();

        assert!(!session.is_open());
        assert_eq!(ids(session.committed()), vec!["a"]);
    }

    #[test]
    fn test_confirm_applies_local_order() {
        let mut session = PickerSession::new(committed(&["a", "b"]));
        session.open();
        session.toggle("a".into());
        session.toggle("c".into());
        session.toggle("a".into());

        let result = session.confirm();
        assert_eq!(ids(result), vec!["b", "c", "a"]);
        assert!(!session.is_open());
    }

    #[test]
    fn test_confirm_keeps_existing_orientation() {
        let mut base = committed(&["a", "b"]);
        base.set_orientation(1, Orientation::Horizontal).unwrap();
        let mut session = PickerSession::new(base);

        session.open();
        session.toggle("c".into());
        let result = session.confirm().clone();

        assert_eq!(result.get(1).unwrap().orientation, Orientation::Horizontal);
        assert_eq!(result.get(2).unwrap().orientation, Orientation::Vertical);
    }

    #[test]
    fn test_confirm_closed_is_noop() {
        let mut session = PickerSession::new(committed(&["a"]));
        assert_eq!(ids(session.confirm()), vec!["a"]);
    }

    #[test]
    fn test_toggle_opens_implicitly() {
        let mut session = PickerSession::new(committed(&["a"]));
        assert!(session.toggle("b".into()));
        assert!(session.is_open());
        assert!(session.is_selected(&"b".into()));
        assert!(!session.committed().contains(&"b".into()));
    }

    #[test]
    fn test_direct_edits_hit_committed() {
        let mut session = PickerSession::new(committed(&["a", "b", "c"]));
        session.reorder(Some(2), 0).unwrap();
        session.set_orientation(0, Orientation::Horizontal).unwrap();
        assert!(session.remove(&"a".into()));

        let sequence = session.into_committed();
        assert_eq!(ids(&sequence), vec!["c", "b"]);
        assert_eq!(sequence.hero().unwrap().orientation, Orientation::Horizontal);
    }
}
