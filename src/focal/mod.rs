//! Focal points (crop anchors) for responsive image layouts
//!
//! A focal point is a pair of percentages marking the visually important
//! region of an image; `(50, 50)` is the centre. [`FocalStore`] keeps
//! optimistic in-memory overrides so an edit is visible before the content
//! store confirms it, and rolls the override back when persisting fails.

mod error;

pub use error::FocalError;

use std::collections::HashMap;
use std::fmt;
use crate::content::ContentApi;
use crate::media::{MediaId, MediaItem};

/// Centre of an image, in percent
pub const CENTRE: f64 = 50.0;

/// Clamp a percentage into `[0, 100]`
///
/// NaN maps to the centre.
#[must_use]
pub fn clamp(v: f64) -> f64 {
    if v.is_nan() {
        return CENTRE;
    }
    v.clamp(0.0, 100.0)
}

/// Normalized crop anchor, both axes in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalPoint {
    x: f64,
    y: f64,
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self { x: CENTRE, y: CENTRE }
    }
}

impl FocalPoint {
    /// Create a focal point, clamping both axes
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: clamp(x), y: clamp(y) }
    }

    /// Focal point under a pointer at `(px, py)` inside a `width` × `height` box
    ///
    /// Coordinates are relative to the box's top-left corner. The result is
    /// rounded to whole percent; positions outside the box clamp to its edge.
    /// A degenerate box yields the centre.
    #[must_use]
    pub fn from_pointer(px: f64, py: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        let x = clamp(px / width * 100.0).round();
        let y = clamp(py / height * 100.0).round();
        Self { x, y }
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// CSS `object-position` value, e.g. `"30% 70%"`
    #[must_use]
    pub fn object_position(&self) -> String {
        format!("{}% {}%", self.x, self.y)
    }
}

impl fmt::Display for FocalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}% Y: {}%", self.x, self.y)
    }
}

/// Optimistic focal point overrides keyed by media id
#[derive(Debug, Default)]
pub struct FocalStore {
    overrides: HashMap<MediaId, FocalPoint>,
}

impl FocalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Focal point to render for `item`: the pending override, else the stored value
    #[must_use]
    pub fn effective(&self, item: &MediaItem) -> FocalPoint {
        self.overrides
            .get(&item.id)
            .copied()
            .unwrap_or_else(|| item.focal_point())
    }

    /// Pending override for `id`, if any
    #[must_use]
    pub fn pending(&self, id: &MediaId) -> Option<FocalPoint> {
        self.overrides.get(id).copied()
    }

    /// Number of pending overrides
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Apply an override and persist it through `api`
    ///
    /// The override is visible through [`effective`](Self::effective) as soon
    /// as this is called. If the content store rejects the update the previous
    /// state is restored before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `FocalError::Persist` if the update call fails.
    pub fn commit<A: ContentApi + ?Sized>(
        &mut self,
        api: &A,
        id: &MediaId,
        point: FocalPoint,
    ) -> Result<FocalPoint, FocalError> {
        let previous = self.overrides.insert(id.clone(), point);

        match api.update_focal_point(id, point) {
            Ok(()) => {
                tracing::info!(media = %id, x = point.x(), y = point.y(), "focal point saved");
                Ok(point)
            }
            Err(source) => {
                match previous {
                    Some(old) => {
                        self.overrides.insert(id.clone(), old);
                    }
                    None => {
                        self.overrides.remove(id);
                    }
                }
                tracing::warn!(media = %id, error = %source, "focal point update rolled back");
                Err(FocalError::Persist { id: id.clone(), source })
            }
        }
    }

    /// Drop a pending override without persisting anything
    pub fn discard(&mut self, id: &MediaId) -> Option<FocalPoint> {
        self.overrides.remove(id)
    }

    /// Fold pending overrides into freshly loaded items and clear them
    ///
    /// Overrides for ids that are not in `items` are dropped as well.
    pub fn reconcile(&mut self, items: &mut [MediaItem]) {
        for item in items.iter_mut() {
            if let Some(point) = self.overrides.remove(&item.id) {
                item.focal_x = point.x();
                item.focal_y = point.y();
            }
        }
        self.overrides.clear();
    }
}
