//! Media library browser state
//!
//! Combines the year/quarter index with tab selection and paging, the way the
//! media library screen drives them:
//!
//! ```text
//! load / reload
//!     ↓
//! default tab = newest year, its latest active quarter
//!     ↓
//! ┌─→ select_year    → latest quarter of that year, page 1
//! │   select_quarter → page 1
//! │   next / prev    → page within the visible bucket
//! └── reload         → keep the tab if it still exists, clamp the page
//! ```
//!
//! Any change of the visible bucket resets the page, so a page number can
//! never point past the end of a freshly selected collection.

mod error;

pub use error::BrowseError;

use crate::media::{MediaItem, Quarter, YearKey, YearQuarterIndex};
use crate::pagination::{Pager, page_count};

/// Browse session error type
pub type Result<T> = std::result::Result<T, BrowseError>;

/// Tab and paging state over a grouped media library
#[derive(Debug, Clone)]
pub struct MediaBrowser {
    index: YearQuarterIndex,
    year: Option<YearKey>,
    quarter: Option<Quarter>,
    pager: Pager,
}

impl MediaBrowser {
    /// Group `items` and open the default tab
    #[must_use]
    pub fn new(items: Vec<MediaItem>, page_size: usize) -> Self {
        let mut browser = Self {
            index: YearQuarterIndex::build(items),
            year: None,
            quarter: None,
            pager: Pager::new(page_size),
        };
        browser.select_default();
        browser
    }

    fn select_default(&mut self) {
        if let Some((year, quarter)) = self.index.default_selection() {
            self.year = Some(YearKey::Year(year));
            self.quarter = Some(quarter);
        } else if self.index.has_year(YearKey::Undated) {
            self.year = Some(YearKey::Undated);
            self.quarter = None;
        } else {
            self.year = None;
            self.quarter = None;
        }
        self.pager.reset();
    }

    /// Switch year tab; the year's most recent active quarter becomes visible
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::UnknownYear` if no media falls into `year`.
    pub fn select_year(&mut self, year: YearKey) -> Result<()> {
        if !self.index.has_year(year) {
            return Err(BrowseError::UnknownYear(year));
        }
        self.year = Some(year);
        self.quarter = self.index.latest_quarter(year);
        self.pager.reset();
        Ok(())
    }

    /// Switch quarter tab within the selected year
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::EmptyQuarter` if the quarter has no media in the
    /// selected year, or `BrowseError::UnknownYear` if no year is selected.
    pub fn select_quarter(&mut self, quarter: Quarter) -> Result<()> {
        let year = self.year.ok_or(BrowseError::UnknownYear(YearKey::Undated))?;
        if !self.index.quarters(year).contains(&quarter) {
            return Err(BrowseError::EmptyQuarter { year, quarter });
        }
        self.quarter = Some(quarter);
        self.pager.reset();
        Ok(())
    }

    /// Replace the library contents, e.g. after an upload or delete
    ///
    /// The current tab survives if it still has media; otherwise the default
    /// tab is opened. A page past the new end is pulled back to page 1.
    pub fn reload(&mut self, items: Vec<MediaItem>) {
        self.index = YearQuarterIndex::build(items);

        let still_valid = match (self.year, self.quarter) {
            (Some(YearKey::Year(y)), Some(q)) => self.index.bucket_len(y, q) > 0,
            (Some(YearKey::Undated), _) => self.index.has_year(YearKey::Undated),
            _ => false,
        };

        if still_valid {
            self.pager.clamp_to(self.visible_len());
        } else {
            self.select_default();
        }
    }

    /// Every item of the selected bucket
    #[must_use]
    pub fn visible(&self) -> Vec<&MediaItem> {
        self.year
            .map_or_else(Vec::new, |year| self.index.select(year, self.quarter))
    }

    fn visible_len(&self) -> usize {
        match (self.year, self.quarter) {
            (Some(YearKey::Year(y)), Some(q)) => self.index.bucket_len(y, q),
            (Some(YearKey::Undated), _) => self.index.year_total(YearKey::Undated),
            _ => 0,
        }
    }

    /// Items on the current page of the selected bucket
    #[must_use]
    pub fn page_items(&self) -> Vec<&MediaItem> {
        let visible = self.visible();
        self.pager.slice(&visible).to_vec()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        page_count(self.visible_len(), self.pager.page_size())
    }

    pub fn next_page(&mut self) {
        let len = self.visible_len();
        self.pager.next(len);
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    /// Jump to a page of the selected bucket, clamped to the valid range
    pub fn go_to_page(&mut self, n: usize) {
        let len = self.visible_len();
        self.pager.go_to(n, len);
    }

    /// `"1–50 of 120"` for the selected bucket
    #[must_use]
    pub fn range_label(&self) -> String {
        self.pager.range_label(self.visible_len())
    }

    /// Item count of the selected year across its quarters
    #[must_use]
    pub fn year_total(&self) -> usize {
        self.year.map_or(0, |year| self.index.year_total(year))
    }

    #[must_use]
    pub const fn selected_year(&self) -> Option<YearKey> {
        self.year
    }

    #[must_use]
    pub const fn selected_quarter(&self) -> Option<Quarter> {
        self.quarter
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.pager.current()
    }

    #[must_use]
    pub const fn index(&self) -> &YearQuarterIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::media_at;

    fn library() -> Vec<MediaItem> {
        let mut items = Vec::new();
        for i in 0..7 {
            items.push(media_at(&format!("oct-{i}"), 2024, 10));
        }
        items.push(media_at("jan", 2024, 1));
        items.push(media_at("old", 2023, 6));
        items
    }

    fn page_ids(browser: &MediaBrowser) -> Vec<String> {
        browser.page_items().iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn test_default_tab_is_latest_quarter() {
        let browser = MediaBrowser::new(library(), 3);
        assert_eq!(browser.selected_year(), Some(YearKey::Year(2024)));
        assert_eq!(browser.selected_quarter(), Some(Quarter::Q4));
        assert_eq!(browser.page_count(), 3);
        assert_eq!(page_ids(&browser), vec!["oct-0", "oct-1", "oct-2"]);
        assert_eq!(browser.year_total(), 8);
    }

    #[test]
    fn test_select_quarter_resets_page() {
        let mut browser = MediaBrowser::new(library(), 3);
        browser.next_page();
        browser.next_page();
        assert_eq!(browser.current_page(), 3);

        browser.select_quarter(Quarter::Q1).unwrap();
        assert_eq!(browser.current_page(), 1);
        assert_eq!(page_ids(&browser), vec!["jan"]);
    }

    #[test]
    fn test_select_year_picks_latest_quarter_and_resets_page() {
        let mut browser = MediaBrowser::new(library(), 3);
        browser.next_page();

        browser.select_year(YearKey::Year(2023)).unwrap();
        assert_eq!(browser.selected_quarter(), Some(Quarter::Q2));
        assert_eq!(browser.current_page(), 1);
        assert_eq!(page_ids(&browser), vec!["old"]);
    }

    #[test]
    fn test_invalid_tabs() {
        let mut browser = MediaBrowser::new(library(), 3);
        assert!(matches!(
            browser.select_year(YearKey::Year(1990)),
            Err(BrowseError::UnknownYear(_))
        ));
        assert!(matches!(
            browser.select_quarter(Quarter::Q3),
            Err(BrowseError::EmptyQuarter { .. })
        ));
        // failed selections leave state alone
        assert_eq!(browser.selected_quarter(), Some(Quarter::Q4));
    }

    #[test]
    fn test_reload_clamps_stale_page() {
        let mut browser = MediaBrowser::new(library(), 3);
        browser.go_to_page(3);
        assert_eq!(browser.current_page(), 3);

        let mut shrunk = library();
        shrunk.retain(|m| !matches!(m.id.as_str(), "oct-3" | "oct-4" | "oct-5" | "oct-6"));
        browser.reload(shrunk);

        assert_eq!(browser.selected_quarter(), Some(Quarter::Q4));
        assert_eq!(browser.current_page(), 1);
        assert_eq!(page_ids(&browser).len(), 3);
    }

    #[test]
    fn test_reload_falls_back_when_tab_vanishes() {
        let mut browser = MediaBrowser::new(library(), 3);
        browser.select_year(YearKey::Year(2023)).unwrap();

        let mut without_old = library();
        without_old.retain(|m| m.id.as_str() != "old");
        browser.reload(without_old);

        assert_eq!(browser.selected_year(), Some(YearKey::Year(2024)));
        assert_eq!(browser.selected_quarter(), Some(Quarter::Q4));
    }

    #[test]
    fn test_undated_only_library() {
        let browser = MediaBrowser::new(vec![MediaItem::new("x", "/x.jpg")], 50);
        assert_eq!(browser.selected_year(), Some(YearKey::Undated));
        assert_eq!(page_ids(&browser), vec!["x"]);
        assert_eq!(browser.range_label(), "1–1 of 1");
    }

    #[test]
    fn test_empty_library() {
        let browser = MediaBrowser::new(Vec::new(), 50);
        assert!(browser.selected_year().is_none());
        assert!(browser.page_items().is_empty());
        assert_eq!(browser.page_count(), 0);
    }
}
