//! Year/quarter grouping of the media library
//!
//! [`YearQuarterIndex`] files a flat list of uploads into
//! `year → quarter → items` in one pass. Items are never sorted: within a
//! bucket they keep the order they arrived in.
//!
//! Display order is deliberately asymmetric. Years run newest first, while the
//! quarters of one year run oldest to newest. The default selection is the
//! last non-empty quarter of the newest year, i.e. the most recently active
//! period.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use super::bucket::{Bucket, Quarter, UNDATED_LABEL};
use super::MediaItem;

/// A year tab: a calendar year or the undated bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearKey {
    Year(i32),
    Undated,
}

impl YearKey {
    /// Parse a tab label: a year number or `undated` (case-insensitive)
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(UNDATED_LABEL) {
            return Some(Self::Undated);
        }
        raw.parse().ok().map(Self::Year)
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year:04}"),
            Self::Undated => f.write_str(UNDATED_LABEL),
        }
    }
}

/// Display order: newest year first, undated last
impl Ord for YearKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Year(a), Self::Year(b)) => b.cmp(a),
            (Self::Year(_), Self::Undated) => Ordering::Less,
            (Self::Undated, Self::Year(_)) => Ordering::Greater,
            (Self::Undated, Self::Undated) => Ordering::Equal,
        }
    }
}

impl PartialOrd for YearKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Positions into the owned item list, one vector per quarter
type QuarterSlots = [Vec<usize>; 4];

/// Media grouped by upload year and quarter
#[derive(Debug, Clone, Default)]
pub struct YearQuarterIndex {
    items: Vec<MediaItem>,
    years: BTreeMap<i32, QuarterSlots>,
    undated: Vec<usize>,
}

impl YearQuarterIndex {
    /// Group `items` in a single pass
    #[must_use]
    pub fn build(items: Vec<MediaItem>) -> Self {
        let mut years: BTreeMap<i32, QuarterSlots> = BTreeMap::new();
        let mut undated = Vec::new();

        for (pos, item) in items.iter().enumerate() {
            match item.bucket() {
                Bucket::Dated { year, quarter } => {
                    years.entry(year).or_default()[quarter.index()].push(pos);
                }
                Bucket::Undated => undated.push(pos),
            }
        }

        if !undated.is_empty() {
            tracing::debug!(count = undated.len(), "media without upload date filed as undated");
        }

        Self { items, years, undated }
    }

    /// All items in their original order
    #[must_use]
    pub fn items_flat(&self) -> &[MediaItem] {
        &self.items
    }

    /// Give back the owned item list
    #[must_use]
    pub fn into_items(self) -> Vec<MediaItem> {
        self.items
    }

    /// Total number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Year tabs in display order: newest year first, undated last if present
    #[must_use]
    pub fn years(&self) -> Vec<YearKey> {
        let mut keys: Vec<YearKey> = self.years.keys().rev().copied().map(YearKey::Year).collect();
        if !self.undated.is_empty() {
            keys.push(YearKey::Undated);
        }
        keys
    }

    /// Whether a year tab exists
    #[must_use]
    pub fn has_year(&self, year: YearKey) -> bool {
        match year {
            YearKey::Year(y) => self.years.contains_key(&y),
            YearKey::Undated => !self.undated.is_empty(),
        }
    }

    /// Non-empty quarters of `year`, oldest first
    ///
    /// The undated tab has no quarters.
    #[must_use]
    pub fn quarters(&self, year: YearKey) -> Vec<Quarter> {
        let YearKey::Year(y) = year else {
            return Vec::new();
        };
        self.years.get(&y).map_or_else(Vec::new, |slots| {
            Quarter::ALL
                .into_iter()
                .filter(|q| !slots[q.index()].is_empty())
                .collect()
        })
    }

    /// Most recent non-empty quarter of `year`
    #[must_use]
    pub fn latest_quarter(&self, year: YearKey) -> Option<Quarter> {
        self.quarters(year).last().copied()
    }

    /// Items of one dated bucket, in input order
    #[must_use]
    pub fn items(&self, year: i32, quarter: Quarter) -> Vec<&MediaItem> {
        self.years
            .get(&year)
            .map_or_else(Vec::new, |slots| self.resolve(&slots[quarter.index()]))
    }

    /// Items without a usable upload date, in input order
    #[must_use]
    pub fn undated(&self) -> Vec<&MediaItem> {
        self.resolve(&self.undated)
    }

    /// Items visible under a tab selection
    ///
    /// A dated year needs a quarter; the undated tab ignores it.
    #[must_use]
    pub fn select(&self, year: YearKey, quarter: Option<Quarter>) -> Vec<&MediaItem> {
        match (year, quarter) {
            (YearKey::Year(y), Some(q)) => self.items(y, q),
            (YearKey::Year(_), None) => Vec::new(),
            (YearKey::Undated, _) => self.undated(),
        }
    }

    /// Number of items in a year tab across all its quarters
    #[must_use]
    pub fn year_total(&self, year: YearKey) -> usize {
        match year {
            YearKey::Year(y) => self
                .years
                .get(&y)
                .map_or(0, |slots| slots.iter().map(Vec::len).sum()),
            YearKey::Undated => self.undated.len(),
        }
    }

    /// Number of items in one dated bucket
    #[must_use]
    pub fn bucket_len(&self, year: i32, quarter: Quarter) -> usize {
        self.years.get(&year).map_or(0, |slots| slots[quarter.index()].len())
    }

    /// The view to open by default: newest year, its latest active quarter
    ///
    /// `None` when no item carries an upload date.
    #[must_use]
    pub fn default_selection(&self) -> Option<(i32, Quarter)> {
        let (&year, _) = self.years.last_key_value()?;
        let quarter = self.latest_quarter(YearKey::Year(year))?;
        Some((year, quarter))
    }

    /// Nested label view: `{ "2024": { "Oct – Dec": [...] } }`
    ///
    /// Undated items appear under [`UNDATED_LABEL`] in both positions.
    #[must_use]
    pub fn labeled(&self) -> BTreeMap<String, BTreeMap<&'static str, Vec<&MediaItem>>> {
        let mut out: BTreeMap<String, BTreeMap<&'static str, Vec<&MediaItem>>> = BTreeMap::new();
        for (year, slots) in &self.years {
            let quarters = out.entry(format!("{year:04}")).or_default();
            for quarter in Quarter::ALL {
                let positions = &slots[quarter.index()];
                if !positions.is_empty() {
                    quarters.insert(quarter.label(), self.resolve(positions));
                }
            }
        }
        if !self.undated.is_empty() {
            out.entry(UNDATED_LABEL.to_string())
                .or_default()
                .insert(UNDATED_LABEL, self.undated());
        }
        out
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&MediaItem> {
        positions.iter().filter_map(|&pos| self.items.get(pos)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::media_at;

    fn scenario() -> YearQuarterIndex {
        YearQuarterIndex::build(vec![
            media_at("item1", 2024, 1),
            media_at("item2", 2024, 3),
            media_at("item3", 2024, 4),
            media_at("item4", 2024, 10),
            media_at("item5", 2024, 10),
        ])
    }

    fn ids(items: &[&MediaItem]) -> Vec<String> {
        items.iter().map(|item| item.id.to_string()).collect()
    }

    #[test]
    fn test_scenario_grouping() {
        let index = scenario();
        let labeled = index.labeled();

        assert_eq!(labeled.len(), 1);
        let year = &labeled["2024"];
        assert_eq!(year.len(), 3);
        assert_eq!(ids(&year["Jan – Mar"]), vec!["item1", "item2"]);
        assert_eq!(ids(&year["Apr – Jun"]), vec!["item3"]);
        assert_eq!(ids(&year["Oct – Dec"]), vec!["item4", "item5"]);
        assert!(!year.contains_key("Jul – Sep"));
    }

    #[test]
    fn test_scenario_default_selection() {
        let index = scenario();
        let (year, quarter) = index.default_selection().unwrap();
        assert_eq!(YearKey::Year(year).to_string(), "2024");
        assert_eq!(quarter.label(), "Oct – Dec");
    }

    #[test]
    fn test_years_newest_first_quarters_oldest_first() {
        let index = YearQuarterIndex::build(vec![
            media_at("a", 2022, 11),
            media_at("b", 2025, 2),
            media_at("c", 2023, 7),
            media_at("d", 2025, 8),
            media_at("e", 2025, 5),
        ]);

        assert_eq!(
            index.years(),
            vec![YearKey::Year(2025), YearKey::Year(2023), YearKey::Year(2022)]
        );
        assert_eq!(
            index.quarters(YearKey::Year(2025)),
            vec![Quarter::Q1, Quarter::Q2, Quarter::Q3]
        );
        assert_eq!(index.default_selection(), Some((2025, Quarter::Q3)));
    }

    #[test]
    fn test_undated_bucket() {
        let index = YearQuarterIndex::build(vec![
            media_at("a", 2024, 1),
            MediaItem::new("b", "/b.jpg"),
        ]);

        assert_eq!(index.years(), vec![YearKey::Year(2024), YearKey::Undated]);
        assert_eq!(ids(&index.undated()), vec!["b"]);
        assert!(index.quarters(YearKey::Undated).is_empty());
        assert_eq!(index.year_total(YearKey::Undated), 1);
        assert_eq!(ids(&index.labeled()["Undated"]["Undated"]), vec!["b"]);
    }

    #[test]
    fn test_only_undated_has_no_default() {
        let index = YearQuarterIndex::build(vec![MediaItem::new("a", "/a.jpg")]);
        assert_eq!(index.default_selection(), None);
        assert_eq!(index.years(), vec![YearKey::Undated]);
    }

    #[test]
    fn test_empty_index() {
        let index = YearQuarterIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.years().is_empty());
        assert_eq!(index.default_selection(), None);
        assert!(index.items(2024, Quarter::Q1).is_empty());
    }

    #[test]
    fn test_select_and_totals() {
        let index = scenario();
        assert_eq!(ids(&index.select(YearKey::Year(2024), Some(Quarter::Q2))), vec!["item3"]);
        assert!(index.select(YearKey::Year(2024), None).is_empty());
        assert_eq!(index.year_total(YearKey::Year(2024)), 5);
        assert_eq!(index.year_total(YearKey::Year(1999)), 0);
        assert_eq!(index.bucket_len(2024, Quarter::Q4), 2);
    }

    #[test]
    fn test_year_key_parse() {
        assert_eq!(YearKey::parse("2024"), Some(YearKey::Year(2024)));
        assert_eq!(YearKey::parse("undated"), Some(YearKey::Undated));
        assert_eq!(YearKey::parse("Undated"), Some(YearKey::Undated));
        assert_eq!(YearKey::parse("twenty"), None);
    }

    #[test]
    fn test_year_key_ordering() {
        let mut keys = vec![YearKey::Undated, YearKey::Year(2020), YearKey::Year(2024)];
        keys.sort();
        assert_eq!(keys, vec![YearKey::Year(2024), YearKey::Year(2020), YearKey::Undated]);
    }

    mod properties {
        use super::*;
        use chrono::{TimeZone, Utc};
        use proptest::prelude::*;

        fn arb_items() -> impl Strategy<Value = Vec<MediaItem>> {
            prop::collection::vec(prop::option::of((2015i32..2030, 1u32..=12)), 1..60).prop_map(
                |dates| {
                    dates
                        .into_iter()
                        .enumerate()
                        .map(|(i, date)| {
                            let item = MediaItem::new(format!("m{i}"), format!("/m{i}.jpg"));
                            match date {
                                Some((year, month)) => item.with_created_at(
                                    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap(),
                                ),
                                None => item,
                            }
                        })
                        .collect()
                },
            )
        }

        proptest! {
            #[test]
            fn grouping_partitions_input(items in arb_items()) {
                let index = YearQuarterIndex::build(items.clone());

                let mut seen: Vec<String> = Vec::new();
                for year in index.years() {
                    match year {
                        YearKey::Year(y) => {
                            for quarter in index.quarters(year) {
                                let bucket = index.items(y, quarter);
                                // stable: bucket order follows input order
                                let positions: Vec<usize> = bucket
                                    .iter()
                                    .map(|m| items.iter().position(|i| i.id == m.id).unwrap())
                                    .collect();
                                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
                                for m in bucket {
                                    prop_assert_eq!(m.bucket(), Bucket::Dated { year: y, quarter });
                                    seen.push(m.id.to_string());
                                }
                            }
                        }
                        YearKey::Undated => {
                            seen.extend(index.undated().iter().map(|m| m.id.to_string()));
                        }
                    }
                }

                let mut expected: Vec<String> = items.iter().map(|m| m.id.to_string()).collect();
                expected.sort();
                seen.sort();
                prop_assert_eq!(seen, expected);
            }
        }
    }
}
