//! Date bucketing for the media picker
//!
//! Every upload is filed under a calendar year and one of four fixed
//! three-month spans. Items with no usable timestamp go to an explicit
//! [`Bucket::Undated`] bucket instead of a bogus year.

use std::fmt;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Label used for the undated bucket in year and quarter position
pub const UNDATED_LABEL: &str = "Undated";

/// One of the four fixed calendar quarters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// All quarters in chronological order
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Quarter containing a zero-based month (0 = January)
    ///
    /// Months past 11 saturate to Q4.
    #[must_use]
    pub const fn from_month0(month0: u32) -> Self {
        match month0 / 3 {
            0 => Self::Q1,
            1 => Self::Q2,
            2 => Self::Q3,
            _ => Self::Q4,
        }
    }

    /// Quarter from its 1-based number
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            _ => None,
        }
    }

    /// Zero-based position, usable as an array index
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Q1 => 0,
            Self::Q2 => 1,
            Self::Q3 => 2,
            Self::Q4 => 3,
        }
    }

    /// Display label of the span
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Jan – Mar",
            Self::Q2 => "Apr – Jun",
            Self::Q3 => "Jul – Sep",
            Self::Q4 => "Oct – Dec",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a media item is filed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Dated { year: i32, quarter: Quarter },
    Undated,
}

impl Bucket {
    /// Four-digit year label, or [`UNDATED_LABEL`]
    #[must_use]
    pub fn year_label(&self) -> String {
        match self {
            Self::Dated { year, .. } => format!("{year:04}"),
            Self::Undated => UNDATED_LABEL.to_string(),
        }
    }

    /// Quarter label, or [`UNDATED_LABEL`]
    #[must_use]
    pub const fn quarter_label(&self) -> &'static str {
        match self {
            Self::Dated { quarter, .. } => quarter.label(),
            Self::Undated => UNDATED_LABEL,
        }
    }
}

/// Bucket for an upload timestamp
#[must_use]
pub fn bucket(created_at: Option<DateTime<Utc>>) -> Bucket {
    match created_at {
        Some(ts) => Bucket::Dated {
            year: ts.year(),
            quarter: Quarter::from_month0(ts.month0()),
        },
        None => Bucket::Undated,
    }
}

/// Parse an RFC 3339 timestamp as sent by the content API
///
/// Returns `None` for anything unparseable; callers file such items as undated.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(year: i32, month: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_month_to_quarter() {
        let expected = [
            Quarter::Q1, Quarter::Q1, Quarter::Q1,
            Quarter::Q2, Quarter::Q2, Quarter::Q2,
            Quarter::Q3, Quarter::Q3, Quarter::Q3,
            Quarter::Q4, Quarter::Q4, Quarter::Q4,
        ];
        for (month0, quarter) in expected.iter().enumerate() {
            assert_eq!(Quarter::from_month0(month0 as u32), *quarter);
        }
    }

    #[test]
    fn test_bucket_labels() {
        let b = bucket(Some(ts(2024, 10)));
        assert_eq!(b, Bucket::Dated { year: 2024, quarter: Quarter::Q4 });
        assert_eq!(b.year_label(), "2024");
        assert_eq!(b.quarter_label(), "Oct – Dec");
    }

    #[test]
    fn test_missing_timestamp_is_undated() {
        let b = bucket(None);
        assert_eq!(b, Bucket::Undated);
        assert_eq!(b.year_label(), UNDATED_LABEL);
        assert_eq!(b.quarter_label(), UNDATED_LABEL);
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2024-03-01T08:30:00.000Z").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 3);

        let offset = parse_timestamp("2024-12-31T23:30:00-05:00").unwrap();
        assert_eq!(bucket(Some(offset)), Bucket::Dated { year: 2025, quarter: Quarter::Q1 });

        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_quarter_numbers() {
        assert_eq!(Quarter::from_number(3), Some(Quarter::Q3));
        assert_eq!(Quarter::from_number(0), None);
        assert_eq!(Quarter::from_number(5), None);
        assert_eq!(Quarter::Q4.index(), 3);
    }
}
