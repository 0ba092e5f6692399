//! Browse session error types

use thiserror::Error;
use crate::media::{Quarter, YearKey};

/// Errors raised by tab selection
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("No media uploaded in {0}")]
    UnknownYear(YearKey),

    #[error("No media uploaded in {quarter} {year}")]
    EmptyQuarter { year: YearKey, quarter: Quarter },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
