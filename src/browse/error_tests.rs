//! Unit tests for browse session error types

#[cfg(test)]
mod tests {
    use crate::browse::BrowseError;
    use crate::media::{Quarter, YearKey};

    #[test]
    fn test_unknown_year_message() {
        let error = BrowseError::UnknownYear(YearKey::Year(2019));
        assert_eq!(error.to_string(), "No media uploaded in 2019");
    }

    #[test]
    fn test_empty_quarter_message() {
        let error = BrowseError::EmptyQuarter {
            year: YearKey::Year(2024),
            quarter: Quarter::Q2,
        };
        assert_eq!(error.to_string(), "No media uploaded in Apr – Jun 2024");
    }

    #[test]
    fn test_undated_tab_message() {
        let error = BrowseError::UnknownYear(YearKey::Undated);
        assert_eq!(error.to_string(), "No media uploaded in Undated");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BrowseError>();
    }
}
