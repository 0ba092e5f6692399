//! Unit tests for selection error types

#[cfg(test)]
mod tests {
    use crate::selection::SelectionError;
    use std::error::Error;

    #[test]
    fn test_index_out_of_range_message() {
        let error = SelectionError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            error.to_string(),
            "Position 4 is out of range for a sequence of 2 photo(s)"
        );
    }

    #[test]
    fn test_invalid_orientation_message() {
        let error = SelectionError::InvalidOrientation("diagonal".to_string());
        assert!(error.to_string().contains("diagonal"));
        assert!(error.to_string().contains("horizontal or vertical"));
    }

    #[test]
    fn test_error_source() {
        let error = SelectionError::IndexOutOfRange { index: 0, len: 0 };
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SelectionError>();
    }
}
