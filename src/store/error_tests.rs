//! Unit tests for local store error types

#[cfg(test)]
mod tests {
    use crate::store::StoreError;
    use std::error::Error;

    #[test]
    fn test_decode_error_from_bad_bytes() {
        let result: Result<(String, usize), _> =
            bincode::serde::decode_from_slice(&[0xFF], bincode::config::standard());
        let error = StoreError::from(result.unwrap_err());
        assert!(error.to_string().starts_with("Error while decoding document"));
    }

    #[test]
    fn test_sled_error_display() {
        let error = StoreError::from(sled::Error::Unsupported("read-only".to_string()));
        let display = format!("{error}");
        assert!(display.contains("Database error"));
        assert!(display.contains("read-only"));
    }

    #[test]
    fn test_error_debug() {
        let error = StoreError::from(sled::Error::ReportableBug("bad page".to_string()));
        let debug = format!("{error:?}");
        assert!(debug.contains("SledError"));
    }

    #[test]
    fn test_error_source() {
        let error = StoreError::from(sled::Error::Unsupported("x".to_string()));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
