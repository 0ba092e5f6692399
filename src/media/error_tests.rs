//! Unit tests for media error types

#[cfg(test)]
mod tests {
    use crate::media::CompressError;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_read_error_names_path() {
        let error = CompressError::Read {
            path: "looks/missing.png".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "Failed to read looks/missing.png: not found");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_decode_error_from_garbage() {
        let source = image::load_from_memory(b"not an image").unwrap_err();
        let error = CompressError::Decode {
            path: "notes.txt".to_string(),
            source,
        };
        assert!(error.to_string().starts_with("Failed to decode notes.txt"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompressError>();
    }
}
