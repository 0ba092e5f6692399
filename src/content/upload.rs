//! Sequential media upload

use std::path::{Path, PathBuf};
use super::{ContentApi, ContentError};
use crate::config::CompressionConfig;
use crate::media::{MediaItem, compress::read_uncompressed, compress_file};

/// A file that could not be uploaded
#[derive(Debug)]
pub struct UploadFailure {
    pub path: PathBuf,
    pub error: ContentError,
}

/// Outcome of an upload batch
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<MediaItem>,
    pub failures: Vec<UploadFailure>,
    /// Bytes saved by compression across the uploaded files
    pub bytes_saved: u64,
}

impl UploadReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn upload_one<A: ContentApi + ?Sized>(
    api: &A,
    path: &Path,
    compression: Option<&CompressionConfig>,
) -> Result<(MediaItem, u64), ContentError> {
    let prepared = match compression {
        Some(config) => compress_file(path, config)?,
        None => read_uncompressed(path)?,
    };
    let saved = prepared.bytes_saved();
    let item = api.upload_media(&prepared)?;
    Ok((item, saved))
}

/// Upload `files` one at a time
///
/// With `compression` set every file is downscaled and re-encoded first. A
/// file that fails is recorded in the report and the batch moves on.
pub fn upload_all<A: ContentApi + ?Sized>(
    api: &A,
    files: &[PathBuf],
    compression: Option<&CompressionConfig>,
) -> UploadReport {
    let mut report = UploadReport::default();
    for (n, path) in files.iter().enumerate() {
        tracing::debug!(file = %path.display(), n = n + 1, total = files.len(), "uploading");
        match upload_one(api, path, compression) {
            Ok((item, saved)) => {
                tracing::info!(file = %path.display(), media = %item.id, saved, "uploaded");
                report.bytes_saved += saved;
                report.uploaded.push(item);
            }
            Err(error) => {
                tracing::warn!(file = %path.display(), %error, "upload failed");
                report.failures.push(UploadFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockContentApi, write_test_image};
    use tempfile::TempDir;

    #[test]
    fn test_upload_continues_past_failures() {
        let dir = TempDir::new().unwrap();
        let good = write_test_image(dir.path(), "look-01.png", 40, 20);
        let missing = dir.path().join("missing.png");
        let other = write_test_image(dir.path(), "look-02.png", 10, 10);

        let api = MockContentApi::new();
        let report = upload_all(&api, &[good, missing.clone(), other], Some(&CompressionConfig::default()));

        assert_eq!(report.uploaded.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, missing);
        assert!(matches!(report.failures[0].error, ContentError::Compress(_)));
        assert!(!report.is_complete());

        let alts: Vec<String> = api.uploads().into_iter().map(|u| u.alt).collect();
        assert_eq!(alts, vec!["look-01", "look-02"]);
    }

    #[test]
    fn test_upload_without_compression_keeps_file() {
        let dir = TempDir::new().unwrap();
        let file = write_test_image(dir.path(), "raw.png", 8, 8);

        let api = MockContentApi::new();
        let report = upload_all(&api, &[file], None);

        assert!(report.is_complete());
        assert_eq!(report.bytes_saved, 0);
        let uploads = api.uploads();
        assert_eq!(uploads[0].file_name, "raw.png");
        assert_eq!(uploads[0].mime_type, "image/png");
    }

    #[test]
    fn test_api_rejection_is_recorded() {
        let dir = TempDir::new().unwrap();
        let file = write_test_image(dir.path(), "a.png", 8, 8);

        let report = upload_all(&MockContentApi::failing(), &[file], None);
        assert!(report.uploaded.is_empty());
        assert!(matches!(report.failures[0].error, ContentError::Status { .. }));
    }
}
