//! Image compression before upload
//!
//! Large camera exports are downscaled so their longest side fits
//! `max_dimension` and re-encoded as JPEG. Small images are re-encoded
//! without resizing.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use super::CompressError;
use crate::config::CompressionConfig;

/// An image ready for upload
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// Encoded file contents
    pub bytes: Vec<u8>,
    /// File name to upload under
    pub file_name: String,
    pub mime_type: String,
    /// Alt text derived from the original file name
    pub alt: String,
    /// Size of the source file in bytes
    pub original_size: u64,
    pub width: u32,
    pub height: u32,
}

impl CompressedImage {
    /// Bytes saved compared with the source file (zero if it grew)
    #[must_use]
    pub fn bytes_saved(&self) -> u64 {
        self.original_size.saturating_sub(self.bytes.len() as u64)
    }

    /// Size reduction in whole percent
    #[must_use]
    pub fn savings_percent(&self) -> u8 {
        if self.original_size == 0 {
            return 0;
        }
        let pct = self.bytes_saved().saturating_mul(100) / self.original_size;
        u8::try_from(pct).unwrap_or(100)
    }
}

/// File stem without extension, used as alt text
#[must_use]
pub fn alt_from_file_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read, downscale and re-encode an image file
///
/// # Errors
///
/// Returns `CompressError` if the file cannot be read, decoded or encoded.
pub fn compress_file(path: &Path, config: &CompressionConfig) -> Result<CompressedImage, CompressError> {
    let display = path.display().to_string();
    let raw = fs::read(path).map_err(|source| CompressError::Read {
        path: display.clone(),
        source,
    })?;

    let decoded = image::load_from_memory(&raw).map_err(|source| CompressError::Decode {
        path: display.clone(),
        source,
    })?;

    let resized = fit_within(decoded, config.max_dimension);
    let (width, height) = resized.dimensions();

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), config.quality);
    // JPEG has no alpha channel
    DynamicImage::ImageRgb8(resized.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|source| CompressError::Encode {
            path: display,
            source,
        })?;

    let alt = alt_from_file_name(path);
    let file_name = format!("{}.jpg", if alt.is_empty() { "upload" } else { alt.as_str() });

    tracing::debug!(
        file = %file_name,
        original = raw.len(),
        compressed = bytes.len(),
        width,
        height,
        "compressed image"
    );

    Ok(CompressedImage {
        bytes,
        file_name,
        mime_type: "image/jpeg".to_string(),
        alt,
        original_size: raw.len() as u64,
        width,
        height,
    })
}

/// Read a file as-is for upload, skipping compression
///
/// # Errors
///
/// Returns `CompressError::Read` if the file cannot be read.
pub fn read_uncompressed(path: &Path) -> Result<CompressedImage, CompressError> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| CompressError::Read {
        path: display,
        source,
    })?;
    let (width, height) = image::load_from_memory(&bytes)
        .map(|img| img.dimensions())
        .unwrap_or((0, 0));
    let mime_type = image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string());
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(CompressedImage {
        original_size: bytes.len() as u64,
        bytes,
        file_name,
        mime_type,
        alt: alt_from_file_name(path),
        width,
        height,
    })
}

fn fit_within(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
        return img;
    }
    // resize keeps the aspect ratio and fits inside the box
    img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}
