//! Image validation and preparation for uploads.
//!
//! Entity images (artist portraits, event promo art) are checked and
//! downscaled on the client before they ever reach object storage: the type
//! allowlist is decided by magic bytes, the size ceiling is enforced on the
//! raw file, and anything larger than the bounding box is resized to fit
//! with its aspect ratio preserved and re-encoded in its original format.

use std::io::{Cursor, Read};
use std::path::Path;

use image::imageops::FilterType;
use uuid::Uuid;

use crate::constants::{IMAGE_MAX_EDGE, UPLOAD_MAX_BYTES};

/// Errors from the upload pipeline. All of them abort the enclosing save;
/// no URL is produced for a rejected or failed image.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Image is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported image type ({hint}), use JPEG, PNG, or WebP")]
    Unsupported { hint: String },

    #[error("Could not read image: {0}")]
    Read(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not encode image: {0}")]
    Encode(String),
}

/// The three accepted input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
}

impl ImageKind {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    fn codec(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Webp => image::ImageFormat::WebP,
        }
    }
}

/// Decide the image type from magic bytes alone. The file extension is
/// never trusted for the allowlist, only echoed in error messages.
pub fn sniff_kind(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF {
        return Some(ImageKind::Jpeg);
    }
    if bytes.len() >= 8 && bytes[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Some(ImageKind::Png);
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(ImageKind::Webp);
    }
    None
}

/// Enforce the size ceiling and the type allowlist.
///
/// `source_path` is only used to guess a MIME hint for the rejection
/// message when the bytes are not a recognized image.
pub fn validate_upload(bytes: &[u8], source_path: &Path) -> Result<ImageKind, MediaError> {
    if bytes.len() > UPLOAD_MAX_BYTES {
        return Err(MediaError::TooLarge {
            size: bytes.len(),
            limit: UPLOAD_MAX_BYTES,
        });
    }
    sniff_kind(bytes).ok_or_else(|| {
        let hint = mime_guess::from_path(source_path).first_or_octet_stream().to_string();
        MediaError::Unsupported { hint }
    })
}

/// Scale `(width, height)` down to fit inside a `max_edge` square, keeping
/// the aspect ratio. Dimensions already inside the box are returned as is;
/// a computed edge never rounds below 1.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }
    let scale = f64::from(max_edge) / f64::from(width.max(height));
    let fitted_w = ((f64::from(width) * scale).round() as u32).max(1);
    let fitted_h = ((f64::from(height) * scale).round() as u32).max(1);
    (fitted_w.min(max_edge), fitted_h.min(max_edge))
}

/// An image that passed the pipeline, ready for upload.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

/// Validate, decode, downscale if needed, and re-encode.
///
/// Images already inside the bounding box are passed through byte for byte.
pub fn prepare(bytes: Vec<u8>, source_path: &Path) -> Result<PreparedImage, MediaError> {
    let kind = validate_upload(&bytes, source_path)?;

    let decoded = image::load_from_memory_with_format(&bytes, kind.codec())
        .map_err(|e| MediaError::Decode(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());
    let (target_w, target_h) = fit_within(width, height, IMAGE_MAX_EDGE);

    if (target_w, target_h) == (width, height) {
        return Ok(PreparedImage {
            bytes,
            kind,
            width,
            height,
            resized: false,
        });
    }

    let scaled = decoded.resize_exact(target_w, target_h, FilterType::Lanczos3);
    let mut out = Vec::new();
    scaled
        .write_to(&mut Cursor::new(&mut out), kind.codec())
        .map_err(|e| MediaError::Encode(e.to_string()))?;

    Ok(PreparedImage {
        bytes: out,
        kind,
        width: target_w,
        height: target_h,
        resized: true,
    })
}

/// Read a file from disk and run the pipeline on it.
pub fn prepare_file(path: &Path) -> Result<PreparedImage, MediaError> {
    let bytes = std::fs::read(path)?;
    prepare(bytes, path)
}

/// Check a file against the upload rules without reading it whole, for
/// submit-time validation in the forms. The longest magic sequence is
/// WebP's twelve bytes.
pub fn validate_file(path: &Path) -> Result<ImageKind, MediaError> {
    let size = std::fs::metadata(path)?.len() as usize;
    if size > UPLOAD_MAX_BYTES {
        return Err(MediaError::TooLarge {
            size,
            limit: UPLOAD_MAX_BYTES,
        });
    }

    let mut prefix = Vec::with_capacity(16);
    std::fs::File::open(path)?.take(16).read_to_end(&mut prefix)?;
    sniff_kind(&prefix).ok_or_else(|| {
        let hint = mime_guess::from_path(path).first_or_octet_stream().to_string();
        MediaError::Unsupported { hint }
    })
}

/// Storage object path for an entity image, unique per upload.
pub fn object_name(folder: &str, entity_id: Uuid, kind: ImageKind) -> String {
    format!("{}/{}-{}.{}", folder, entity_id, Uuid::new_v4(), kind.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg_magic() {
        assert_eq!(sniff_kind(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
    }

    #[test]
    fn test_sniff_rejects_unknown() {
        assert_eq!(sniff_kind(b"GIF89a trailer"), None);
    }

    #[test]
    fn test_fit_within_passes_small_images() {
        assert_eq!(fit_within(300, 200, 500), (300, 200));
    }

    #[test]
    fn test_fit_within_scales_long_edge() {
        assert_eq!(fit_within(1000, 500, 500), (500, 250));
        assert_eq!(fit_within(500, 1000, 500), (250, 500));
    }

    #[test]
    fn test_validate_file_checks_magic_and_size() {
        let dir = std::env::temp_dir().join("usher_test_media");
        let _ = std::fs::create_dir_all(&dir);

        let png = dir.join("good.png");
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 8]);
        std::fs::write(&png, &bytes).unwrap();
        assert_eq!(validate_file(&png).unwrap(), ImageKind::Png);

        let text = dir.join("notes.txt");
        std::fs::write(&text, b"just text").unwrap();
        assert!(matches!(validate_file(&text), Err(MediaError::Unsupported { .. })));

        // A sparse file reports the oversize without writing the bytes
        let huge = dir.join("huge.jpg");
        let file = std::fs::File::create(&huge).unwrap();
        file.set_len(UPLOAD_MAX_BYTES as u64 + 1).unwrap();
        assert!(matches!(validate_file(&huge), Err(MediaError::TooLarge { .. })));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
