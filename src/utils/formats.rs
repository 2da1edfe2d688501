use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::utils::CompressorError;

/// Image formats the compressor can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
    GIF,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [Self::JPEG, Self::PNG, Self::WebP, Self::GIF];

    /// MIME type advertised for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::WebP => "image/webp",
            Self::GIF => "image/gif",
        }
    }

    /// Parse a MIME type, case-insensitively. `image/jpg` is accepted as an alias.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::JPEG),
            "image/png" => Some(Self::PNG),
            "image/webp" => Some(Self::WebP),
            "image/gif" => Some(Self::GIF),
            _ => None,
        }
    }

    /// Whether the encoder honours a quality setting for this format.
    ///
    /// Only JPEG is lossy here; the pure-Rust WebP encoder is lossless-only.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::JPEG)
    }

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::WebP => &["webp"],
            Self::GIF => &["gif"],
        }
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }

    /// Codec identifier understood by the `image` crate
    pub fn codec(&self) -> image::ImageFormat {
        match self {
            Self::JPEG => image::ImageFormat::Jpeg,
            Self::PNG => image::ImageFormat::Png,
            Self::WebP => image::ImageFormat::WebP,
            Self::GIF => image::ImageFormat::Gif,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Accepts either a MIME type (`image/png`) or a bare extension (`png`).
impl FromStr for ImageFormat {
    type Err = CompressorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(format) = Self::from_mime(s) {
            return Ok(format);
        }
        Self::ALL
            .into_iter()
            .find(|format| format.matches_extension(s.trim()))
            .ok_or_else(|| CompressorError::format(format!("Unsupported image format: {}", s)))
    }
}

/// Get format from file extension
pub fn format_from_extension(path: &str) -> Result<ImageFormat, CompressorError> {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| CompressorError::format(
            format!("File has no extension: {}", path)
        ))?;

    ImageFormat::ALL
        .into_iter()
        .find(|format| format.matches_extension(ext))
        .ok_or_else(|| CompressorError::format(format!("Unsupported image format: {}", ext)))
}
