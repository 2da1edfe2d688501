//! Core types for compression settings and results.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::{CompressorError, CompressorResult, ImageFormat, validate_config};

pub const DEFAULT_QUALITY: f32 = 0.8;
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;

/// Encoded format requested for the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetFormat {
    /// Re-encode into whatever MIME type the input declared
    Original,
    /// Always re-encode into this format
    Fixed(ImageFormat),
}

impl TargetFormat {
    /// Resolves the concrete output format for one input.
    pub fn resolve(&self, input_mime: &str) -> CompressorResult<ImageFormat> {
        match self {
            Self::Fixed(format) => Ok(*format),
            Self::Original => ImageFormat::from_mime(input_mime).ok_or_else(|| {
                CompressorError::format(format!("Cannot re-encode into input type {input_mime}"))
            }),
        }
    }
}

impl Default for TargetFormat {
    fn default() -> Self {
        Self::Fixed(ImageFormat::JPEG)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Fixed(format) => f.write_str(format.mime_type()),
        }
    }
}

impl FromStr for TargetFormat {
    type Err = CompressorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }
        s.parse().map(Self::Fixed)
    }
}

impl TryFrom<String> for TargetFormat {
    type Error = CompressorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetFormat> for String {
    fn from(value: TargetFormat) -> Self {
        value.to_string()
    }
}

/// Settings for one compression run. Fixed once the batch starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionConfig {
    /// Encoder quality in `[0, 1]`; ignored by lossless formats
    pub quality: f32,
    /// Output encoding
    pub target_format: TargetFormat,
    /// Longest side allowed in the output, in pixels
    pub max_dimension: u32,
}

impl CompressionConfig {
    pub fn new(quality: f32, target_format: TargetFormat, max_dimension: u32) -> CompressorResult<Self> {
        let config = Self { quality, target_format, max_dimension };
        validate_config(&config)?;
        Ok(config)
    }

    /// JPEG encoder quality on the 1..=100 scale.
    pub fn encoder_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            target_format: TargetFormat::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Result of transcoding one image.
///
/// Owns the newly encoded bytes; independent of the input it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputImage {
    /// Name of the source file
    pub original_name: String,
    /// Format the bytes are encoded in
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// Source byte length
    pub original_size_bytes: u64,
    /// Encoded byte length
    pub compressed_size_bytes: u64,
    /// `(original - compressed) / original * 100`, one decimal, negative if the file grew
    pub reduction_percent: f64,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl OutputImage {
    pub fn new(
        original_name: impl Into<String>,
        format: ImageFormat,
        (width, height): (u32, u32),
        original_size_bytes: u64,
        bytes: Vec<u8>,
    ) -> Self {
        let compressed_size_bytes = bytes.len() as u64;
        Self {
            original_name: original_name.into(),
            format,
            width,
            height,
            original_size_bytes,
            compressed_size_bytes,
            reduction_percent: reduction_percent(original_size_bytes, compressed_size_bytes),
            bytes,
        }
    }

    /// Download name offered for this output.
    pub fn suggested_filename(&self) -> String {
        format!("compressed_{}", self.original_name)
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Bytes saved (can be negative if the file grew)
    pub fn saved_bytes(&self) -> i64 {
        self.original_size_bytes as i64 - self.compressed_size_bytes as i64
    }
}

/// Size reduction as a percentage, rounded to one decimal.
///
/// Zero-byte originals report 0.0 rather than dividing by zero.
pub fn reduction_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let percent = (original as f64 - compressed as f64) / original as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}
