//! Error types for the image compressor.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use serde::Serialize;
use thiserror::Error;

/// Why a candidate file was refused at selection time.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RejectionReason {
    /// MIME type not in the accepted set
    #[error("Unsupported file type: {mime_type}")]
    UnsupportedType { mime_type: String },
    /// Byte size above the configured maximum
    #[error("File too large: {size_bytes} bytes (limit {max_size_bytes} bytes)")]
    TooLarge { size_bytes: u64, max_size_bytes: u64 },
    /// The file handle could not be read
    #[error("Unreadable file: {message}")]
    Unreadable { message: String },
}

/// Main error type for the compressor.
///
/// Per-item transcoding failures and store or settings errors end up here
/// before reaching the caller. Selection rejections stay [`RejectionReason`].
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum CompressorError {
    /// Input bytes are not a decodable image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Encoder produced no output
    #[error("Encode error: {0}")]
    Encode(String),

    /// Removal index outside the store
    #[error("Index {index} out of range for selection of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid compression configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Unknown or unsupported image format
    #[error("Format error: {0}")]
    Format(String),

    /// Settings store could not be read or written
    #[error("Settings error: {0}")]
    Settings(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Item exceeded the per-item time budget
    #[error("Timed out after {0} ms")]
    Timeout(u64),

    /// Batch was cancelled before this item was attempted
    #[error("Cancelled before processing")]
    Cancelled,

    /// Background task failed to complete
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Convenience result type for compressor operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

// Helper methods for error creation
impl CompressorError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn settings<T: Into<String>>(msg: T) -> Self {
        Self::Settings(msg.into())
    }

    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }
}

// Convert std::io::Error to CompressorError
impl From<io::Error> for CompressorError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

impl From<serde_json::Error> for CompressorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Settings(err.to_string())
    }
}
