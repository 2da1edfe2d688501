// src/processing/transcoder/formats.rs

//! Encodes a raster into the requested output format.
//!
//! Only JPEG honours the quality setting. PNG, WebP (lossless-only in pure
//! Rust) and GIF ignore it.

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, Frame};
use tracing::trace;
use crate::utils::{CompressorError, ImageFormat};

type Result<T> = std::result::Result<T, CompressorError>;

/// JPEG at `quality` (1..=100). Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    // JPEG needs 8-bit RGB without alpha
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        .map_err(|e| CompressorError::encode(format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    rgba.write_with_encoder(PngEncoder::new(&mut buf))
        .map_err(|e| CompressorError::encode(format!("PNG encode failed: {e}")))?;
    Ok(buf)
}

pub fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    rgba.write_with_encoder(WebPEncoder::new_lossless(&mut buf))
        .map_err(|e| CompressorError::encode(format!("WebP encode failed: {e}")))?;
    Ok(buf)
}

/// Single-frame GIF. Animated inputs keep only their first frame.
pub fn encode_gif(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        // The trailer is only written once the encoder is dropped
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .encode_frame(Frame::new(image.to_rgba8()))
            .map_err(|e| CompressorError::encode(format!("GIF encode failed: {e}")))?;
    }
    Ok(buf)
}

/// Dispatches to the encoder for `format` and rejects empty output.
///
/// `quality` reaches the encoder only for lossy formats.
pub fn encode_as(image: &DynamicImage, format: ImageFormat, quality: u8) -> Result<Vec<u8>> {
    if !format.is_lossy() {
        trace!("{format} is lossless, ignoring quality {quality}");
    }
    let bytes = match format {
        ImageFormat::JPEG => encode_jpeg(image, quality),
        ImageFormat::PNG => encode_png(image),
        ImageFormat::WebP => encode_webp(image),
        ImageFormat::GIF => encode_gif(image),
    }?;

    if bytes.is_empty() {
        return Err(CompressorError::encode(format!("{format} encoder produced no output")));
    }
    Ok(bytes)
}
