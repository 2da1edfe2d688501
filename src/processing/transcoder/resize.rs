// src/processing/transcoder/resize.rs

//! Downscale-only resize to fit within a maximum dimension.

use image::DynamicImage;
use image::imageops::FilterType;

/// Resampling kernel used for every downscale.
const FILTER: FilterType = FilterType::Triangle;

/// Output dimensions for a `w0`×`h0` raster limited to `max_dimension`.
///
/// Preserves aspect ratio and never upscales. The dominant side is clamped
/// to `max_dimension`; the other is scaled and rounded half-up, never below 1.
pub fn target_dimensions(w0: u32, h0: u32, max_dimension: u32) -> (u32, u32) {
    if w0 > h0 && w0 > max_dimension {
        (max_dimension, scale_round(h0, max_dimension, w0))
    } else if h0 > max_dimension {
        (scale_round(w0, max_dimension, h0), max_dimension)
    } else {
        (w0, h0)
    }
}

/// `round(value * numerator / denominator)` in integer arithmetic, half-up, at least 1.
fn scale_round(value: u32, numerator: u32, denominator: u32) -> u32 {
    let (value, numerator, denominator) = (value as u64, numerator as u64, denominator as u64);
    let scaled = (2 * value * numerator + denominator) / (2 * denominator);
    scaled.max(1) as u32
}

/// Resamples `image` to `(width, height)`; returns it untouched when the size already matches.
pub fn apply_resize(image: DynamicImage, (width, height): (u32, u32)) -> DynamicImage {
    if image.width() == width && image.height() == height {
        return image;
    }
    image.resize_exact(width, height, FILTER)
}
