// src/processing/transcoder/executor.rs

//! Decode → resample → encode for a single image.
//!
//! Every stage runs inside `tokio::task::spawn_blocking` and is awaited
//! before the next one starts, so the raster is fully decoded before it is
//! resized and fully resized before it is encoded.
//!
//! A stage abandoned by a timeout keeps its blocking thread until it finishes.
//! Each stage holds the transcoder's single permit while it runs, so the next
//! image cannot start decoding until that thread lets go of its raster.

use std::sync::Arc;
use std::time::Duration;
use image::DynamicImage;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::core::{CompressionConfig, InputImage, OutputImage};
use crate::utils::{CompressorError, CompressorResult};

use super::formats::encode_as;
use super::resize::{apply_resize, target_dimensions};

/// Transcodes images according to a fixed [`CompressionConfig`].
#[derive(Debug, Clone)]
pub struct Transcoder {
    config: CompressionConfig,
    timeout: Option<Duration>,
    // Shared by clones
    gate: Arc<Semaphore>,
}

impl Transcoder {
    pub fn new(config: CompressionConfig) -> Self {
        Self { config, timeout: None, gate: Arc::new(Semaphore::new(1)) }
    }

    /// Bounds the whole decode+encode pipeline of each call.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produces a new encoded image from `input`; the input is left untouched.
    pub async fn transcode(&self, input: &InputImage) -> CompressorResult<OutputImage> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_pipeline(input))
                .await
                .map_err(|_| CompressorError::Timeout(limit.as_millis() as u64))?,
            None => self.run_pipeline(input).await,
        }
    }

    async fn run_pipeline(&self, input: &InputImage) -> CompressorResult<OutputImage> {
        let output_format = self.config.target_format.resolve(&input.mime_type)?;
        let quality = self.config.encoder_quality();
        let max_dimension = self.config.max_dimension;

        let bytes = input.shared_bytes();
        let raster = self.run_blocking(move || decode(&bytes)).await??;
        let natural = (raster.width(), raster.height());

        let target = target_dimensions(natural.0, natural.1, max_dimension);
        let raster = self.run_blocking(move || apply_resize(raster, target)).await?;

        debug!(
            "'{}': {}×{} → {}×{}",
            input.name, natural.0, natural.1, target.0, target.1
        );

        let encoded = self.run_blocking(move || encode_as(&raster, output_format, quality)).await??;

        let output = OutputImage::new(&input.name, output_format, target, input.size_bytes, encoded);
        debug!(
            "'{}' → {} {} bytes ({:.1}%)",
            input.name, output_format, output.compressed_size_bytes, output.reduction_percent
        );
        Ok(output)
    }

    /// Runs `f` on the blocking pool while holding the gate's permit.
    async fn run_blocking<T, F>(&self, f: F) -> CompressorResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.gate)
            .acquire_owned()
            .await
            .map_err(|e| CompressorError::processing(format!("Transcoder gate closed: {e}")))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f()
        })
        .await
        .map_err(|e| CompressorError::processing(format!("Task panicked: {e}")))
    }
}

/// Decodes encoded image bytes, sniffing the format from the content.
fn decode(bytes: &[u8]) -> CompressorResult<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| CompressorError::decode(format!("Failed to decode image: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use image::{GenericImageView, RgbImage};
    use crate::core::TargetFormat;
    use crate::utils::ImageFormat;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format.codec()).unwrap();
        buf.into_inner()
    }

    fn input(name: &str, width: u32, height: u32, format: ImageFormat) -> InputImage {
        InputImage::new(name, format.mime_type(), encoded(width, height, format))
    }

    fn transcoder(target: TargetFormat, quality: f32) -> Transcoder {
        Transcoder::new(CompressionConfig::new(quality, target, 1920).unwrap())
    }

    #[tokio::test]
    async fn wide_image_is_scaled_to_1920_by_960() {
        let input = input("wide.png", 3000, 1500, ImageFormat::PNG);
        let output = transcoder(TargetFormat::Fixed(ImageFormat::JPEG), 0.8)
            .transcode(&input)
            .await
            .unwrap();

        assert_eq!((output.width, output.height), (1920, 960));
        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (1920, 960));
        assert_eq!(output.format, ImageFormat::JPEG);
    }

    #[tokio::test]
    async fn image_within_bounds_keeps_its_size() {
        let input = input("small.jpg", 800, 600, ImageFormat::JPEG);
        let output = transcoder(TargetFormat::default(), 0.8).transcode(&input).await.unwrap();
        assert_eq!((output.width, output.height), (800, 600));
    }

    #[tokio::test]
    async fn lossless_round_trip_keeps_small_image_dimensions() {
        let input = input("icon.png", 100, 100, ImageFormat::PNG);
        let output = transcoder(TargetFormat::Fixed(ImageFormat::PNG), 1.0)
            .transcode(&input)
            .await
            .unwrap();

        let decoded = image::load_from_memory_with_format(&output.bytes, image::ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (100, 100));
    }

    #[tokio::test]
    async fn sizes_are_recorded_against_the_original() {
        let input = input("photo.png", 64, 48, ImageFormat::PNG);
        let output = transcoder(TargetFormat::Original, 0.8).transcode(&input).await.unwrap();

        assert_eq!(output.format, ImageFormat::PNG);
        assert_eq!(output.original_size_bytes, input.size_bytes);
        assert_eq!(output.compressed_size_bytes, output.bytes.len() as u64);
        assert_eq!(output.suggested_filename(), "compressed_photo.png");
    }

    #[tokio::test]
    async fn garbage_bytes_fail_to_decode() {
        let input = InputImage::new("broken.jpg", "image/jpeg", vec![0xFFu8, 0xD8, 0x00, 0x01]);
        let err = transcoder(TargetFormat::default(), 0.8).transcode(&input).await.unwrap_err();
        assert!(matches!(err, CompressorError::Decode(_)));
    }

    #[tokio::test]
    async fn original_target_with_unknown_type_is_a_format_error() {
        let input = InputImage::new("odd.bin", "application/octet-stream", encoded(4, 4, ImageFormat::PNG));
        let err = transcoder(TargetFormat::Original, 0.8).transcode(&input).await.unwrap_err();
        assert!(matches!(err, CompressorError::Format(_)));
    }

    #[tokio::test]
    async fn input_bytes_are_left_untouched() {
        let input = input("keep.png", 32, 32, ImageFormat::PNG);
        let before = input.bytes().to_vec();
        transcoder(TargetFormat::Fixed(ImageFormat::JPEG), 0.5).transcode(&input).await.unwrap();
        assert_eq!(input.bytes(), before.as_slice());
    }

    #[tokio::test]
    async fn expired_budget_reports_a_timeout() {
        let input = input("slow.png", 2000, 1000, ImageFormat::PNG);
        let err = transcoder(TargetFormat::default(), 0.8)
            .with_timeout(Some(Duration::ZERO))
            .transcode(&input)
            .await
            .unwrap_err();
        assert_eq!(err, CompressorError::Timeout(0));
    }

    #[tokio::test]
    async fn next_image_waits_for_a_stage_left_behind_by_a_timeout() {
        let hurried = transcoder(TargetFormat::default(), 0.8).with_timeout(Some(Duration::ZERO));
        let patient = hurried.clone().with_timeout(None);

        let err = hurried.transcode(&input("slow.png", 2000, 1000, ImageFormat::PNG)).await.unwrap_err();
        assert_eq!(err, CompressorError::Timeout(0));

        let output = patient.transcode(&input("next.png", 40, 20, ImageFormat::PNG)).await.unwrap();
        assert_eq!((output.width, output.height), (40, 20));
        assert_eq!(patient.gate.available_permits(), 1);
    }
}
