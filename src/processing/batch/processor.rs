use tracing::{debug, info, warn};
use crate::core::{CompressionConfig, InputImage, OutputImage, Progress, ProgressType};
use crate::processing::transcoder::Transcoder;
use crate::utils::{CompressorError, CompressorResult};
use super::config::{BatchConfig, CancellationFlag};
use super::metrics::BatchSummary;

/// Outcome for one image of a batch. Failures are kept, never dropped.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Position in the batch, 0-based
    pub index: usize,
    pub input: InputImage,
    pub result: CompressorResult<OutputImage>,
}

impl BatchItem {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs transcoding over a snapshot of images, strictly one at a time and in order.
pub struct BatchRunner {
    transcoder: Transcoder,
    cancel: CancellationFlag,
}

impl BatchRunner {
    pub fn new(config: CompressionConfig, batch: &BatchConfig) -> Self {
        Self {
            transcoder: Transcoder::new(config).with_timeout(batch.item_timeout),
            cancel: CancellationFlag::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that stops the batch before its next item.
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Attempts every image and returns one entry per input, in input order.
    ///
    /// A failing item is recorded and the batch moves on. After cancellation
    /// the remaining items are recorded as [`CompressorError::Cancelled`].
    pub async fn run_all(
        &self,
        images: Vec<InputImage>,
        mut progress_callback: impl FnMut(Progress),
    ) -> Vec<BatchItem> {
        let total = images.len();
        info!("Compressing {} images", total);
        progress_callback(Progress::new(ProgressType::Start, 0, total, "Processing images..."));

        let mut items = Vec::with_capacity(total);
        for (index, input) in images.into_iter().enumerate() {
            let result = if self.cancel.is_cancelled() {
                Err(CompressorError::Cancelled)
            } else {
                self.transcoder.transcode(&input).await
            };

            let completed = index + 1;
            match &result {
                Ok(output) => debug!(
                    "[{}/{}] {} → {} bytes ({:.1}% smaller)",
                    completed, total, input.name, output.compressed_size_bytes, output.reduction_percent
                ),
                Err(e) => warn!("[{}/{}] {} failed: {}", completed, total, input.name, e),
            }

            let error = result.as_ref().err().map(|e| e.to_string());
            progress_callback(Progress::item(completed, total, &input.name, error));
            items.push(BatchItem { index, input, result });
        }

        let summary = BatchSummary::from_items(&items);
        if summary.failed > 0 {
            warn!("Batch completed with {} failed items out of {}", summary.failed, total);
        } else {
            info!("Batch completed successfully: {} images compressed", summary.succeeded);
        }
        progress_callback(Progress::new(ProgressType::Complete, total, total, "Compression complete"));

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;
    use image::{DynamicImage, RgbImage};
    use crate::core::TargetFormat;
    use crate::utils::ImageFormat;

    fn png(name: &str, width: u32, height: u32) -> InputImage {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        InputImage::new(name, "image/png", buf.into_inner())
    }

    fn runner() -> BatchRunner {
        let config = CompressionConfig::new(0.8, TargetFormat::Fixed(ImageFormat::JPEG), 1920).unwrap();
        BatchRunner::new(config, &BatchConfig::default())
    }

    #[tokio::test]
    async fn failing_item_does_not_abort_the_batch() {
        let images = vec![
            png("one.png", 16, 16),
            InputImage::new("two.png", "image/png", b"not an image".to_vec()),
            png("three.png", 8, 8),
        ];

        let items = runner().run_all(images, |_| {}).await;

        assert_eq!(items.len(), 3);
        assert!(items[0].is_success());
        assert!(matches!(items[1].result, Err(CompressorError::Decode(_))));
        assert!(items[2].is_success());
        let names: Vec<_> = items.iter().map(|i| i.input.name.as_str()).collect();
        assert_eq!(names, ["one.png", "two.png", "three.png"]);
    }

    #[tokio::test]
    async fn progress_counts_up_one_item_at_a_time() {
        let images = vec![png("a.png", 4, 4), png("b.png", 4, 4)];
        let mut updates = Vec::new();

        runner().run_all(images, |p| updates.push(p)).await;

        let types: Vec<_> = updates.iter().map(|p| p.progress_type).collect();
        assert_eq!(types, [ProgressType::Start, ProgressType::Progress, ProgressType::Progress, ProgressType::Complete]);
        let completed: Vec<_> = updates.iter().map(|p| p.completed_tasks).collect();
        assert_eq!(completed, [0, 1, 2, 2]);
        assert_eq!(updates[1].file_name.as_deref(), Some("a.png"));
    }

    #[tokio::test]
    async fn cancelled_batch_still_reports_every_item() {
        let runner = runner();
        let cancel = runner.cancellation();
        let images = vec![png("a.png", 4, 4), png("b.png", 4, 4), png("c.png", 4, 4)];

        let items = runner
            .run_all(images, move |p| {
                if p.completed_tasks == 1 {
                    cancel.cancel();
                }
            })
            .await;

        assert_eq!(items.len(), 3);
        assert!(items[0].is_success());
        assert!(matches!(items[1].result, Err(CompressorError::Cancelled)));
        assert!(matches!(items[2].result, Err(CompressorError::Cancelled)));
    }

    #[tokio::test]
    async fn timed_out_items_are_recorded_and_the_batch_carries_on() {
        let config = CompressionConfig::new(0.8, TargetFormat::Fixed(ImageFormat::JPEG), 1920).unwrap();
        let runner = BatchRunner::new(config, &BatchConfig { item_timeout: Some(Duration::ZERO) });
        let images = vec![png("a.png", 4, 4), png("b.png", 4, 4), png("c.png", 4, 4)];
        let mut updates = Vec::new();

        let items = runner.run_all(images, |p| updates.push(p)).await;

        assert_eq!(items.len(), 3);
        for item in &items {
            assert!(matches!(item.result, Err(CompressorError::Timeout(0))), "{}", item.input.name);
        }
        let errors: Vec<_> = updates.iter().filter_map(|p| p.error.as_deref()).collect();
        assert_eq!(errors, ["Timed out after 0 ms"; 3]);
        assert_eq!(updates.last().map(|p| p.progress_type), Some(ProgressType::Complete));
    }

    #[tokio::test]
    async fn empty_batch_completes_immediately() {
        let mut last = None;
        let items = runner().run_all(Vec::new(), |p| last = Some(p.progress_type)).await;
        assert!(items.is_empty());
        assert_eq!(last, Some(ProgressType::Complete));
    }

    #[tokio::test]
    async fn summary_counts_only_successes_towards_bytes() {
        let images = vec![png("ok.png", 8, 8), InputImage::new("bad.png", "image/png", vec![1u8, 2, 3])];
        let items = runner().run_all(images, |_| {}).await;
        let summary = BatchSummary::from_items(&items);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.original_bytes, items[0].input.size_bytes);
    }
}
