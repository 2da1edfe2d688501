//! Interactive session state.

use tracing::{debug, info};
use crate::core::{AcceptPolicy, AddFilesOutcome, CompressionConfig, DEFAULT_MAX_DIMENSION, FileCandidate, InputImage, Progress, SelectionStore, TargetFormat};
use crate::processing::{BatchConfig, BatchItem, BatchRunner, CancellationFlag};
use crate::settings::{CompressionSettings, SettingsProvider};
use crate::utils::CompressorResult;

/// Owns the selection and the settings provider for one user session.
///
/// There is exactly one owner; the store is only touched between the
/// awaits of a batch run, never concurrently.
pub struct Session<S: SettingsProvider> {
    selection: SelectionStore,
    settings: S,
    policy: AcceptPolicy,
    batch: BatchConfig,
    max_dimension: u32,
}

impl<S: SettingsProvider> Session<S> {
    pub fn new(settings: S) -> Self {
        Self {
            selection: SelectionStore::new(),
            settings,
            policy: AcceptPolicy::default(),
            batch: BatchConfig::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    pub fn with_policy(mut self, policy: AcceptPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_batch_config(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn add_files(&mut self, candidates: impl IntoIterator<Item = FileCandidate>) -> AddFilesOutcome {
        self.selection.add_files(candidates, &self.policy)
    }

    pub fn remove_at(&mut self, index: usize) -> CompressorResult<InputImage> {
        self.selection.remove_at(index)
    }

    pub fn settings(&self) -> CompressionSettings {
        CompressionSettings::load(&self.settings)
    }

    /// Persists a new quality (0-100) immediately.
    pub fn set_quality(&mut self, quality: u8) -> CompressorResult<()> {
        debug!("Quality set to {}", quality);
        CompressionSettings::set_quality(&mut self.settings, quality)
    }

    /// Persists a new output format immediately.
    pub fn set_format(&mut self, format: TargetFormat) -> CompressorResult<()> {
        debug!("Format set to {}", format);
        CompressionSettings::set_format(&mut self.settings, format)
    }

    /// Configuration the next batch would run with.
    pub fn compression_config(&self) -> CompressorResult<CompressionConfig> {
        self.settings().to_config(self.max_dimension)
    }

    /// Compresses everything currently selected, then empties the selection.
    ///
    /// Fails only if the settings do not form a valid config; per-image
    /// failures are reported inside the returned items.
    pub async fn compress_all(
        &mut self,
        cancel: Option<CancellationFlag>,
        progress_callback: impl FnMut(Progress),
    ) -> CompressorResult<Vec<BatchItem>> {
        let config = self.compression_config()?;
        let images = self.selection.snapshot();
        info!(
            "Starting batch: {} images, quality {:.2}, format {}, max {}px",
            images.len(), config.quality, config.target_format, config.max_dimension
        );

        let mut runner = BatchRunner::new(config, &self.batch);
        if let Some(cancel) = cancel {
            runner = runner.with_cancellation(cancel);
        }
        let items = runner.run_all(images, progress_callback).await;

        self.selection.clear();
        Ok(items)
    }
}
