// Module declarations in dependency order
pub mod commands;
pub mod core;
pub mod processing;
pub mod settings;
pub mod utils;

// Public exports for external consumers
pub use core::{CompressionConfig, FileCandidate, InputImage, OutputImage, SelectionStore, Session, TargetFormat};
pub use processing::{BatchItem, BatchRunner, BatchSummary, Transcoder};
pub use settings::{JsonFileStore, MemoryStore, SettingsProvider};
pub use utils::{CompressorError, CompressorResult, ImageFormat};
