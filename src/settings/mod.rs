//! Persisted user settings.
//!
//! - [`SettingsProvider`]: get/set key-value interface
//! - [`JsonFileStore`]: JSON file on disk
//! - [`MemoryStore`]: in-process only
//! - [`CompressionSettings`]: the quality and format keys on top of either

mod compression;
mod file_store;
mod provider;

pub use compression::{CompressionSettings, DEFAULT_QUALITY_PERCENT, FORMAT_KEY, QUALITY_KEY};
pub use file_store::JsonFileStore;
pub use provider::{MemoryStore, SettingsProvider};
