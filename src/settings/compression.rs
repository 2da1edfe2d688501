use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use crate::core::{CompressionConfig, TargetFormat};
use crate::utils::{CompressorResult, validate_quality_percent};
use super::provider::SettingsProvider;

pub const QUALITY_KEY: &str = "compressionQuality";
pub const FORMAT_KEY: &str = "compressionFormat";

pub const DEFAULT_QUALITY_PERCENT: u8 = 80;

/// The user-adjustable settings that outlive a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionSettings {
    /// 0-100
    pub quality: u8,
    pub format: TargetFormat,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY_PERCENT,
            format: TargetFormat::default(),
        }
    }
}

impl CompressionSettings {
    /// Reads both settings, falling back to the default for any that are
    /// absent or unreadable.
    pub fn load(provider: &impl SettingsProvider) -> Self {
        let defaults = Self::default();

        let quality = provider
            .get(QUALITY_KEY)
            .and_then(|value| match value.as_i64().map(validate_quality_percent) {
                Some(Ok(quality)) => Some(quality),
                _ => {
                    warn!("Ignoring stored {}: {}", QUALITY_KEY, value);
                    None
                }
            })
            .unwrap_or(defaults.quality);

        let format = provider
            .get(FORMAT_KEY)
            .and_then(|value| match value.as_str().map(str::parse::<TargetFormat>) {
                Some(Ok(format)) => Some(format),
                _ => {
                    warn!("Ignoring stored {}: {}", FORMAT_KEY, value);
                    None
                }
            })
            .unwrap_or(defaults.format);

        Self { quality, format }
    }

    pub fn set_quality(provider: &mut impl SettingsProvider, quality: u8) -> CompressorResult<()> {
        let quality = validate_quality_percent(quality.into())?;
        provider.set(QUALITY_KEY, Value::from(quality))
    }

    pub fn set_format(provider: &mut impl SettingsProvider, format: TargetFormat) -> CompressorResult<()> {
        provider.set(FORMAT_KEY, Value::from(format.to_string()))
    }

    /// Builds the immutable config for one run.
    pub fn to_config(&self, max_dimension: u32) -> CompressorResult<CompressionConfig> {
        CompressionConfig::new(f32::from(self.quality) / 100.0, self.format, max_dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::settings::MemoryStore;
    use crate::utils::ImageFormat;

    #[test]
    fn empty_store_yields_defaults() {
        let settings = CompressionSettings::load(&MemoryStore::new());
        assert_eq!(settings.quality, 80);
        assert_eq!(settings.format, TargetFormat::Fixed(ImageFormat::JPEG));
    }

    #[test]
    fn stored_values_are_read_back() {
        let mut store = MemoryStore::new();
        CompressionSettings::set_quality(&mut store, 55).unwrap();
        CompressionSettings::set_format(&mut store, TargetFormat::Fixed(ImageFormat::WebP)).unwrap();

        assert_eq!(store.get(FORMAT_KEY), Some(json!("image/webp")));
        let settings = CompressionSettings::load(&store);
        assert_eq!(settings.quality, 55);
        assert_eq!(settings.format, TargetFormat::Fixed(ImageFormat::WebP));
    }

    #[test]
    fn invalid_stored_values_fall_back_individually() {
        let mut store = MemoryStore::new();
        store.set(QUALITY_KEY, json!(250)).unwrap();
        store.set(FORMAT_KEY, json!("original")).unwrap();

        let settings = CompressionSettings::load(&store);
        assert_eq!(settings.quality, 80);
        assert_eq!(settings.format, TargetFormat::Original);

        store.set(QUALITY_KEY, json!("high")).unwrap();
        store.set(FORMAT_KEY, json!("image/tiff")).unwrap();
        assert_eq!(CompressionSettings::load(&store), CompressionSettings::default());
    }

    #[test]
    fn quality_above_100_is_not_stored() {
        let mut store = MemoryStore::new();
        assert!(CompressionSettings::set_quality(&mut store, 101).is_err());
        assert_eq!(store.get(QUALITY_KEY), None);
    }

    #[test]
    fn config_scales_quality_to_unit_interval() {
        let config = CompressionSettings { quality: 80, format: TargetFormat::Original }
            .to_config(1920)
            .unwrap();
        assert!((config.quality - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.max_dimension, 1920);
    }
}
