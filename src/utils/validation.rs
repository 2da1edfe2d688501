use crate::core::CompressionConfig;
use crate::utils::{CompressorError, CompressorResult};

/// Validates compression settings before a run
pub fn validate_config(config: &CompressionConfig) -> CompressorResult<()> {
    if !config.quality.is_finite() || !(0.0..=1.0).contains(&config.quality) {
        return Err(CompressorError::config(
            format!("Invalid quality value: {}. Must be between 0 and 1", config.quality)
        ));
    }

    if config.max_dimension == 0 {
        return Err(CompressorError::config("Max dimension cannot be 0"));
    }

    Ok(())
}

/// Validates a persisted quality value on the 0-100 scale
pub fn validate_quality_percent(quality: i64) -> CompressorResult<u8> {
    u8::try_from(quality)
        .ok()
        .filter(|q| *q <= 100)
        .ok_or_else(|| CompressorError::config(
            format!("Invalid quality value: {}. Must be between 0 and 100", quality)
        ))
}
