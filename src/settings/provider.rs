use std::collections::BTreeMap;
use serde_json::Value;
use crate::utils::CompressorResult;

/// Key-value store the persisted settings are read from and written to.
pub trait SettingsProvider {
    /// Stored value for `key`, or `None` if it was never set
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value) -> CompressorResult<()>;
}

/// Non-persistent store, for tests and one-off runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsProvider for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> CompressorResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
