//! JSON-file backed settings store.
//!
//! The whole file is one JSON object. It is read once on open and rewritten
//! on every `set`.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use serde_json::{Map, Value};
use tracing::debug;
use crate::utils::{CompressorError, CompressorResult};
use super::provider::SettingsProvider;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> CompressorResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Map::new(),
            Ok(contents) => match serde_json::from_str::<Value>(&contents)? {
                Value::Object(map) => map,
                other => {
                    return Err(CompressorError::settings(format!(
                        "{} must hold a JSON object, found {}",
                        path.display(),
                        other
                    )));
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Loaded {} settings from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    fn flush(&self) -> CompressorResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl SettingsProvider for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> CompressorResult<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.get("compressionQuality"), None);
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("compressionQuality", json!(65)).unwrap();
        store.set("compressionFormat", json!("image/webp")).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("compressionQuality"), Some(json!(65)));
        assert_eq!(reopened.get("compressionFormat"), Some(json!("image/webp")));
    }

    #[test]
    fn non_object_file_is_a_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, CompressorError::Settings(_)));
    }
}
