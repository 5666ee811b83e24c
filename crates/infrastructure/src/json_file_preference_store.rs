use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use softmobile_application::PreferenceStore;
use softmobile_core::{AppError, AppResult};
use tokio::sync::Mutex;
use tracing::warn;

/// Preference store persisted as a flat JSON object on disk.
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePreferenceStore {
    /// Creates a store backed by `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    async fn load(&self) -> AppResult<BTreeMap<String, String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read preferences '{}': {error}",
                    self.path.display()
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(contents.as_str()) {
            Ok(values) => Ok(values),
            Err(error) => {
                // Corrupt files read as empty and are replaced on the next write.
                warn!(
                    path = %self.path.display(),
                    error = %error,
                    "ignoring unreadable preferences file"
                );
                Ok(BTreeMap::new())
            }
        }
    }
}

#[async_trait]
impl PreferenceStore for JsonFilePreferenceStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_owned(), value.to_owned());

        let serialized = serde_json::to_string_pretty(&values).map_err(|error| {
            AppError::Internal(format!("failed to serialize preferences: {error}"))
        })?;
        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to write preferences '{}': {error}",
                    self.path.display()
                ))
            })
    }
}
