//! Settings store persisted to the demo host's config file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{HostError, MemorySettingsStore, SaveBatch, SettingsStore};
use crate::config::Config;
use crate::domain::{SettingKey, SettingValue};

/// [`MemorySettingsStore`] that writes saved values back to the config file.
///
/// Each save re-reads the file under the config lock and merges only the
/// saved keys, so values written by another process (`smtp-panel set`) are
/// kept and show up here afterwards. The file is written before the
/// in-memory values change, so a failed write leaves both sides at the old
/// values.
pub struct FileSettingsStore {
    inner: MemorySettingsStore,
    config: Arc<Mutex<Config>>,
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(config: Config, path: impl Into<PathBuf>) -> Self {
        let inner = MemorySettingsStore::with_values(config.setting_values());
        Self {
            inner,
            config: Arc::new(Mutex::new(config)),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self, key: &SettingKey) -> Result<Option<SettingValue>, HostError> {
        self.inner.get(key).await
    }

    async fn set_pending(&self, key: &SettingKey, value: SettingValue) -> Result<(), HostError> {
        self.inner.set_pending(key, value).await
    }

    async fn save(&self, batch: &SaveBatch) -> Result<(), HostError> {
        let changes = self.inner.changes(batch);
        let config = Arc::clone(&self.config);
        let path = self.path.clone();
        let written = changes.clone();

        let saved = tokio::task::spawn_blocking(move || {
            let mut config = config.lock().unwrap_or_else(|p| p.into_inner());
            let updated = Config::update_file(&path, &config, |on_disk| {
                on_disk.merge_setting_values(&written);
            })?;
            *config = updated.clone();
            Ok::<_, anyhow::Error>(updated)
        })
        .await
        .map_err(|e| HostError::Io(format!("settings writer failed: {}", e)))?;

        let updated = match saved {
            Ok(updated) => updated,
            Err(e) => {
                warn!("Failed to persist settings to {}: {:#}", self.path.display(), e);
                return Err(HostError::Io(format!("{:#}", e)));
            }
        };

        debug!("Persisted {} setting(s) to {}", changes.len(), self.path.display());
        self.inner.replace(updated.setting_values().collect(), &changes);
        Ok(())
    }

    async fn load_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<BTreeMap<SettingKey, SettingValue>, HostError> {
        self.inner.load_by_prefix(prefix).await
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.subscribe()
    }
}
